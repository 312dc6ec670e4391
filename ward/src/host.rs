//! Host renderer.
//!
//! Resolves a [`Node`] tree into a [`HostNode`] tree, depth first. This is
//! the framework side of the guard contract:
//!
//! - every `Component::render` call runs inside a render scope with panics
//!   caught, so a returned `Err` and a panic are handled alike;
//! - the chain of component names is tracked and turned into an
//!   [`ErrorInfo`] at the point of failure;
//! - a failure raised by a component's own `render` goes to its nearest
//!   *ancestor* boundary; a failure among a boundary's descendants is
//!   delivered to that boundary's `component_did_catch` exactly once, after
//!   which the boundary is rendered again to obtain its fallback;
//! - a failure with no boundary above it is reported to the global handler
//!   and returned as [`HostError::Uncaught`].

use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, warn};
use ward_common::error::{AmbientEvent, ErrorInfo, ErrorObject};

use crate::global;
use crate::scope;
use crate::tree::{Component, HostNode, Node};

/// Failure escaping the whole tree.
#[derive(Debug, Error)]
pub enum HostError {
    /// A render failure had no enclosing boundary.
    #[error("uncaught render error: {error}")]
    Uncaught {
        /// The failure.
        error: ErrorObject,
        /// Component chain at the point of failure.
        component_stack: String,
    },
}

/// A render failure travelling up the tree.
struct Fault {
    error: ErrorObject,
    info: ErrorInfo,
}

/// Mounts component trees.
#[derive(Debug, Clone)]
pub struct Renderer {
    report_uncaught: bool,
}

impl Renderer {
    /// Renderer that reports uncaught failures to the global handler.
    pub fn new() -> Self {
        Self {
            report_uncaught: true,
        }
    }

    /// Whether uncaught failures go to the global handler before `mount`
    /// returns them.
    pub fn report_uncaught(mut self, enabled: bool) -> Self {
        self.report_uncaught = enabled;
        self
    }

    /// Resolve `root` into host output.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Uncaught`] when a failure is not captured by any
    /// boundary.
    pub fn mount(&self, root: &Node) -> Result<HostNode, HostError> {
        let mut chain = Vec::new();
        self.resolve(root, &mut chain).map_err(|fault| {
            warn!(error = %fault.error, "render failure escaped every boundary");
            if self.report_uncaught {
                let event = AmbientEvent::Message(format!("Uncaught {}", fault.error));
                global::report_global_error(&event, None, Some(&fault.error));
            }
            HostError::Uncaught {
                error: fault.error,
                component_stack: fault.info.component_stack().to_string(),
            }
        })
    }

    fn resolve(&self, node: &Node, chain: &mut Vec<String>) -> Result<HostNode, Fault> {
        match node {
            Node::Empty => Ok(HostNode::Empty),
            Node::Text(text) => Ok(HostNode::Text(text.clone())),
            Node::Element(element) => Ok(HostNode::Element {
                tag: element.tag.clone(),
                attrs: element.attrs.clone(),
                children: self.resolve_all(&element.children, chain)?,
            }),
            Node::Fragment(children) => Ok(HostNode::Fragment(self.resolve_all(children, chain)?)),
            Node::Component(component) => {
                chain.push(component.name().to_string());
                let resolved = self.resolve_component(component, chain);
                chain.pop();
                resolved
            }
        }
    }

    fn resolve_all(&self, nodes: &[Node], chain: &mut Vec<String>) -> Result<Vec<HostNode>, Fault> {
        nodes.iter().map(|node| self.resolve(node, chain)).collect()
    }

    fn resolve_component(
        &self,
        component: &Rc<dyn Component>,
        chain: &mut Vec<String>,
    ) -> Result<HostNode, Fault> {
        let output = invoke(component.as_ref(), chain)?;
        let fault = match self.resolve(&output, chain) {
            Ok(host) => return Ok(host),
            Err(fault) => fault,
        };

        let Some(boundary) = component.as_boundary() else {
            return Err(fault);
        };

        debug!(
            boundary = component.name(),
            error = %fault.error,
            "delivering render failure to boundary"
        );
        boundary.component_did_catch(fault.error, Some(fault.info));

        // Second pass renders the fallback. Failures from here on belong to
        // the next boundary up.
        let fallback = invoke(component.as_ref(), chain)?;
        self.resolve(&fallback, chain)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Call `render` inside a render scope, mapping both failure styles to a
/// [`Fault`] carrying the current component chain.
fn invoke(component: &dyn Component, chain: &[String]) -> Result<Node, Fault> {
    let error = match scope::isolate(|| component.render()) {
        Ok(Ok(node)) => return Ok(node),
        Ok(Err(error)) => error,
        Err(caught) => caught.into_error(),
    };
    Err(Fault {
        error,
        info: ErrorInfo::from_frames(chain.iter().rev()),
    })
}
