//! Fallback views.
//!
//! Production fallbacks implement [`FallbackView`] and only ever see
//! [`FallbackProps`]: the error and a flattened component stack. The
//! built-in [`DiagnosticView`] additionally renders a full [`ErrorDetail`]
//! for development builds.

use ward_common::error::{ErrorDetail, ErrorObject};

use crate::tree::{Node, RenderResult};

/// Props handed to a production fallback view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackProps<'a> {
    /// The captured error.
    pub error: &'a ErrorObject,
    /// Flattened component stack, empty when the host supplied none.
    pub component_stack: &'a str,
}

/// Caller-supplied renderer shown in place of a failed subtree.
///
/// A failing fallback is not caught by the guard that renders it; it
/// propagates to the next guard up.
pub trait FallbackView {
    /// Render the fallback.
    fn render(&self, props: &FallbackProps<'_>) -> RenderResult;
}

impl<F> FallbackView for F
where
    F: Fn(&FallbackProps<'_>) -> RenderResult,
{
    fn render(&self, props: &FallbackProps<'_>) -> RenderResult {
        self(props)
    }
}

/// Pin a closure to the [`FallbackView`] signature.
///
/// Closures passed straight to an `impl FallbackView` parameter get no
/// signature hint; routing them through here gives one.
pub fn fallback_fn<F>(view: F) -> F
where
    F: Fn(&FallbackProps<'_>) -> RenderResult,
{
    view
}

const DEVELOPMENT_HEADING: &str = "Development environment: an error occurred";
const PRODUCTION_HEADING: &str = "Something went wrong";

/// Built-in view listing the error and the component stack.
///
/// It is the diagnostic view in development mode and the default fallback
/// in production mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticView;

impl DiagnosticView {
    /// Render the full detail (development mode).
    pub fn render_detail(&self, detail: &ErrorDetail) -> Node {
        layout(DEVELOPMENT_HEADING, detail.error(), detail.component_stack())
    }
}

impl FallbackView for DiagnosticView {
    fn render(&self, props: &FallbackProps<'_>) -> RenderResult {
        Ok(layout(PRODUCTION_HEADING, props.error, props.component_stack))
    }
}

fn layout(heading: &str, error: &ErrorObject, component_stack: &str) -> Node {
    Node::element("div")
        .with_attr("role", "alert")
        .with_children([
            Node::element("h2").with_child(Node::text(heading)),
            Node::element("p").with_child(Node::element("strong").with_child(Node::text("Render error"))),
            labelled("Error:", error.summary()),
            labelled("Stacktrace:", component_stack),
        ])
}

fn labelled(label: &str, value: impl Into<String>) -> Node {
    Node::element("p").with_children([
        Node::element("strong").with_child(Node::text(label)),
        Node::text(value),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Renderer;
    use ward_common::error::ErrorInfo;

    fn detail() -> ErrorDetail {
        ErrorDetail::new(
            ErrorObject::new("Error", "boom").with_stack("at panel.rs:3:1"),
            Some(ErrorInfo::from_frames(["Panel", "RenderGuard"])),
        )
    }

    #[test]
    fn render_detail_lists_error_and_component_stack() {
        let node = DiagnosticView.render_detail(&detail());
        let host = Renderer::new().mount(&node).unwrap();

        assert!(host.contains_text(DEVELOPMENT_HEADING));
        assert!(host.contains_text("Error-boom-at panel.rs:3:1"));
        assert!(host.contains_text("in Panel"));
        assert!(host.contains_element("div", ("role", "alert")));
    }

    #[test]
    fn production_render_uses_props_only() {
        let error = ErrorObject::new("Error", "y");
        let props = FallbackProps {
            error: &error,
            component_stack: "",
        };
        let node = DiagnosticView.render(&props).unwrap();
        let host = Renderer::new().mount(&node).unwrap();

        assert!(host.contains_text(PRODUCTION_HEADING));
        assert!(host.contains_text("Error-y-"));
    }

    #[test]
    fn closures_are_fallback_views() {
        let view = fallback_fn(|props| Ok(Node::text(format!("sorry: {}", props.error.message()))));
        let error = ErrorObject::new("Error", "z");
        let node = view
            .render(&FallbackProps {
                error: &error,
                component_stack: "",
            })
            .unwrap();
        assert_eq!(node, Node::text("sorry: z"));
    }
}
