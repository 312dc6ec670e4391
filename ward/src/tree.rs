//! Component tree model.
//!
//! A [`Node`] is what a component's `render` returns: text, elements,
//! fragments, or further components. The [`Renderer`](crate::host::Renderer)
//! resolves a `Node` tree into a [`HostNode`] tree containing only text and
//! elements.
//!
//! Components are shared through `Rc`; node equality compares components by
//! identity, so a pass-through render can be checked to return the very
//! same children it was given.

use std::fmt;
use std::rc::Rc;

use ward_common::error::{ErrorInfo, ErrorObject};

/// Result of rendering a component.
pub type RenderResult = Result<Node, ErrorObject>;

// ─── Host contract ──────────────────────────────────────────────────

/// A renderable unit of the tree.
pub trait Component {
    /// Name shown in component stacks.
    fn name(&self) -> &str;

    /// Produce this component's output.
    ///
    /// Failing is allowed either by returning `Err` or by panicking; the
    /// host treats both the same way.
    fn render(&self) -> RenderResult;

    /// Components that capture descendant failures return themselves here.
    fn as_boundary(&self) -> Option<&dyn ErrorBoundary> {
        None
    }
}

/// Error-capture hook invoked by the host.
pub trait ErrorBoundary {
    /// A descendant failed during render.
    ///
    /// Called at most once per failure event, before the host renders the
    /// boundary again.
    fn component_did_catch(&self, error: ErrorObject, error_info: Option<ErrorInfo>);
}

/// Component backed by a closure.
pub struct FnComponent<F> {
    name: String,
    render: F,
}

impl<F> FnComponent<F>
where
    F: Fn() -> RenderResult,
{
    /// Wrap `render` under the given component name.
    pub fn new(name: impl Into<String>, render: F) -> Self {
        Self {
            name: name.into(),
            render,
        }
    }
}

impl<F> Component for FnComponent<F>
where
    F: Fn() -> RenderResult,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self) -> RenderResult {
        (self.render)()
    }
}

// ─── Node ───────────────────────────────────────────────────────────

/// Element with tag, attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Tag name, e.g. `div`.
    pub tag: String,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

/// Unresolved UI tree.
#[derive(Clone, Default)]
pub enum Node {
    /// Renders nothing.
    #[default]
    Empty,
    /// Text content.
    Text(String),
    /// Element.
    Element(Element),
    /// Sequence of siblings with no wrapper.
    Fragment(Vec<Node>),
    /// Component to be rendered by the host.
    Component(Rc<dyn Component>),
}

impl Node {
    /// Text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Element node with no attributes or children.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element(Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        })
    }

    /// Fragment of siblings.
    pub fn fragment(children: impl IntoIterator<Item = Node>) -> Self {
        Self::Fragment(children.into_iter().collect())
    }

    /// Component node owning `component`.
    pub fn component<C: Component + 'static>(component: C) -> Self {
        Self::Component(Rc::new(component))
    }

    /// Component node sharing an existing component.
    pub fn shared(component: Rc<dyn Component>) -> Self {
        Self::Component(component)
    }

    /// Add an attribute. No effect on non-element nodes.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element(element) = &mut self {
            element.attrs.push((key.into(), value.into()));
        }
        self
    }

    /// Append a child. No effect on nodes that cannot have children.
    pub fn with_child(mut self, child: Node) -> Self {
        match &mut self {
            Self::Element(element) => element.children.push(child),
            Self::Fragment(children) => children.push(child),
            _ => {}
        }
        self
    }

    /// Append several children.
    pub fn with_children(self, children: impl IntoIterator<Item = Node>) -> Self {
        children.into_iter().fold(self, Node::with_child)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Element(a), Self::Element(b)) => a == b,
            (Self::Fragment(a), Self::Fragment(b)) => a == b,
            (Self::Component(a), Self::Component(b)) => {
                std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Element(element) => fmt::Debug::fmt(element, f),
            Self::Fragment(children) => f.debug_tuple("Fragment").field(children).finish(),
            Self::Component(component) => {
                f.debug_tuple("Component").field(&component.name()).finish()
            }
        }
    }
}

// ─── HostNode ───────────────────────────────────────────────────────

/// Resolved UI tree: text and elements only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HostNode {
    /// Nothing.
    #[default]
    Empty,
    /// Text content.
    Text(String),
    /// Element.
    Element {
        /// Tag name.
        tag: String,
        /// Attributes in insertion order.
        attrs: Vec<(String, String)>,
        /// Resolved children.
        children: Vec<HostNode>,
    },
    /// Siblings with no wrapper.
    Fragment(Vec<HostNode>),
}

impl HostNode {
    /// Concatenated text of the whole subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Empty => {}
            Self::Text(text) => out.push_str(text),
            Self::Element { children, .. } | Self::Fragment(children) => {
                children.iter().for_each(|child| child.collect_text(out));
            }
        }
    }

    /// True if any text node of the subtree contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        match self {
            Self::Empty => false,
            Self::Text(text) => text.contains(needle),
            Self::Element { children, .. } | Self::Fragment(children) => {
                children.iter().any(|child| child.contains_text(needle))
            }
        }
    }

    /// True if an element with the given tag and attribute exists in the subtree.
    pub fn contains_element(&self, tag: &str, attr: (&str, &str)) -> bool {
        match self {
            Self::Empty | Self::Text(_) => false,
            Self::Element {
                tag: own_tag,
                attrs,
                children,
            } => {
                (own_tag == tag && attrs.iter().any(|(k, v)| k == attr.0 && v == attr.1))
                    || children.iter().any(|child| child.contains_element(tag, attr))
            }
            Self::Fragment(children) => {
                children.iter().any(|child| child.contains_element(tag, attr))
            }
        }
    }
}

/// Compact markup, text and attribute values escaped.
impl fmt::Display for HostNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => f.write_str(&escape(text)),
            Self::Element {
                tag,
                attrs,
                children,
            } => {
                write!(f, "<{tag}")?;
                for (key, value) in attrs {
                    write!(f, " {key}=\"{}\"", escape(value))?;
                }
                f.write_str(">")?;
                for child in children {
                    fmt::Display::fmt(child, f)?;
                }
                write!(f, "</{tag}>")
            }
            Self::Fragment(children) => children
                .iter()
                .try_for_each(|child| fmt::Display::fmt(child, f)),
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf() -> Node {
        Node::component(FnComponent::new("Leaf", || Ok(Node::text("leaf"))))
    }

    #[test]
    fn builders_nest_children_and_attrs() {
        let node = Node::element("div")
            .with_attr("class", "panel")
            .with_children([Node::text("a"), Node::text("b")]);

        let Node::Element(element) = node else {
            panic!("expected element");
        };
        assert_eq!(element.tag, "div");
        assert_eq!(element.attrs, vec![("class".to_string(), "panel".to_string())]);
        assert_eq!(element.children.len(), 2);
    }

    #[test]
    fn with_child_ignored_on_text() {
        assert_eq!(Node::text("t").with_child(Node::text("x")), Node::text("t"));
    }

    #[test]
    fn component_equality_is_identity() {
        let a = leaf();
        let b = leaf();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn node_debug_shows_component_name() {
        assert_eq!(format!("{:?}", leaf()), "Component(\"Leaf\")");
    }

    #[test]
    fn host_node_markup_escapes() {
        let node = HostNode::Element {
            tag: "p".into(),
            attrs: vec![("title".into(), "a \"b\"".into())],
            children: vec![
                HostNode::Text("1 < 2 & 3".into()),
                HostNode::Fragment(vec![HostNode::Empty, HostNode::Text("!".into())]),
            ],
        };
        assert_eq!(
            node.to_string(),
            "<p title=\"a &quot;b&quot;\">1 &lt; 2 &amp; 3!</p>"
        );
    }

    #[test]
    fn host_node_text_queries() {
        let node = HostNode::Fragment(vec![
            HostNode::Element {
                tag: "div".into(),
                attrs: vec![("role".into(), "alert".into())],
                children: vec![HostNode::Text("Child ".into())],
            },
            HostNode::Text("component".into()),
        ]);
        assert_eq!(node.text_content(), "Child component");
        assert!(node.contains_text("Child"));
        assert!(!node.contains_text("Child component"));
        assert!(node.contains_element("div", ("role", "alert")));
        assert!(!node.contains_element("div", ("role", "status")));
    }
}
