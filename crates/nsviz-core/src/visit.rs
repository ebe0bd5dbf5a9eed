//! Depth-first syntax tree traversal.
//!
//! The extraction layer owns the real syntax tree; this module only assumes a
//! node can report its children, its source attributes and whether it is one
//! of the constructs the analysis cannot resolve.
//!
//! # Traversal order
//!
//! [`traverse`] visits nodes depth-first. Every registered visitor sees
//! `enter_node` before a node's children are walked and `leave_node` after,
//! in registration order.
//!
//! ```text
//! enter(root) -> enter(child) -> leave(child) -> ... -> leave(root)
//! ```

use crate::name::Attributes;
use crate::unsupported::UnsupportedConstruct;

pub trait SyntaxNode: Sized {
    /// The unresolvable construct this node represents, if any.
    fn unsupported_construct(&self) -> Option<UnsupportedConstruct>;

    fn attributes(&self) -> &Attributes;

    fn children(&self) -> &[Self];
}

/// Traversal callbacks. Both default to doing nothing.
pub trait Visitor<N: SyntaxNode> {
    fn enter_node(&mut self, _node: &N) {}

    fn leave_node(&mut self, _node: &N) {}
}

/// Walk `root` depth-first, calling every visitor on every node.
pub fn traverse<N: SyntaxNode>(root: &N, visitors: &mut [&mut dyn Visitor<N>]) {
    for visitor in visitors.iter_mut() {
        visitor.enter_node(root);
    }
    for child in root.children() {
        traverse(child, visitors);
    }
    for visitor in visitors.iter_mut() {
        visitor.leave_node(root);
    }
}

/// Minimal owned syntax node, for callers that build trees by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    construct: Option<UnsupportedConstruct>,
    attributes: Attributes,
    children: Vec<Node>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn construct(construct: UnsupportedConstruct) -> Self {
        Self {
            construct: Some(construct),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }
}

impl SyntaxNode for Node {
    fn unsupported_construct(&self) -> Option<UnsupportedConstruct> {
        self.construct
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Visitor<Node> for Recorder {
        fn enter_node(&mut self, node: &Node) {
            self.events.push(format!("enter {}", label(node)));
        }

        fn leave_node(&mut self, node: &Node) {
            self.events.push(format!("leave {}", label(node)));
        }
    }

    fn label(node: &Node) -> String {
        node.attributes()
            .get("id")
            .cloned()
            .unwrap_or_default()
    }

    #[test]
    fn traversal_is_depth_first() {
        let tree = Node::new()
            .with_attribute("id", "root")
            .with_child(
                Node::new()
                    .with_attribute("id", "a")
                    .with_child(Node::new().with_attribute("id", "a1")),
            )
            .with_child(Node::new().with_attribute("id", "b"));

        let mut recorder = Recorder::default();
        traverse(&tree, &mut [&mut recorder]);

        assert_eq!(
            recorder.events,
            [
                "enter root",
                "enter a",
                "enter a1",
                "leave a1",
                "leave a",
                "enter b",
                "leave b",
                "leave root",
            ]
        );
    }

    #[test]
    fn every_visitor_sees_every_node() {
        let tree = Node::new().with_child(Node::new());
        let mut first = Recorder::default();
        let mut second = Recorder::default();
        traverse(&tree, &mut [&mut first, &mut second]);
        assert_eq!(first.events.len(), 4);
        assert_eq!(first.events, second.events);
    }
}
