use xmpm_dom::Name;

use crate::ast::{Axis, LocationPath, LocationStep, NodeTest, Predicate};
use crate::datamodel::{Context, Node};

pub trait Selector {
    fn select<'d>(&self, ctx: &Context<'d>) -> Vec<Node<'d>>;
}

pub(crate) fn into_document_order(mut nodes: Vec<Node<'_>>) -> Vec<Node<'_>> {
    nodes.sort_by_key(Node::order);
    nodes.dedup_by_key(|node| node.order());
    nodes
}

fn push_descendants<'d>(node: Node<'d>, out: &mut Vec<Node<'d>>) {
    match node {
        Node::Document(doc) => {
            let root = Node::Element(doc.get_root());
            out.push(root);
            push_descendants(root, out);
        }
        Node::Element(element) => {
            for child in element.children() {
                let child = Node::from_child(child);
                out.push(child);
                push_descendants(child, out);
            }
        }
        Node::Attribute(_) | Node::Text(_) => {}
    }
}

fn axis_nodes(axis: Axis, node: Node<'_>) -> Vec<Node<'_>> {
    match axis {
        Axis::Self_ => vec![node],
        Axis::Child => match node {
            Node::Document(doc) => vec![Node::Element(doc.get_root())],
            Node::Element(element) => element.children().iter().map(Node::from_child).collect(),
            Node::Attribute(_) | Node::Text(_) => vec![],
        },
        Axis::Attribute => match node {
            Node::Element(element) => element.attributes().iter().map(Node::Attribute).collect(),
            _ => vec![],
        },
        Axis::DescendantOrSelf => {
            let mut out = vec![node];
            push_descendants(node, &mut out);
            out
        }
    }
}

/// Name of the node if it is of the principal node type of the axis
fn principal_name<'d>(axis: Axis, node: &Node<'d>) -> Option<&'d Name> {
    match (axis, node) {
        (Axis::Attribute, Node::Attribute(attr)) => Some(attr.name()),
        (Axis::Attribute, _) => None,
        (_, Node::Element(element)) => Some(element.name()),
        _ => None,
    }
}

fn node_test_matches(test: &NodeTest, axis: Axis, node: &Node) -> bool {
    match test {
        NodeTest::Node => true,
        NodeTest::Text => matches!(node, Node::Text(_)),
        NodeTest::AnyName => principal_name(axis, node).is_some(),
        NodeTest::AnyNameInNamespace(namespace) => principal_name(axis, node)
            .map_or(false, |name| name.namespace() == Some(namespace.as_str())),
        NodeTest::Name { namespace, local } => principal_name(axis, node)
            .map_or(false, |name| name.matches(namespace.as_deref(), local)),
    }
}

impl LocationStep {
    fn apply<'d>(&self, input: &[Node<'d>]) -> Vec<Node<'d>> {
        let mut result = vec![];
        for node in input {
            let mut matched: Vec<Node<'d>> = axis_nodes(self.axis, *node)
                .into_iter()
                .filter(|candidate| node_test_matches(&self.node_test, self.axis, candidate))
                .collect();

            // positions are relative to the nodes selected from this context node
            for predicate in &self.predicates {
                match predicate {
                    Predicate::Position(pos) => {
                        matched = matched.into_iter().nth(pos - 1).into_iter().collect();
                    }
                }
            }

            result.extend(matched);
        }
        into_document_order(result)
    }
}

impl Selector for LocationPath {
    fn select<'d>(&self, ctx: &Context<'d>) -> Vec<Node<'d>> {
        let mut nodes = if self.absolute {
            vec![Node::Document(ctx.document())]
        } else {
            vec![ctx.node()]
        };

        for step in &self.steps {
            if nodes.is_empty() {
                break;
            }
            nodes = step.apply(&nodes);
        }
        nodes
    }
}
