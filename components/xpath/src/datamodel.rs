use std::borrow::Cow;

use xmpm_dom::{Attribute, Child, Document, Element, Name, Text};

/// Node
///
/// See https://www.w3.org/TR/1999/REC-xpath-19991116/#data-model
#[derive(Copy, Clone, Debug)]
pub enum Node<'d> {
    Document(&'d Document),
    Element(&'d Element),
    Attribute(&'d Attribute),
    Text(&'d Text),
}

impl<'d> Node<'d> {
    pub(crate) fn from_child(child: &'d Child) -> Self {
        match child {
            Child::Element(element) => Node::Element(element),
            Child::Text(text) => Node::Text(text),
        }
    }

    /// Position in document order, unique within one document
    pub fn order(&self) -> usize {
        match self {
            Node::Document(_) => 0,
            Node::Element(element) => element.order(),
            Node::Attribute(attr) => attr.order(),
            Node::Text(text) => text.order(),
        }
    }

    /// https://www.w3.org/TR/1999/REC-xpath-19991116/#dt-string-value
    pub fn string_value(&self) -> Cow<'d, str> {
        match self {
            Node::Document(doc) => Cow::Owned(doc.get_root().string_value()),
            Node::Element(element) => Cow::Owned(element.string_value()),
            Node::Attribute(attr) => Cow::Borrowed(attr.value()),
            Node::Text(text) => Cow::Borrowed(text.value()),
        }
    }

    pub fn name(&self) -> Option<&'d Name> {
        match self {
            Node::Element(element) => Some(element.name()),
            Node::Attribute(attr) => Some(attr.name()),
            Node::Document(_) | Node::Text(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&'d Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// Evaluation context: the context node and the document it belongs to
#[derive(Copy, Clone, Debug)]
pub struct Context<'d> {
    document: &'d Document,
    node: Node<'d>,
}

impl<'d> Context<'d> {
    /// Context positioned at the document node
    pub fn new(document: &'d Document) -> Self {
        Self {
            document,
            node: Node::Document(document),
        }
    }

    pub fn with_node(&self, node: Node<'d>) -> Self {
        Self {
            document: self.document,
            node,
        }
    }

    pub fn document(&self) -> &'d Document {
        self.document
    }

    pub fn node(&self) -> Node<'d> {
        self.node
    }
}
