use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Axis {
    Attribute,
    Child,
    DescendantOrSelf,
    Self_,
}

impl Axis {
    fn name(self) -> &'static str {
        match self {
            Axis::Attribute => "attribute",
            Axis::Child => "child",
            Axis::DescendantOrSelf => "descendant-or-self",
            Axis::Self_ => "self",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NodeTest {
    Name {
        namespace: Option<String>,
        local: String,
    },
    AnyName,
    AnyNameInNamespace(String),
    Text,
    Node,
}

impl fmt::Display for NodeTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeTest::Name {
                namespace: Some(ns),
                local,
            } => write!(f, "{{{}}}{}", ns, local),
            NodeTest::Name {
                namespace: None,
                local,
            } => f.write_str(local),
            NodeTest::AnyName => f.write_str("*"),
            NodeTest::AnyNameInNamespace(ns) => write!(f, "{{{}}}*", ns),
            NodeTest::Text => f.write_str("text()"),
            NodeTest::Node => f.write_str("node()"),
        }
    }
}

/// Only positional predicates are supported: `[1]` keeps the first node of
/// the step result for each context node.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Predicate {
    Position(usize),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocationStep {
    pub axis: Axis,
    pub node_test: NodeTest,
    pub predicates: Vec<Predicate>,
}

impl LocationStep {
    pub fn new(axis: Axis, node_test: NodeTest) -> Self {
        Self {
            axis,
            node_test,
            predicates: vec![],
        }
    }

    /// Abbreviation of `//`
    pub fn descendant_or_self() -> Self {
        Self::new(Axis::DescendantOrSelf, NodeTest::Node)
    }
}

impl fmt::Display for LocationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.axis.name(), self.node_test)?;
        for Predicate::Position(pos) in &self.predicates {
            write!(f, "[{}]", pos)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LocationPath {
    pub absolute: bool,
    pub steps: Vec<LocationStep>,
}

impl fmt::Display for LocationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            f.write_str("/")?;
        }
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}
