use std::borrow::Cow;
use std::fmt;

/// Expanded name of an element or attribute.
///
/// See https://www.w3.org/TR/REC-xml-names/#dt-expname
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Name {
    prefix: Option<String>,
    local_name: String,
    namespace: Option<String>,
}

impl Name {
    pub fn new(
        prefix: Option<String>,
        local_name: impl Into<String>,
        namespace: Option<String>,
    ) -> Self {
        Self {
            prefix,
            local_name: local_name.into(),
            namespace,
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Resolved namespace URI
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Compares the expanded name, the prefix is irrelevant.
    pub fn matches(&self, namespace: Option<&str>, local_name: &str) -> bool {
        self.local_name == local_name && self.namespace.as_deref() == namespace
    }

    /// Name as written in the source, `prefix:local` or `local`.
    pub fn qualified_name(&self) -> Cow<'_, str> {
        match &self.prefix {
            Some(prefix) => Cow::Owned(format!("{}:{}", prefix, self.local_name)),
            None => Cow::Borrowed(&self.local_name),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn get_root(&self) -> &Element {
        &self.root
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    order: usize,
    name: Name,
    value: String,
}

impl Attribute {
    pub fn new(order: usize, name: Name, value: impl Into<String>) -> Self {
        Self {
            order,
            name,
            value: value.into(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Unescaped value
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn order(&self) -> usize {
        self.order
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    order: usize,
    value: String,
}

impl Text {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn order(&self) -> usize {
        self.order
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Child {
    Element(Element),
    Text(Text),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    order: usize,
    name: Name,
    attributes: Vec<Attribute>,
    children: Vec<Child>,
}

impl Element {
    // new

    pub fn new(order: usize, name: Name) -> Self {
        Self {
            order,
            name,
            attributes: vec![],
            children: vec![],
        }
    }

    // name

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Position in document order, the document node itself is `0`.
    pub fn order(&self) -> usize {
        self.order
    }

    // attributes

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, namespace: Option<&str>, local_name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attr| attr.name.matches(namespace, local_name))
    }

    // children

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Child::Element(element) => Some(element),
            Child::Text(_) => None,
        })
    }

    // text

    /// Concatenation of the direct text children
    pub fn text(&self) -> Cow<'_, str> {
        let mut texts = self.children.iter().filter_map(|child| match child {
            Child::Text(text) => Some(text.value.as_str()),
            Child::Element(_) => None,
        });

        let mut result = Cow::Borrowed(texts.next().unwrap_or(""));
        for text in texts {
            result.to_mut().push_str(text);
        }
        result
    }

    /// Concatenation of all text descendants in document order
    ///
    /// See https://www.w3.org/TR/1999/REC-xpath-19991116/#dt-string-value
    pub fn string_value(&self) -> String {
        let mut result = String::new();
        self.string_value_(&mut result);
        result
    }

    fn string_value_(&self, result: &mut String) {
        for child in &self.children {
            match child {
                Child::Element(element) => element.string_value_(result),
                Child::Text(text) => result.push_str(&text.value),
            }
        }
    }

    // manipulators

    pub fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn push_child(&mut self, element: Element) {
        self.children.push(Child::Element(element));
    }

    /// Appends text, merging with a directly preceding text node.
    pub fn push_text(&mut self, order: usize, text: &str) {
        if let Some(Child::Text(last)) = self.children.last_mut() {
            last.value.push_str(text);
        } else {
            self.children.push(Child::Text(Text {
                order,
                value: text.to_string(),
            }));
        }
    }
}
