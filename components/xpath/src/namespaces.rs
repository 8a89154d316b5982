use std::collections::BTreeMap;

/// Prefix to namespace URI bindings used while compiling path expressions.
///
/// The bindings are fixed once built; an [`XPath`](crate::XPath) keeps the
/// resolved URIs, not the prefixes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Namespaces {
    bindings: BTreeMap<String, String>,
}

impl Namespaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.bindings.insert(prefix.into(), uri.into());
        self
    }

    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Namespaces {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            bindings: iter
                .into_iter()
                .map(|(prefix, uri)| (prefix.into(), uri.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve() {
        let namespaces = Namespaces::new().with("dm", "urn:dm");
        assert_eq!(Some("urn:dm"), namespaces.resolve("dm"));
        assert_eq!(None, namespaces.resolve("rdf"));
    }

    #[test]
    fn later_binding_wins() {
        let namespaces = Namespaces::new().with("a", "urn:1").with("a", "urn:2");
        assert_eq!(1, namespaces.len());
        assert_eq!(Some("urn:2"), namespaces.resolve("a"));
    }

    #[test]
    fn from_iter() {
        let namespaces: Namespaces = vec![("a", "urn:a"), ("b", "urn:b")].into_iter().collect();
        assert_eq!(
            vec![("a", "urn:a"), ("b", "urn:b")],
            namespaces.iter().collect::<Vec<_>>()
        );
    }
}
