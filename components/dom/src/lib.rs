//! Owned XML document tree with resolved namespaces.
//!
//! Documents are built by a [`DomReader`](reader::DomReader). Every node gets a
//! document-order index while reading, so node-sets of different origin can be
//! merged and sorted without parent links.

pub use dom::{Attribute, Child, Document, Element, Name, Text};
pub use error::{Error, Reason, Result};
pub use reader::quick_xml::QuickXmlDomReader;
pub use reader::DomReader;

mod chars;
mod dom;
mod error;
pub mod reader;

/// Parse a complete document from a string.
pub fn parse_str(input: &str) -> Result<Document> {
    QuickXmlDomReader::new(input).parse()
}
