//! Namespace aware location paths over [`xmpm_dom`] documents.
//!
//! Only the abbreviated XPath 1.0 location path syntax is understood:
//! `/`, `//`, `.`, `@`, name tests (`*`, `p:*`, `p:local`, `local`),
//! `text()`, `node()`, positional predicates and unions with `|`.
//!
//! ```
//! use xmpm_xpath::{Context, Namespaces, XPath};
//!
//! let doc = xmpm_dom::parse_str("<r xmlns:a=\"urn:a\"><a:x>1</a:x><a:x>2</a:x></r>").unwrap();
//! let namespaces = Namespaces::new().with("p", "urn:a");
//! let path = XPath::compile("//p:x[2]", &namespaces).unwrap();
//! assert_eq!(Some("2".into()), path.string_value(&Context::new(&doc)));
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::ast::LocationPath;
use crate::parser::PathParser;
use crate::selectors::{into_document_order, Selector};

pub use datamodel::{Context, Node};
pub use namespaces::Namespaces;

mod ast;
mod characters;
mod cursor;
mod datamodel;
mod namespaces;
mod parser;
mod selectors;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XPathError {
    Syntax { position: usize, message: String },
    UnknownPrefix { position: usize, prefix: String },
}

impl fmt::Display for XPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XPathError::Syntax { position, message } => {
                write!(f, "syntax error at {}: {}", position, message)
            }
            XPathError::UnknownPrefix { position, prefix } => {
                write!(f, "unknown namespace prefix `{}` at {}", prefix, position)
            }
        }
    }
}

impl std::error::Error for XPathError {}

/// Compiled path expression
///
/// Prefixes are resolved while compiling, so the expression can be evaluated
/// against documents using any prefixes for the same namespaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XPath {
    source: String,
    paths: Vec<LocationPath>,
}

impl XPath {
    pub fn compile(expr: &str, namespaces: &Namespaces) -> Result<Self, XPathError> {
        Ok(Self {
            source: expr.to_string(),
            paths: PathParser::new(namespaces).parse(expr)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Selected nodes in document order
    pub fn select<'d>(&self, ctx: &Context<'d>) -> Vec<Node<'d>> {
        Selector::select(self, ctx)
    }

    pub fn select_first<'d>(&self, ctx: &Context<'d>) -> Option<Node<'d>> {
        self.select(ctx).into_iter().next()
    }

    /// String-value of the first selected node
    pub fn string_value<'d>(&self, ctx: &Context<'d>) -> Option<Cow<'d, str>> {
        self.select_first(ctx).map(|node| node.string_value())
    }
}

impl Selector for XPath {
    fn select<'d>(&self, ctx: &Context<'d>) -> Vec<Node<'d>> {
        match self.paths.as_slice() {
            [path] => path.select(ctx),
            paths => into_document_order(paths.iter().flat_map(|path| path.select(ctx)).collect()),
        }
    }
}

impl fmt::Display for XPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
