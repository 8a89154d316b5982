use std::fmt::{Debug, Display, Formatter};
use std::path::{Path, PathBuf};

use xmpm_xpath::XPathError;

pub type Result<T> = std::result::Result<T, XmpError>;

/// Category of an [`XmpError`]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The sidecar file is missing or unreadable.
    FileAccess,
    /// The file is not UTF-8 or not well-formed XML.
    Parse,
    /// The frame rate or a field of a marker is absent.
    MetadataMissing,
    /// A configured path expression does not compile.
    InvalidQuery,
}

#[derive(Debug)]
enum Repr {
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(xmpm_dom::Error),
    MetadataMissing(String),
    InvalidQuery {
        query: String,
        source: XPathError,
    },
}

pub struct XmpError(Box<Repr>);

impl XmpError {
    pub(crate) fn new_file_access(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self(Box::new(Repr::FileAccess {
            path: path.as_ref().to_path_buf(),
            source,
        }))
    }

    pub(crate) fn new_metadata_missing(message: impl Into<String>) -> Self {
        Self(Box::new(Repr::MetadataMissing(message.into())))
    }

    pub(crate) fn new_invalid_query(query: impl Into<String>, source: XPathError) -> Self {
        Self(Box::new(Repr::InvalidQuery {
            query: query.into(),
            source,
        }))
    }

    pub fn kind(&self) -> ErrorKind {
        match *self.0 {
            Repr::FileAccess { .. } => ErrorKind::FileAccess,
            Repr::Parse(_) => ErrorKind::Parse,
            Repr::MetadataMissing(_) => ErrorKind::MetadataMissing,
            Repr::InvalidQuery { .. } => ErrorKind::InvalidQuery,
        }
    }
}

impl Debug for XmpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for XmpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &*self.0 {
            Repr::FileAccess { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            Repr::Parse(err) => write!(f, "malformed XMP document: {}", err),
            Repr::MetadataMissing(msg) => write!(f, "missing metadata: {}", msg),
            Repr::InvalidQuery { query, source } => {
                write!(f, "invalid query `{}`: {}", query, source)
            }
        }
    }
}

impl std::error::Error for XmpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.0 {
            Repr::FileAccess { source, .. } => Some(source),
            Repr::Parse(err) => Some(err),
            Repr::MetadataMissing(_) => None,
            Repr::InvalidQuery { source, .. } => Some(source),
        }
    }
}

impl From<xmpm_dom::Error> for XmpError {
    fn from(err: xmpm_dom::Error) -> Self {
        Self(Box::new(Repr::Parse(err)))
    }
}
