use std::fmt;
use std::str::Utf8Error;

pub type Result<T> = std::result::Result<T, Error>;

pub struct Error {
    offset: usize,
    pub(crate) reason: Reason,
}

impl Error {
    pub fn new(offset: usize, reason: Reason) -> Self {
        Self { offset, reason }
    }

    /// Byte offset in the input near which the error was detected.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    fn message(&self) -> String {
        match &self.reason {
            Reason::Xml(err) => format!("XML error: {}", err),
            Reason::Utf8(err) => format!("UTF-8 error: {}", err),
            Reason::UnexpectedEof => "unexpected end of file".to_string(),
            Reason::EndEventMismatch { expected, found } => {
                format!("expected </{}> but got </{}>", expected, found)
            }
            Reason::UnexpectedToken(token) => format!("unexpected token: {:?}", token),
            Reason::UnknownPrefix(prefix) => format!("unbound namespace prefix `{}`", prefix),
            Reason::UnexpectedDocType => "unexpected doctype".to_string(),
            Reason::UnexpectedDecl => "xml decl not at start of file".to_string(),
            Reason::TrailingContent => "trailing content".to_string(),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("offset", &self.offset)
            .field("message", &self.message())
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message(), self.offset)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.reason {
            Reason::Xml(err) => Some(err),
            Reason::Utf8(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum Reason {
    // reported by quick-xml
    Xml(quick_xml::Error),

    // not-wf
    Utf8(Utf8Error),
    UnexpectedEof,
    EndEventMismatch { expected: String, found: String },
    UnexpectedToken(String),
    UnknownPrefix(String),
    UnexpectedDocType,
    UnexpectedDecl,
    TrailingContent,
}
