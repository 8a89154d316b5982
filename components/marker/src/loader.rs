use std::borrow::Cow;
use std::path::Path;

use log::debug;
use memchr::memmem;
use xmpm_dom::{Document, Error, Reason};

use crate::error::{Result, XmpError};

/// Rewrites every `&#xD` to `&#xA` (case-insensitive).
///
/// Some exporters write line breaks in comments as carriage return character
/// references; after the rewrite they read as `\n`.
pub fn normalize_carriage_returns(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let mut result: Option<String> = None;
    let mut copied = 0;

    for pos in memmem::find_iter(bytes, b"&#") {
        let reference = &bytes[pos + 2..];
        if reference.len() >= 2
            && reference[0].eq_ignore_ascii_case(&b'x')
            && reference[1].eq_ignore_ascii_case(&b'd')
        {
            let out = result.get_or_insert_with(|| String::with_capacity(input.len()));
            out.push_str(&input[copied..pos]);
            out.push_str("&#xA");
            copied = pos + 4;
        }
    }

    match result {
        Some(mut out) => {
            out.push_str(&input[copied..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(input),
    }
}

/// Parse sidecar text into a document.
pub fn parse_document(input: &str) -> Result<Document> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let xml = normalize_carriage_returns(input);
    Ok(xmpm_dom::parse_str(&xml)?)
}

/// Read and parse a sidecar file.
pub async fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| XmpError::new_file_access(path, err))?;
    debug!("read {} bytes from {}", bytes.len(), path.display());

    let text = String::from_utf8(bytes).map_err(|err| {
        let utf8_error = err.utf8_error();
        Error::new(utf8_error.valid_up_to(), Reason::Utf8(utf8_error))
    })?;
    parse_document(&text)
}
