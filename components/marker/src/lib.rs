//! Commented markers from Adobe XMP sidecar files.
//!
//! A sidecar carries the clip frame rate (`xmpDM:videoFrameRate`) and a
//! sequence of markers (`xmpDM:markers/rdf:Seq/rdf:li`). Every marker with a
//! non-empty comment becomes a [`MarkerRecord`] holding the comment and its
//! start time as `MM:SS`.
//!
//! ```no_run
//! # async fn run() -> xmp_marker::Result<()> {
//! for marker in xmp_marker::get_markers("clip.xmp").await? {
//!     println!("{} {}", marker.timecode, marker.content);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;

pub use config::{ExtractorConfig, RDF_NS, XMP_DM_NS};
pub use error::{ErrorKind, Result, XmpError};
pub use extractor::{MarkerExtractor, MarkerList, MarkerRecord};
pub use loader::{load_document, normalize_carriage_returns, parse_document};
pub use timecode::{timecode, Timecode};

mod config;
mod error;
mod extractor;
mod loader;
pub mod timecode;

/// Read the markers of the sidecar at `path` with the default queries.
pub async fn get_markers(path: impl AsRef<Path>) -> Result<MarkerList> {
    MarkerExtractor::new(&ExtractorConfig::default())?
        .get_markers(path)
        .await
}
