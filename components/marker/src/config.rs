use std::collections::BTreeMap;

use serde::Deserialize;
use xmpm_xpath::Namespaces;

use crate::timecode::DEFAULT_PAD_WIDTH;

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const XMP_DM_NS: &str = "http://ns.adobe.com/xmp/1.0/DynamicMedia/";

/// Where to find frame rate and markers in a document.
///
/// Queries are path expressions compiled against `namespaces`; field queries
/// are evaluated relative to each marker node. Missing keys keep their
/// defaults when deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub namespaces: BTreeMap<String, String>,
    pub frame_rate_query: String,
    pub markers_query: String,
    pub start_time_query: String,
    pub comment_query: String,
    pub pad_width: usize,
}

impl ExtractorConfig {
    pub fn namespaces(&self) -> Namespaces {
        self.namespaces
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
            .collect()
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        let namespaces = [("rdf", RDF_NS), ("xmpDM", XMP_DM_NS)]
            .iter()
            .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
            .collect();

        Self {
            namespaces,
            frame_rate_query: "//rdf:Description/xmpDM:videoFrameRate".to_string(),
            markers_query: "//xmpDM:markers/rdf:Seq/rdf:li".to_string(),
            // element form first, then the RDF attribute shorthands
            start_time_query: "xmpDM:startTime | @xmpDM:startTime \
                 | rdf:Description/@xmpDM:startTime"
                .to_string(),
            comment_query: "xmpDM:comment | @xmpDM:comment \
                 | rdf:Description/@xmpDM:comment"
                .to_string(),
            pad_width: DEFAULT_PAD_WIDTH,
        }
    }
}
