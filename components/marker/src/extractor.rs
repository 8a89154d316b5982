use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use xmpm_dom::Document;
use xmpm_xpath::{Context, XPath};

use crate::config::ExtractorConfig;
use crate::error::{Result, XmpError};
use crate::loader::{load_document, parse_document};
use crate::timecode::Timecode;

/// A commented marker with its display timecode
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerRecord {
    /// Comment text, may contain line breaks
    pub content: String,
    /// `MM:SS`
    pub timecode: String,
}

pub type MarkerList = Vec<MarkerRecord>;

/// Leading integer of `text` after optional whitespace and sign, NaN if there is none.
fn parse_int(text: &str) -> f64 {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1.0, &text[1..]),
        Some(b'+') => (1.0, &text[1..]),
        _ => (1.0, text),
    };

    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    match digits[..len].parse::<f64>() {
        Ok(value) if len > 0 => sign * value,
        _ => f64::NAN,
    }
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0, |acc, c| {
        c.to_digit(radix).map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}

/// Whole trimmed `text` as number: blank is 0, garbage is NaN.
///
/// Decimal and exponent notation may be signed. `0x`, `0o` and `0b` prefixed
/// integers may not. `Infinity` is the only spelling of infinity.
fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    if let Some(head) = text.get(..2) {
        for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
            if head.eq_ignore_ascii_case(prefix) {
                return parse_radix(&text[2..], radix).unwrap_or(f64::NAN);
            }
        }
    }

    let (sign, unsigned) = match text.as_bytes()[0] {
        b'-' => (-1.0, &text[1..]),
        b'+' => (1.0, &text[1..]),
        _ => (1.0, text),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    // keeps `inf` and `nan` away from the float parser
    if unsigned
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && !b.eq_ignore_ascii_case(&b'e'))
    {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// Extracts markers with compiled queries.
///
/// Each field query is evaluated with the marker node as context node, so the
/// values of one marker never leak into another.
#[derive(Clone, Debug)]
pub struct MarkerExtractor {
    frame_rate: XPath,
    markers: XPath,
    start_time: XPath,
    comment: XPath,
    pad_width: usize,
}

impl MarkerExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let namespaces = config.namespaces();
        let compile = |query: &str| {
            XPath::compile(query, &namespaces)
                .map_err(|err| XmpError::new_invalid_query(query, err))
        };

        Ok(Self {
            frame_rate: compile(&config.frame_rate_query)?,
            markers: compile(&config.markers_query)?,
            start_time: compile(&config.start_time_query)?,
            comment: compile(&config.comment_query)?,
            pad_width: config.pad_width,
        })
    }

    fn frame_rate(&self, ctx: &Context) -> Result<f64> {
        let text = self
            .frame_rate
            .string_value(ctx)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
            XmpError::new_metadata_missing(format!("no frame rate at `{}`", self.frame_rate))
        })?;

        let frame_rate = parse_number(&text);
        if !frame_rate.is_finite() || frame_rate == 0.0 {
            warn!("unusable frame rate {:?}, timecodes will not be numbers", text);
        }
        Ok(frame_rate)
    }

    pub fn extract(&self, document: &Document) -> Result<MarkerList> {
        let ctx = Context::new(document);
        let frame_rate = self.frame_rate(&ctx)?;
        let markers = self.markers.select(&ctx);
        debug!("{} markers at {} fps", markers.len(), frame_rate);

        let mut records = Vec::with_capacity(markers.len());
        for (index, marker) in markers.into_iter().enumerate() {
            let marker_ctx = ctx.with_node(marker);

            let content = match self.comment.string_value(&marker_ctx) {
                Some(content) if !content.is_empty() => content.into_owned(),
                _ => {
                    debug!("skipping marker {} without comment", index);
                    continue;
                }
            };

            let start_time = self
                .start_time
                .string_value(&marker_ctx)
                .filter(|text| !text.is_empty())
                .ok_or_else(|| {
                    XmpError::new_metadata_missing(format!(
                        "marker {} has no start time at `{}`",
                        index, self.start_time
                    ))
                })?;

            let timecode = Timecode::from_start_time(parse_int(&start_time), frame_rate);
            records.push(MarkerRecord {
                content,
                timecode: timecode.format(self.pad_width),
            });
        }

        Ok(records)
    }

    pub fn extract_str(&self, input: &str) -> Result<MarkerList> {
        self.extract(&parse_document(input)?)
    }

    pub async fn get_markers(&self, path: impl AsRef<Path>) -> Result<MarkerList> {
        let document = load_document(path).await?;
        self.extract(&document)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::ErrorKind;

    fn extractor() -> MarkerExtractor {
        MarkerExtractor::new(&ExtractorConfig::default()).unwrap()
    }

    fn sidecar(frame_rate: &str, items: &str) -> String {
        format!(
            r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">
 <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about="" xmlns:xmpDM="http://ns.adobe.com/xmp/1.0/DynamicMedia/">
   {}
   <xmpDM:markers>
    <rdf:Seq>{}</rdf:Seq>
   </xmpDM:markers>
  </rdf:Description>
 </rdf:RDF>
</x:xmpmeta>"#,
            frame_rate, items
        )
    }

    fn rate(value: &str) -> String {
        format!("<xmpDM:videoFrameRate>{}</xmpDM:videoFrameRate>", value)
    }

    fn item(start: &str, comment: &str) -> String {
        format!(
            "<rdf:li rdf:parseType=\"Resource\"><xmpDM:startTime>{}</xmpDM:startTime>\
             <xmpDM:comment>{}</xmpDM:comment></rdf:li>",
            start, comment
        )
    }

    fn record(content: &str, timecode: &str) -> MarkerRecord {
        MarkerRecord {
            content: content.to_string(),
            timecode: timecode.to_string(),
        }
    }

    #[test]
    fn parse_int_takes_leading_digits() {
        assert_eq!(1884.0, parse_int("1884"));
        assert_eq!(12.0, parse_int("  12abc"));
        assert_eq!(-5.0, parse_int("-5"));
        assert_eq!(7.0, parse_int("+7.9"));
        assert!(parse_int("f254016000000").is_nan());
        assert!(parse_int("").is_nan());
        assert!(parse_int("-").is_nan());
    }

    #[test]
    fn parse_number_takes_whole_text() {
        assert_eq!(23.976024, parse_number(" 23.976024\n"));
        assert_eq!(0.0, parse_number(""));
        assert!(parse_number("25fps").is_nan());
        assert_eq!(2500.0, parse_number("2.5e3"));
        assert_eq!(25.0, parse_number("0x19"));
        assert_eq!(5.0, parse_number("0B101"));
        assert!(parse_number("-0x19").is_nan());
        assert!(parse_number("0x").is_nan());
    }

    #[test]
    fn parse_number_spells_infinity_one_way() {
        assert_eq!(f64::INFINITY, parse_number("Infinity"));
        assert_eq!(f64::NEG_INFINITY, parse_number("-Infinity"));
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("infinity").is_nan());
        assert!(parse_number("NaN").is_nan());
        assert!(parse_number("nan").is_nan());
    }

    #[test]
    fn zero_markers() {
        let markers = extractor().extract_str(&sidecar(&rate("25"), "")).unwrap();
        assert!(markers.is_empty());
    }

    #[test]
    fn markers_in_document_order() {
        let items = [item("2500", "b"), item("100", "a")].concat();
        let markers = extractor().extract_str(&sidecar(&rate("25"), &items)).unwrap();
        assert_eq!(vec![record("b", "01:40"), record("a", "00:04")], markers);
    }

    #[test]
    fn markers_without_comment_are_skipped() {
        let items = [
            item("100", "first"),
            item("200", ""),
            "<rdf:li><xmpDM:startTime>300</xmpDM:startTime></rdf:li>".to_string(),
            item("2500", "last"),
        ]
        .concat();
        let markers = extractor().extract_str(&sidecar(&rate("25"), &items)).unwrap();
        assert_eq!(vec![record("first", "00:04"), record("last", "01:40")], markers);
    }

    #[test]
    fn values_are_scoped_to_their_marker() {
        // the second marker has no start time, it must not pick up the first one's
        let items = [
            item("100", "first"),
            "<rdf:li><xmpDM:comment>second</xmpDM:comment></rdf:li>".to_string(),
        ]
        .concat();
        let err = extractor()
            .extract_str(&sidecar(&rate("25"), &items))
            .unwrap_err();
        assert_eq!(ErrorKind::MetadataMissing, err.kind());
        assert!(err.to_string().contains("marker 1"), "{}", err);
    }

    #[test]
    fn attribute_form() {
        let items = "<rdf:li xmpDM:startTime=\"2500\" xmpDM:comment=\"attr\"/>\
                     <rdf:li><rdf:Description xmpDM:startTime=\"100\" xmpDM:comment=\"nested\"/></rdf:li>";
        let markers = extractor().extract_str(&sidecar(&rate("25"), items)).unwrap();
        assert_eq!(vec![record("attr", "01:40"), record("nested", "00:04")], markers);
    }

    #[test]
    fn missing_frame_rate() {
        let doc = sidecar("", &item("1", "c"));
        let err = extractor().extract_str(&doc).unwrap_err();
        assert_eq!(ErrorKind::MetadataMissing, err.kind());
    }

    #[test]
    fn empty_frame_rate_is_missing() {
        for frame_rate in ["<xmpDM:videoFrameRate/>".to_string(), rate("")] {
            let err = extractor()
                .extract_str(&sidecar(&frame_rate, &item("1", "c")))
                .unwrap_err();
            assert_eq!(ErrorKind::MetadataMissing, err.kind(), "{}", frame_rate);
        }
    }

    #[test]
    fn empty_start_time_is_missing() {
        let items = "<rdf:li><xmpDM:startTime/><xmpDM:comment>c</xmpDM:comment></rdf:li>";
        let err = extractor()
            .extract_str(&sidecar(&rate("25"), items))
            .unwrap_err();
        assert_eq!(ErrorKind::MetadataMissing, err.kind());
        assert!(err.to_string().contains("marker 0"), "{}", err);
    }

    #[test]
    fn unusable_frame_rate_is_not_guarded() {
        let markers = extractor()
            .extract_str(&sidecar(&rate("0"), &item("10", "c")))
            .unwrap();
        assert_eq!(vec![record("c", "ty:aN")], markers);
    }

    #[test]
    fn non_numeric_start_time_is_not_guarded() {
        let markers = extractor()
            .extract_str(&sidecar(&rate("25"), &item("soon", "c")))
            .unwrap();
        assert_eq!(vec![record("c", "aN:aN")], markers);
    }

    #[test]
    fn line_breaks_in_comments() {
        let markers = extractor()
            .extract_str(&sidecar(&rate("25"), &item("0", "a&#xD;b&#xd;c")))
            .unwrap();
        assert_eq!("a\nb\nc", markers[0].content);
    }

    #[test]
    fn pad_width_from_config() {
        let config = ExtractorConfig {
            pad_width: 3,
            ..ExtractorConfig::default()
        };
        let markers = MarkerExtractor::new(&config)
            .unwrap()
            .extract_str(&sidecar(&rate("25"), &item("2500", "c")))
            .unwrap();
        assert_eq!("001:040", markers[0].timecode);
    }

    #[test]
    fn invalid_query() {
        let config = ExtractorConfig {
            markers_query: "//dm:markers".to_string(),
            ..ExtractorConfig::default()
        };
        let err = MarkerExtractor::new(&config).unwrap_err();
        assert_eq!(ErrorKind::InvalidQuery, err.kind());
    }

    #[test]
    fn malformed_document() {
        assert_matches!(
            extractor().extract_str("<x:xmpmeta>").map_err(|err| err.kind()),
            Err(ErrorKind::Parse)
        );
    }

    #[test]
    fn extractor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MarkerExtractor>();
    }

    #[test]
    fn record_serializes_to_json() {
        let json = serde_json::to_string(&record("a\nb", "00:33")).unwrap();
        assert_eq!(r#"{"content":"a\nb","timecode":"00:33"}"#, json);
    }
}
