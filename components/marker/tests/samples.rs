use std::error::Error;
use std::path::PathBuf;

use xmp_marker::{get_markers, ErrorKind, ExtractorConfig, MarkerExtractor, MarkerRecord};

fn sample(name: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "tests", "samples", name]
        .iter()
        .collect()
}

fn record(content: &str, timecode: &str) -> MarkerRecord {
    MarkerRecord {
        content: content.to_string(),
        timecode: timecode.to_string(),
    }
}

#[tokio::test]
async fn bad_file_path() {
    let err = get_markers(sample("non-existent-file.xmp"))
        .await
        .unwrap_err();
    assert_eq!(ErrorKind::FileAccess, err.kind());
    assert!(err.to_string().contains("non-existent-file.xmp"), "{}", err);
}

#[tokio::test]
async fn zero_markers() -> Result<(), Box<dyn Error>> {
    let markers = get_markers(sample("zero-markers.xmp")).await?;
    assert!(markers.is_empty());
    Ok(())
}

#[tokio::test]
async fn one_marker() -> Result<(), Box<dyn Error>> {
    let markers = get_markers(sample("one-marker.xmp")).await?;
    assert_eq!(vec![record("only timecode @00:01:18:12", "01:18")], markers);
    Ok(())
}

#[tokio::test]
async fn three_markers() -> Result<(), Box<dyn Error>> {
    let markers = get_markers(sample("three-markers.xmp")).await?;
    assert_eq!(
        vec![
            record("first timecode @00:00:33:14", "00:33"),
            record("second timecode @ 00:01:38:23", "01:38"),
            record(
                "third timecode\nwith a linebreak\nand another linebreak",
                "02:29"
            ),
        ],
        markers
    );
    Ok(())
}

#[tokio::test]
async fn repeated_reads_agree() -> Result<(), Box<dyn Error>> {
    let extractor = MarkerExtractor::new(&ExtractorConfig::default())?;
    let first = extractor.get_markers(sample("three-markers.xmp")).await?;
    let second = extractor.get_markers(sample("three-markers.xmp")).await?;
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn skipped_markers_keep_the_others_aligned() -> Result<(), Box<dyn Error>> {
    let markers = get_markers(sample("skipped-markers.xmp")).await?;
    assert_eq!(
        vec![record("kept", "00:33"), record("also kept", "02:29")],
        markers
    );
    Ok(())
}

#[tokio::test]
async fn missing_frame_rate() {
    let err = get_markers(sample("missing-frame-rate.xmp"))
        .await
        .unwrap_err();
    assert_eq!(ErrorKind::MetadataMissing, err.kind());
}

#[tokio::test]
async fn markers_as_json() -> Result<(), Box<dyn Error>> {
    let markers = get_markers(sample("one-marker.xmp")).await?;
    assert_eq!(
        r#"[{"content":"only timecode @00:01:18:12","timecode":"01:18"}]"#,
        serde_json::to_string(&markers)?
    );
    Ok(())
}

#[tokio::test]
async fn configured_extractor() -> Result<(), Box<dyn Error>> {
    let config: ExtractorConfig = serde_json::from_str(r#"{"pad_width": 3}"#)?;
    let markers = MarkerExtractor::new(&config)?
        .get_markers(sample("one-marker.xmp"))
        .await?;
    assert_eq!("001:018", markers[0].timecode);
    Ok(())
}
