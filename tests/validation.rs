//! Validation tests.
//!
//! Fixture files live in `tests/fixtures/`.

use subcue::{SubtitleDocument, SubtitleLoader, validate_document};

fn sample_path() -> &'static str {
    "tests/fixtures/sample.srt"
}

fn inverted_path() -> &'static str {
    "tests/fixtures/inverted.srt"
}

#[test]
fn validate_well_formed_document() {
    let document = SubtitleLoader::new().load(sample_path(), None).expect("Failed to load");
    let report = validate_document(&document);

    assert!(report.is_valid(), "Sample should be valid: {report}");
    assert!(report.warnings.is_empty(), "No warnings expected: {report}");
    let has_count = report.info.iter().any(|s| s.contains("3 cue(s)"));
    assert!(has_count, "Info should include the cue count");
}

#[test]
fn validate_inverted_and_overlapping() {
    let document = SubtitleLoader::new().load(inverted_path(), None).expect("Failed to load");
    let report = validate_document(&document);

    assert!(!report.is_valid());
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("Subtitle 1 ends"));
    assert!(
        report.warnings.iter().any(|s| s.contains("still shown")),
        "Overlap should be reported: {report}"
    );
}

#[test]
fn validate_overlap_with_earlier_long_cue() {
    let text = "1\n00:00:00,000 --> 00:00:10,000\nLong\n\n\
                2\n00:00:01,000 --> 00:00:02,000\nShort\n\n\
                3\n00:00:03,000 --> 00:00:04,000\nAlso short\n";
    let document = SubtitleDocument::parse(text).expect("Failed to parse");
    let report = validate_document(&document);

    let overlaps: Vec<&String> = report
        .warnings
        .iter()
        .filter(|s| s.contains("while subtitle 1 is still shown"))
        .collect();
    assert_eq!(overlaps.len(), 2, "Both short cues overlap cue 1: {report}");
    assert!(overlaps[1].starts_with("Subtitle 3 "));
}

#[test]
fn validate_numbering_and_empty_cues() {
    let text = "2\n00:00:01,000 --> 00:00:02,000\nA\n\n2\n00:00:03,000 --> 00:00:04,000\n\n";
    let document = SubtitleDocument::parse(text).expect("Failed to parse");
    let report = validate_document(&document);

    assert!(report.is_valid());
    assert!(report.warnings.iter().any(|s| s.contains("does not increase")));
    assert!(report.warnings.iter().any(|s| s.contains("has no text")));
}

#[test]
fn validate_none_and_empty_documents() {
    let none = validate_document(&SubtitleDocument::NONE);
    assert!(none.is_valid());
    assert!(none.warnings.is_empty());

    let empty = validate_document(&SubtitleDocument::new(Vec::new()));
    assert!(empty.is_valid());
    assert_eq!(empty.warnings.len(), 1);
}

#[test]
fn report_display() {
    let document = SubtitleLoader::new().load(inverted_path(), None).expect("Failed to load");
    let text = format!("{}", validate_document(&document));

    assert!(text.contains("[INFO]"));
    assert!(text.contains("[WARN]"));
    assert!(text.contains("[ERROR]"));
    assert_eq!(validate_document(&SubtitleDocument::new(vec![])).issue_count(), 1);
}
