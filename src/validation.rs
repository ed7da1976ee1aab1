//! Subtitle document validation.
//!
//! Provides [`validate_document`], which inspects a parsed document and
//! returns a [`ValidationReport`] describing its timing and any potential
//! problems for playback.
//!
//! # Example
//!
//! ```
//! use subcue::{SubtitleDocument, validate_document};
//!
//! let document = SubtitleDocument::parse("1\n00:00:05,000 --> 00:00:01,000\nBackwards\n")?;
//! let report = validate_document(&document);
//! assert!(!report.is_valid());
//! for error in &report.errors {
//!     println!("Error: {error}");
//! }
//! # Ok::<(), subcue::SubcueError>(())
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::document::{SubtitleDocument, format_srt_timestamp};

/// Summary of document validation.
///
/// Contains lists of informational notices, warnings, and errors found during
/// validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Informational notices (not problems).
    pub info: Vec<String>,
    /// Issues that may confuse playback but still render.
    pub warnings: Vec<String>,
    /// Cues that can never be displayed correctly.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Returns `true` if no errors were found.
    ///
    /// Warnings do not affect this result.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of issues (info + warnings + errors).
    pub fn issue_count(&self) -> usize {
        self.info.len() + self.warnings.len() + self.errors.len()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for item in &self.info {
            writeln!(f, "[INFO] {item}")?;
        }
        for item in &self.warnings {
            writeln!(f, "[WARN] {item}")?;
        }
        for item in &self.errors {
            writeln!(f, "[ERROR] {item}")?;
        }
        if self.issue_count() == 0 {
            writeln!(f, "No issues found.")?;
        }
        Ok(())
    }
}

/// Run validation checks on a document's cues.
pub fn validate_document(document: &SubtitleDocument) -> ValidationReport {
    let mut report = ValidationReport::default();

    if document.is_none() {
        report.info.push("No subtitle selected".to_string());
        return report;
    }

    if document.is_empty() {
        report.warnings.push("Document contains no cues".to_string());
        return report;
    }

    report.info.push(format!(
        "{} cue(s) spanning {}",
        document.len(),
        format_srt_timestamp(document.span()),
    ));

    let mut previous_index: Option<u64> = None;
    // Cue that stays on screen the longest so far.
    let mut latest_end: Option<(&str, u64)> = None;

    for cue in document.cues() {
        // ── Timing ─────────────────────────────────────────────────
        if cue.end_time < cue.start_time {
            report.errors.push(format!(
                "Subtitle {} ends at {} before it starts at {}",
                cue.id,
                format_srt_timestamp(cue.end_time),
                format_srt_timestamp(cue.start_time),
            ));
        }

        if let Some((previous_id, end)) = latest_end {
            if cue.start_time <= end {
                report.warnings.push(format!(
                    "Subtitle {} starts at {} while subtitle {previous_id} is still shown",
                    cue.id,
                    format_srt_timestamp(cue.start_time),
                ));
            }
        }
        if latest_end.is_none_or(|(_, end)| cue.end_time > end) {
            latest_end = Some((cue.id.as_str(), cue.end_time));
        }

        // ── Numbering ──────────────────────────────────────────────
        if let Ok(index) = cue.id.parse::<u64>() {
            if previous_index.is_some_and(|previous| index <= previous) {
                report.warnings.push(format!(
                    "Subtitle index {index} does not increase on the previous one"
                ));
            }
            previous_index = Some(index);
        }

        // ── Content ────────────────────────────────────────────────
        if cue.text().trim().is_empty() {
            report
                .warnings
                .push(format!("Subtitle {} has no text", cue.id));
        }
    }

    report
}
