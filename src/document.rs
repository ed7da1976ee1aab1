//! Parsed subtitle documents.
//!
//! A [`SubtitleDocument`] holds the ordered [`Cue`]s of one subtitle track.
//! Each cue has a display interval in milliseconds and one or more
//! [`Line`]s made of styled [`TextRun`]s. [`SubtitleDocument::NONE`] stands
//! for "no subtitle" and never has an active cue.
//!
//! # Example
//!
//! ```
//! use subcue::{SubtitleDocument, SubtitleType};
//!
//! let document = SubtitleDocument::parse("1\n00:00:01,000 --> 00:00:02,000\n<i>Hello</i>\n")?;
//! assert_eq!(document.len(), 1);
//! assert!(document.cues()[0].lines[0].texts[0].italic);
//!
//! let vtt = document.to_text(SubtitleType::Vtt);
//! assert!(vtt.starts_with("WEBVTT"));
//! # Ok::<(), subcue::SubcueError>(())
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::SubcueError;
use crate::info::SubtitleInfo;
use crate::parser::SrtParser;

/// Subtitle file types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SubtitleType {
    /// SubRip Text (.srt).
    Srt,
    /// Web Video Text Tracks (.vtt). Can be written but not parsed.
    Vtt,
}

impl SubtitleType {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            SubtitleType::Srt => "srt",
            SubtitleType::Vtt => "vtt",
        }
    }

    /// Match a file extension, case-insensitively.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "srt" => Some(SubtitleType::Srt),
            "vtt" | "webvtt" => Some(SubtitleType::Vtt),
            _ => None,
        }
    }

    /// Detect the type from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(Self::from_extension)
    }
}

impl Display for SubtitleType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SubtitleType::Srt => write!(f, "SRT"),
            SubtitleType::Vtt => write!(f, "WebVTT"),
        }
    }
}

/// A contiguous span of text sharing one style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub italic: bool,
    pub bold: bool,
    pub underline: bool,
}

impl TextRun {
    /// An unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if any style flag is set.
    pub fn is_styled(&self) -> bool {
        self.italic || self.bold || self.underline
    }
}

/// One visual row of a cue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Line {
    pub texts: Vec<TextRun>,
}

impl Line {
    pub fn new(texts: Vec<TextRun>) -> Self {
        Self { texts }
    }

    /// The line's text without styling.
    pub fn text(&self) -> String {
        self.texts.iter().map(|run| run.text.as_str()).collect()
    }
}

/// One timed subtitle entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cue {
    /// Index from the source file.
    pub id: String,
    /// Start of the display interval, in milliseconds.
    pub start_time: u64,
    /// End of the display interval (inclusive), in milliseconds.
    pub end_time: u64,
    pub lines: Vec<Line>,
}

impl Cue {
    /// Whether this cue should be displayed at `time` once shifted by
    /// `offset_millis`. Both bounds are inclusive.
    pub fn is_active_at(&self, time: i64, offset_millis: i64) -> bool {
        let start = self.start_time as i64 + offset_millis;
        let end = self.end_time as i64 + offset_millis;
        time >= start && time <= end
    }

    /// All lines joined with `\n`, without styling.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Display length in milliseconds. Zero for inverted cues.
    pub fn duration(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }
}

/// A parsed, ready-to-render subtitle track.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleDocument {
    source_path: Option<PathBuf>,
    info: Option<SubtitleInfo>,
    cues: Vec<Cue>,
    none: bool,
}

impl SubtitleDocument {
    /// The "no subtitle" document.
    pub const NONE: SubtitleDocument = SubtitleDocument {
        source_path: None,
        info: None,
        cues: Vec::new(),
        none: true,
    };

    /// Create a document from cues in display order.
    pub fn new(cues: Vec<Cue>) -> Self {
        Self {
            source_path: None,
            info: None,
            cues,
            none: false,
        }
    }

    /// Parse SRT text with default options.
    ///
    /// # Errors
    ///
    /// [`SubcueError::Parse`] if the text is malformed.
    pub fn parse(text: &str) -> Result<Self, SubcueError> {
        Ok(Self::new(SrtParser::new().parse(text)?))
    }

    /// Record the file this document was read from.
    #[must_use]
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Record which subtitle choice this document was downloaded for.
    #[must_use]
    pub fn with_info(mut self, info: SubtitleInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Returns `true` for [`SubtitleDocument::NONE`].
    ///
    /// A parsed file without cues is not the none document.
    pub fn is_none(&self) -> bool {
        self.none
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn info(&self) -> Option<&SubtitleInfo> {
        self.info.as_ref()
    }

    /// End time of the last cue to disappear, in milliseconds.
    pub fn span(&self) -> u64 {
        self.cues.iter().map(|cue| cue.end_time).max().unwrap_or(0)
    }

    /// A copy with every cue moved by `offset_millis`. Times that would
    /// become negative are clamped to zero.
    pub fn shifted(&self, offset_millis: i64) -> Self {
        let shift = |time: u64| (time as i64 + offset_millis).max(0) as u64;
        let mut document = self.clone();
        for cue in &mut document.cues {
            cue.start_time = shift(cue.start_time);
            cue.end_time = shift(cue.end_time);
        }
        document
    }

    /// Serialize the cues as text of the given type.
    pub fn to_text(&self, format: SubtitleType) -> String {
        format_cues(&self.cues, format)
    }
}

/// Format cues into a string in the given format.
fn format_cues(cues: &[Cue], format: SubtitleType) -> String {
    let mut output = String::new();

    if format == SubtitleType::Vtt {
        output.push_str("WEBVTT\n\n");
    }

    for (i, cue) in cues.iter().enumerate() {
        let (start, end) = match format {
            SubtitleType::Srt => (
                format_srt_timestamp(cue.start_time),
                format_srt_timestamp(cue.end_time),
            ),
            SubtitleType::Vtt => (
                format_vtt_timestamp(cue.start_time),
                format_vtt_timestamp(cue.end_time),
            ),
        };

        let id = if cue.id.is_empty() {
            (i + 1).to_string()
        } else {
            cue.id.clone()
        };

        // Writing into a String cannot fail.
        let _ = writeln!(output, "{id}");
        let _ = writeln!(output, "{start} --> {end}");
        for line in &cue.lines {
            let _ = writeln!(output, "{}", format_line_markup(line));
        }
        output.push('\n');
    }

    output
}

/// Re-wrap styled runs in `<b>`, `<i>` and `<u>` tags.
fn format_line_markup(line: &Line) -> String {
    let mut text = String::new();
    for run in &line.texts {
        let mut open = String::new();
        let mut close = String::new();
        for (enabled, tag) in [(run.bold, 'b'), (run.italic, 'i'), (run.underline, 'u')] {
            if enabled {
                open.push_str(&format!("<{tag}>"));
                close.insert_str(0, &format!("</{tag}>"));
            }
        }
        text.push_str(&open);
        text.push_str(&run.text);
        text.push_str(&close);
    }
    text
}

fn split_millis(millis: u64) -> (u64, u64, u64, u64) {
    let hours = millis / 3_600_000;
    let minutes = (millis % 3_600_000) / 60_000;
    let seconds = (millis % 60_000) / 1000;
    (hours, minutes, seconds, millis % 1000)
}

/// Format milliseconds as an SRT timestamp (HH:MM:SS,mmm).
pub(crate) fn format_srt_timestamp(millis: u64) -> String {
    let (hours, minutes, seconds, millis) = split_millis(millis);
    format!("{hours:02}:{minutes:02}:{seconds:02},{millis:03}")
}

/// Format milliseconds as a WebVTT timestamp (HH:MM:SS.mmm).
fn format_vtt_timestamp(millis: u64) -> String {
    let (hours, minutes, seconds, millis) = split_millis(millis);
    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}
