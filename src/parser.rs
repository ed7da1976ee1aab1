//! SRT parsing.
//!
//! [`SrtParser`] walks the input line by line through four stages: an index
//! line, a time-range line, any number of text lines, and a blank line that
//! finishes the cue. A cue still open at the end of the input is finished
//! as if a blank line followed it.
//!
//! # Example
//!
//! ```
//! use subcue::parse_srt;
//!
//! let cues = parse_srt("1\n00:01:02,500 --> 00:01:05,000\nHello\n")?;
//! assert_eq!(cues[0].start_time, 62_500);
//! assert_eq!(cues[0].end_time, 65_000);
//! # Ok::<(), subcue::SubcueError>(())
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::config::{MarkupMode, ParseOptions};
use crate::document::{Cue, Line, TextRun};
use crate::error::SubcueError;

static INDEX_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Trailing position coordinates (`X1:40 X2:600 Y1:20 Y2:50`) are accepted
/// and ignored.
static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{1,2}):(\d{2}):(\d{2}),(\d{3}) --> (\d{1,2}):(\d{2}):(\d{2}),(\d{3})(?:\s.*)?$",
    )
    .unwrap()
});

static STYLED_LINE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<([ibu])>(.+)</([ibu])>$").unwrap());

static STYLE_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(/?)([ibu])>").unwrap());

/// Parse SRT text with default [`ParseOptions`].
///
/// # Errors
///
/// [`SubcueError::Parse`] on a malformed index or time-range line.
pub fn parse_srt(text: &str) -> Result<Vec<Cue>, SubcueError> {
    SrtParser::new().parse(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Index,
    Time,
    Text,
    Finish,
}

/// Parser for SubRip (.srt) text.
#[derive(Debug, Clone, Default)]
pub struct SrtParser {
    options: ParseOptions,
}

impl SrtParser {
    /// A parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `text` into cues in source order.
    ///
    /// Empty input yields no cues. Text lines that are not recognised
    /// markup are kept as plain runs.
    ///
    /// # Errors
    ///
    /// [`SubcueError::Parse`] with the 1-based line number when an index
    /// line has no digits, a time line is malformed, a cue has no time
    /// line, or (with strict timing) a cue ends before it starts.
    pub fn parse(&self, text: &str) -> Result<Vec<Cue>, SubcueError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut cues = Vec::new();
        let mut builder = CueBuilder::default();
        let mut stage = Stage::Index;
        let mut line_count = 0;

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            line_count = line_number;

            if line.trim().is_empty() {
                stage = Stage::Finish;
            }

            stage = match stage {
                Stage::Index => {
                    builder.id = Some(read_index(line_number, line)?);
                    builder.line_number = line_number;
                    Stage::Time
                }
                Stage::Time => {
                    let (start, end) = read_time(line_number, line)?;
                    builder.times = Some((start, end));
                    Stage::Text
                }
                Stage::Text => {
                    builder.lines.push(self.read_text(line));
                    Stage::Text
                }
                Stage::Finish => {
                    self.finish(&mut builder, &mut cues, line_number)?;
                    Stage::Index
                }
            };
        }

        self.finish(&mut builder, &mut cues, line_count + 1)?;

        log::debug!("Parsed {} cue(s) from {} line(s)", cues.len(), line_count);
        Ok(cues)
    }

    /// Move the accumulated cue into `cues`. Does nothing when no cue has
    /// been started.
    fn finish(
        &self,
        builder: &mut CueBuilder,
        cues: &mut Vec<Cue>,
        line_number: usize,
    ) -> Result<(), SubcueError> {
        let Some(id) = builder.id.take() else {
            return Ok(());
        };
        let current = std::mem::take(builder);

        let Some((start_time, end_time)) = current.times else {
            return Err(SubcueError::parse(
                line_number,
                format!("subtitle {id} has no time line"),
            ));
        };

        if self.options.strict_timing && end_time < start_time {
            return Err(SubcueError::parse(
                current.line_number + 1,
                format!("subtitle {id} ends ({end_time} ms) before it starts ({start_time} ms)"),
            ));
        }

        cues.push(Cue {
            id,
            start_time,
            end_time,
            lines: current.lines,
        });
        Ok(())
    }

    fn read_text(&self, line: &str) -> Line {
        match self.options.markup {
            MarkupMode::Simple => Line::new(vec![read_simple_run(line)]),
            MarkupMode::Nested => Line::new(read_nested_runs(line)),
        }
    }
}

#[derive(Debug, Default)]
struct CueBuilder {
    id: Option<String>,
    times: Option<(u64, u64)>,
    lines: Vec<Line>,
    line_number: usize,
}

fn read_index(line_number: usize, line: &str) -> Result<String, SubcueError> {
    let found = INDEX_PATTERN.find(line).ok_or_else(|| {
        SubcueError::parse(line_number, format!("{line:?} has no index number"))
    })?;

    let index: u64 = found.as_str().parse().map_err(|e| {
        SubcueError::parse(line_number, format!("invalid subtitle index: {e}"))
    })?;
    Ok(index.to_string())
}

fn read_time(line_number: usize, line: &str) -> Result<(u64, u64), SubcueError> {
    let captures = TIME_PATTERN.captures(line.trim_end()).ok_or_else(|| {
        SubcueError::parse(line_number, format!("invalid time line format {line:?}"))
    })?;

    let start = timestamp_millis(&captures, 1)
        .ok_or_else(|| SubcueError::parse(line_number, format!("invalid start time in {line:?}")))?;
    let end = timestamp_millis(&captures, 5)
        .ok_or_else(|| SubcueError::parse(line_number, format!("invalid end time in {line:?}")))?;
    Ok((start, end))
}

/// Convert four consecutive capture groups (hours, minutes, seconds,
/// millis) starting at `first` into milliseconds. `None` when minutes or
/// seconds are out of range.
fn timestamp_millis(captures: &Captures<'_>, first: usize) -> Option<u64> {
    let field = |offset: usize| -> Option<u64> { captures.get(first + offset)?.as_str().parse().ok() };

    let hours = field(0)?;
    let minutes = field(1)?;
    let seconds = field(2)?;
    let millis = field(3)?;

    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    Some(((hours * 60 + minutes) * 60 + seconds) * 1000 + millis)
}

/// One run per line; a line fully wrapped in a single style tag gets that
/// style.
fn read_simple_run(line: &str) -> TextRun {
    let Some(captures) = STYLED_LINE_PATTERN.captures(line) else {
        return TextRun::plain(line);
    };

    let tag = &captures[1];
    if tag != &captures[3] {
        return TextRun::plain(line);
    }

    TextRun {
        text: captures[2].to_string(),
        italic: tag == "i",
        bold: tag == "b",
        underline: tag == "u",
    }
}

/// Split a line at every style tag. Opening tags switch a style on,
/// closing tags switch it off; unclosed tags run to the end of the line.
fn read_nested_runs(line: &str) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut style = TextRun::default();
    let mut position = 0;

    for captures in STYLE_TAG_PATTERN.captures_iter(line) {
        let Some(tag) = captures.get(0) else {
            continue;
        };
        push_run(&mut runs, &style, &line[position..tag.start()]);
        position = tag.end();

        let enabled = captures[1].is_empty();
        match captures[2].to_ascii_lowercase().as_str() {
            "i" => style.italic = enabled,
            "b" => style.bold = enabled,
            _ => style.underline = enabled,
        }
    }
    push_run(&mut runs, &style, &line[position..]);

    runs
}

fn push_run(runs: &mut Vec<TextRun>, style: &TextRun, text: &str) {
    if text.is_empty() {
        return;
    }

    if let Some(last) = runs.last_mut() {
        if last.italic == style.italic && last.bold == style.bold && last.underline == style.underline
        {
            last.text.push_str(text);
            return;
        }
    }

    runs.push(TextRun {
        text: text.to_string(),
        ..style.clone()
    });
}
