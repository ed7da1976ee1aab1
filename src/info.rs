//! Subtitle candidates.
//!
//! A [`SubtitleInfo`] describes one language choice for a media item, backed
//! by any number of downloadable [`SubtitleFile`]s. Files are ranked by
//! score and download count; [`SubtitleInfo::best_file`] picks the file to
//! download for a given [`SubtitleMatcher`].
//!
//! # Example
//!
//! ```
//! use subcue::{Language, RealLanguage, SubtitleFile, SubtitleInfo, SubtitleMatcher};
//!
//! let info = SubtitleInfo::new(Some("tt0111161"), Language::Real(RealLanguage::English))
//!     .with_file(SubtitleFile::new("a.srt", "https://example.com/a.srt", 5.0, 10))
//!     .with_file(SubtitleFile::new("b.srt", "https://example.com/b.srt", 8.0, 1));
//!
//! let file = info.best_file(&SubtitleMatcher::new()).unwrap();
//! assert_eq!(file.name, "b.srt");
//! ```

use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SubcueError;
use crate::language::Language;

/// A release quality tag inside a file name, such as `720p`.
static QUALITY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]{3,4})p").unwrap());

/// One downloadable subtitle resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleFile {
    /// File name as reported by the provider.
    pub name: String,
    /// Download location.
    pub url: String,
    /// Provider rating. Higher is better.
    #[serde(default)]
    pub score: f32,
    /// Number of times the file was downloaded.
    #[serde(default)]
    pub downloads: u32,
    /// Video quality the file was timed against (e.g. `720`). `None` or
    /// `Some(0)` means unspecified, and the quality is read from the name.
    #[serde(default)]
    pub quality: Option<u32>,
    /// Charset label of the file content, if known.
    #[serde(default)]
    pub encoding: Option<String>,
}

impl SubtitleFile {
    /// Create a file with no quality or encoding hint.
    pub fn new(name: impl Into<String>, url: impl Into<String>, score: f32, downloads: u32) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            score,
            downloads,
            quality: None,
            encoding: None,
        }
    }

    /// Set the quality hint.
    #[must_use]
    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Set the charset label.
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// The quality hint, treating `0` as unspecified.
    ///
    /// Without a hint, a tag such as `720p` in the file name is used.
    pub fn quality(&self) -> Option<u32> {
        self.quality
            .filter(|&quality| quality > 0)
            .or_else(|| quality_from_name(&self.name))
    }

    /// Ranking order: higher score first, then more downloads first.
    ///
    /// Files with equal score and downloads compare as
    /// [`Ordering::Equal`], so a stable sort keeps their input order.
    pub fn rank_cmp(&self, other: &SubtitleFile) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.downloads.cmp(&self.downloads))
    }
}

fn quality_from_name(name: &str) -> Option<u32> {
    QUALITY_PATTERN
        .captures(name)
        .and_then(|captures| captures[1].parse().ok())
        .filter(|&quality| quality > 0)
}

/// Lowercase `name` and drop brackets, parentheses, underscores, dashes
/// and dots.
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '[' | ']' | '(' | ')' | '_' | '-' | '.'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Hints used to pick one file out of a [`SubtitleInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleMatcher {
    /// Preferred file name. Case, brackets, parentheses, underscores,
    /// dashes and dots are ignored when comparing.
    pub name: Option<String>,
    /// Quality of the video being played.
    pub quality: Option<u32>,
}

impl SubtitleMatcher {
    /// A matcher without any hints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefer a file with this name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Prefer files timed for this quality.
    #[must_use]
    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = Some(quality);
        self
    }
}

/// An available subtitle choice for a media item.
///
/// Equality and hashing only consider the media id and the language; the
/// files never take part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleInfo {
    #[serde(default)]
    imdb_id: Option<String>,
    language: Language,
    #[serde(default)]
    files: Vec<SubtitleFile>,
}

impl SubtitleInfo {
    /// The "no subtitle" choice.
    pub const NONE: SubtitleInfo = SubtitleInfo {
        imdb_id: None,
        language: Language::None,
        files: Vec::new(),
    };

    /// Create a choice for the given media id and language.
    pub fn new(imdb_id: Option<&str>, language: Language) -> Self {
        Self {
            imdb_id: imdb_id.map(str::to_string),
            language,
            files: Vec::new(),
        }
    }

    /// The "custom file" choice.
    pub fn custom() -> Self {
        Self::new(None, Language::Custom)
    }

    /// Add a file, builder style.
    #[must_use]
    pub fn with_file(mut self, file: SubtitleFile) -> Self {
        self.files.push(file);
        self
    }

    /// Add a file.
    pub fn add_file(&mut self, file: SubtitleFile) {
        self.files.push(file);
    }

    /// The media id this choice belongs to.
    pub fn imdb_id(&self) -> Option<&str> {
        self.imdb_id.as_deref()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn files(&self) -> &[SubtitleFile] {
        &self.files
    }

    pub(crate) fn files_mut(&mut self) -> &mut Vec<SubtitleFile> {
        &mut self.files
    }

    pub fn is_none(&self) -> bool {
        self.language == Language::None
    }

    pub fn is_custom(&self) -> bool {
        self.language == Language::Custom
    }

    /// Returns `true` for the "none" and "custom" choices.
    pub fn is_special(&self) -> bool {
        self.language.is_special()
    }

    /// The best-ranked file, ignoring any matcher hints.
    pub fn top_file(&self) -> Option<&SubtitleFile> {
        self.files.iter().min_by(|a, b| a.rank_cmp(b))
    }

    /// Pick the file to download for `matcher`.
    ///
    /// A name match wins, ignoring case and punctuation. Otherwise, when the
    /// matcher carries a quality, only files with that quality or without
    /// a quality are considered, unless that leaves nothing. The best-ranked
    /// remaining file is returned.
    ///
    /// # Errors
    ///
    /// [`SubcueError::NoSubtitleFile`] if this choice has no files.
    pub fn best_file(&self, matcher: &SubtitleMatcher) -> Result<&SubtitleFile, SubcueError> {
        if let Some(name) = &matcher.name {
            let wanted = normalize_name(name);
            let by_name = best_ranked(
                self.files
                    .iter()
                    .filter(|file| normalize_name(&file.name) == wanted),
            );

            if let Some(file) = by_name {
                return Ok(file);
            }
        }

        let by_quality = matcher.quality.and_then(|quality| {
            best_ranked(
                self.files
                    .iter()
                    .filter(|file| file.quality().is_none_or(|q| q == quality)),
            )
        });

        by_quality
            .or_else(|| self.top_file())
            .ok_or(SubcueError::NoSubtitleFile {
                language: self.language,
            })
    }
}

fn best_ranked<'a>(files: impl Iterator<Item = &'a SubtitleFile>) -> Option<&'a SubtitleFile> {
    files.min_by(|a, b| a.rank_cmp(b))
}

impl PartialEq for SubtitleInfo {
    fn eq(&self, other: &Self) -> bool {
        self.imdb_id == other.imdb_id && self.language == other.language
    }
}

impl Eq for SubtitleInfo {}

impl Hash for SubtitleInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.imdb_id.hash(state);
        self.language.hash(state);
    }
}

impl PartialOrd for SubtitleInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SubtitleInfo {
    /// Menu order: "none" first, then by language.
    fn cmp(&self, other: &Self) -> Ordering {
        self.language
            .cmp(&other.language)
            .then_with(|| self.imdb_id.cmp(&other.imdb_id))
    }
}

impl Display for SubtitleInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.imdb_id {
            Some(imdb_id) => write!(f, "{} ({imdb_id})", self.language),
            None => write!(f, "{}", self.language),
        }
    }
}
