//! Parsing options and user settings.
//!
//! [`ParseOptions`] is a builder that tunes how subtitle text is turned
//! into cues. [`SubtitleSettings`] is the persisted user configuration
//! (typography, preferred language, fallback encoding), read from JSON.
//!
//! # Example
//!
//! ```
//! use subcue::{MarkupMode, ParseOptions, SubtitleSettings};
//!
//! let options = ParseOptions::new()
//!     .with_markup(MarkupMode::Nested)
//!     .with_strict_timing(true);
//! assert!(options.strict_timing());
//!
//! let settings = SubtitleSettings::from_json(r#"{ "font_size": 32, "preferred_language": "fr" }"#)?;
//! assert_eq!(settings.font_size, 32);
//! # Ok::<(), subcue::SubcueError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SubcueError;
use crate::language::Language;
use crate::selection::SubtitleSelector;
use crate::style::{Decoration, FontFamily, SubtitleStyle};

/// How inline style tags in cue text are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupMode {
    /// A line that is entirely wrapped in one `<i>`, `<b>` or `<u>` tag
    /// becomes a single styled run; any other line is kept verbatim as one
    /// plain run. This is the default.
    #[default]
    Simple,
    /// Every `<i>`, `<b>` and `<u>` tag in a line toggles its style, so a
    /// line can produce several runs and nested tags combine their flags.
    /// Other tags are kept as text.
    Nested,
}

/// Options for [`SrtParser`](crate::SrtParser).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub(crate) strict_timing: bool,
    pub(crate) markup: MarkupMode,
    pub(crate) default_encoding: Option<String>,
}

impl ParseOptions {
    /// Defaults: lenient timing, [`MarkupMode::Simple`], no fixed encoding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject cues whose end time lies before their start time.
    ///
    /// Off by default; use [`validate_document`](crate::validate_document)
    /// to report such cues without failing the parse.
    #[must_use]
    pub fn with_strict_timing(mut self, strict: bool) -> Self {
        self.strict_timing = strict;
        self
    }

    /// Choose how inline style tags are read.
    #[must_use]
    pub fn with_markup(mut self, markup: MarkupMode) -> Self {
        self.markup = markup;
        self
    }

    /// Charset used when a subtitle file carries no encoding of its own.
    #[must_use]
    pub fn with_default_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.default_encoding = Some(encoding.into());
        self
    }

    pub fn strict_timing(&self) -> bool {
        self.strict_timing
    }

    pub fn markup(&self) -> MarkupMode {
        self.markup
    }

    pub fn default_encoding(&self) -> Option<&str> {
        self.default_encoding.as_deref()
    }
}

/// Persisted subtitle preferences.
///
/// Every field has a default, so a partial JSON object is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleSettings {
    pub font_family: FontFamily,
    pub font_size: u32,
    pub bold: bool,
    pub decoration: Decoration,
    /// Language selected by default when a media item offers it.
    pub preferred_language: Option<Language>,
    /// Charset used for files without an encoding hint.
    pub default_encoding: Option<String>,
    pub markup: MarkupMode,
}

impl Default for SubtitleSettings {
    fn default() -> Self {
        Self {
            font_family: FontFamily::default(),
            font_size: SubtitleStyle::DEFAULT_FONT_SIZE,
            bold: false,
            decoration: Decoration::default(),
            preferred_language: None,
            default_encoding: None,
            markup: MarkupMode::default(),
        }
    }
}

impl SubtitleSettings {
    /// Read settings from JSON text.
    ///
    /// # Errors
    ///
    /// [`SubcueError::Settings`] if the JSON is malformed or holds an
    /// unknown value.
    pub fn from_json(json: &str) -> Result<Self, SubcueError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file.
    ///
    /// # Errors
    ///
    /// [`SubcueError::IoError`] if the file cannot be read, or
    /// [`SubcueError::Settings`] if its content is invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SubcueError> {
        let path = path.as_ref();
        log::debug!("Loading subtitle settings from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`SubcueError::Settings`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SubcueError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A style model initialised from these settings, with a zero offset.
    pub fn style(&self) -> SubtitleStyle {
        SubtitleStyle::new()
            .with_font_family(self.font_family)
            .with_font_size(self.font_size)
            .with_bold(self.bold)
            .with_decoration(self.decoration)
    }

    /// A selector preferring [`preferred_language`](Self::preferred_language).
    pub fn selector(&self) -> SubtitleSelector {
        match self.preferred_language {
            Some(language) => SubtitleSelector::new().with_preferred_language(language),
            None => SubtitleSelector::new(),
        }
    }

    /// Parse options carrying the markup mode and fallback encoding.
    pub fn parse_options(&self) -> ParseOptions {
        let options = ParseOptions::new().with_markup(self.markup);
        match &self.default_encoding {
            Some(encoding) => options.with_default_encoding(encoding.clone()),
            None => options,
        }
    }
}
