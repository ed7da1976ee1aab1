//! Subtitle languages.
//!
//! [`Language`] separates the two sentinel choices a user can pick in a
//! subtitle menu ([`Language::None`] and [`Language::Custom`]) from actual
//! spoken languages ([`RealLanguage`]), so a sentinel can never be mistaken
//! for a real language when matching preferences.
//!
//! # Example
//!
//! ```
//! use subcue::{Language, RealLanguage};
//!
//! let language: Language = "pt-br".parse().unwrap();
//! assert_eq!(language, Language::Real(RealLanguage::BrazilianPortuguese));
//! assert!(!language.is_special());
//! assert!(Language::None.is_special());
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SubcueError;

/// A real subtitle language.
///
/// Declaration order is the display order of subtitle menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RealLanguage {
    Arabic,
    Bulgarian,
    Czech,
    Danish,
    German,
    Greek,
    English,
    Spanish,
    Estonian,
    Persian,
    Finnish,
    French,
    Hebrew,
    Croatian,
    Hungarian,
    Indonesian,
    Italian,
    Japanese,
    Korean,
    Lithuanian,
    Dutch,
    Norwegian,
    Polish,
    Portuguese,
    BrazilianPortuguese,
    Romanian,
    Russian,
    Slovak,
    Slovenian,
    Serbian,
    Swedish,
    Thai,
    Turkish,
    Ukrainian,
    Vietnamese,
    Chinese,
}

impl RealLanguage {
    /// Every real language, in declaration order.
    pub const ALL: [RealLanguage; 36] = [
        RealLanguage::Arabic,
        RealLanguage::Bulgarian,
        RealLanguage::Czech,
        RealLanguage::Danish,
        RealLanguage::German,
        RealLanguage::Greek,
        RealLanguage::English,
        RealLanguage::Spanish,
        RealLanguage::Estonian,
        RealLanguage::Persian,
        RealLanguage::Finnish,
        RealLanguage::French,
        RealLanguage::Hebrew,
        RealLanguage::Croatian,
        RealLanguage::Hungarian,
        RealLanguage::Indonesian,
        RealLanguage::Italian,
        RealLanguage::Japanese,
        RealLanguage::Korean,
        RealLanguage::Lithuanian,
        RealLanguage::Dutch,
        RealLanguage::Norwegian,
        RealLanguage::Polish,
        RealLanguage::Portuguese,
        RealLanguage::BrazilianPortuguese,
        RealLanguage::Romanian,
        RealLanguage::Russian,
        RealLanguage::Slovak,
        RealLanguage::Slovenian,
        RealLanguage::Serbian,
        RealLanguage::Swedish,
        RealLanguage::Thai,
        RealLanguage::Turkish,
        RealLanguage::Ukrainian,
        RealLanguage::Vietnamese,
        RealLanguage::Chinese,
    ];

    /// The language code used by subtitle providers.
    pub fn code(self) -> &'static str {
        match self {
            RealLanguage::Arabic => "ar",
            RealLanguage::Bulgarian => "bg",
            RealLanguage::Czech => "cs",
            RealLanguage::Danish => "da",
            RealLanguage::German => "de",
            RealLanguage::Greek => "el",
            RealLanguage::English => "en",
            RealLanguage::Spanish => "es",
            RealLanguage::Estonian => "et",
            RealLanguage::Persian => "fa",
            RealLanguage::Finnish => "fi",
            RealLanguage::French => "fr",
            RealLanguage::Hebrew => "he",
            RealLanguage::Croatian => "hr",
            RealLanguage::Hungarian => "hu",
            RealLanguage::Indonesian => "id",
            RealLanguage::Italian => "it",
            RealLanguage::Japanese => "ja",
            RealLanguage::Korean => "ko",
            RealLanguage::Lithuanian => "lt",
            RealLanguage::Dutch => "nl",
            RealLanguage::Norwegian => "no",
            RealLanguage::Polish => "pl",
            RealLanguage::Portuguese => "pt",
            RealLanguage::BrazilianPortuguese => "pt-br",
            RealLanguage::Romanian => "ro",
            RealLanguage::Russian => "ru",
            RealLanguage::Slovak => "sk",
            RealLanguage::Slovenian => "sl",
            RealLanguage::Serbian => "sr",
            RealLanguage::Swedish => "sv",
            RealLanguage::Thai => "th",
            RealLanguage::Turkish => "tr",
            RealLanguage::Ukrainian => "uk",
            RealLanguage::Vietnamese => "vi",
            RealLanguage::Chinese => "zh",
        }
    }

    /// English display name.
    pub fn name(self) -> &'static str {
        match self {
            RealLanguage::Arabic => "Arabic",
            RealLanguage::Bulgarian => "Bulgarian",
            RealLanguage::Czech => "Czech",
            RealLanguage::Danish => "Danish",
            RealLanguage::German => "German",
            RealLanguage::Greek => "Greek",
            RealLanguage::English => "English",
            RealLanguage::Spanish => "Spanish",
            RealLanguage::Estonian => "Estonian",
            RealLanguage::Persian => "Persian",
            RealLanguage::Finnish => "Finnish",
            RealLanguage::French => "French",
            RealLanguage::Hebrew => "Hebrew",
            RealLanguage::Croatian => "Croatian",
            RealLanguage::Hungarian => "Hungarian",
            RealLanguage::Indonesian => "Indonesian",
            RealLanguage::Italian => "Italian",
            RealLanguage::Japanese => "Japanese",
            RealLanguage::Korean => "Korean",
            RealLanguage::Lithuanian => "Lithuanian",
            RealLanguage::Dutch => "Dutch",
            RealLanguage::Norwegian => "Norwegian",
            RealLanguage::Polish => "Polish",
            RealLanguage::Portuguese => "Portuguese",
            RealLanguage::BrazilianPortuguese => "Portuguese (Brazil)",
            RealLanguage::Romanian => "Romanian",
            RealLanguage::Russian => "Russian",
            RealLanguage::Slovak => "Slovak",
            RealLanguage::Slovenian => "Slovenian",
            RealLanguage::Serbian => "Serbian",
            RealLanguage::Swedish => "Swedish",
            RealLanguage::Thai => "Thai",
            RealLanguage::Turkish => "Turkish",
            RealLanguage::Ukrainian => "Ukrainian",
            RealLanguage::Vietnamese => "Vietnamese",
            RealLanguage::Chinese => "Chinese",
        }
    }
}

impl Display for RealLanguage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.code())
    }
}

impl FromStr for RealLanguage {
    type Err = SubcueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        // Some providers report Brazilian Portuguese as "pb".
        let code = match value.trim().to_ascii_lowercase().as_str() {
            "pb" => "pt-br".to_string(),
            other => other.to_string(),
        };

        RealLanguage::ALL
            .into_iter()
            .find(|language| language.code() == code)
            .ok_or_else(|| SubcueError::unknown("language", value))
    }
}

/// The language of a subtitle choice.
///
/// Ordered `None < Custom < Real(..)`, so the "no subtitle" choice always
/// sorts first in a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    /// Subtitles disabled.
    None,
    /// A subtitle file picked by the user from disk.
    Custom,
    /// A real language.
    Real(RealLanguage),
}

impl Language {
    /// Returns `true` for the sentinel choices [`Language::None`] and
    /// [`Language::Custom`].
    pub fn is_special(self) -> bool {
        matches!(self, Language::None | Language::Custom)
    }

    /// The code of this language (`"none"`, `"custom"`, or the real code).
    pub fn code(self) -> &'static str {
        match self {
            Language::None => "none",
            Language::Custom => "custom",
            Language::Real(language) => language.code(),
        }
    }

    /// The real language, if this is not a sentinel.
    pub fn real(self) -> Option<RealLanguage> {
        match self {
            Language::Real(language) => Some(language),
            _ => None,
        }
    }
}

impl From<RealLanguage> for Language {
    fn from(language: RealLanguage) -> Self {
        Language::Real(language)
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = SubcueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Language::None),
            "custom" => Ok(Language::Custom),
            _ => value.parse().map(Language::Real),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = SubcueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}
