//! Subtitle candidate ranking and default selection.
//!
//! Candidates arrive from a provider as a list of [`SubtitleInfo`]s. Before
//! they are shown to the user they are filtered down to the media being
//! played, put in menu order, and each info's files are ranked so the first
//! file is the one that would be downloaded by default.
//!
//! # Example
//!
//! ```
//! use subcue::{Language, RealLanguage, SubtitleInfo, SubtitleSelector};
//!
//! let candidates = vec![
//!     SubtitleInfo::new(Some("tt123"), Language::Real(RealLanguage::English)),
//!     SubtitleInfo::new(Some("tt999"), Language::Real(RealLanguage::French)),
//!     SubtitleInfo::NONE,
//! ];
//!
//! let selector = SubtitleSelector::new().with_preferred_language(RealLanguage::English);
//! let choices = selector.candidates_for(&candidates, "tt123");
//! assert_eq!(choices.len(), 2);
//! assert!(choices[0].is_none());
//!
//! let default = selector.select_default(&choices);
//! assert_eq!(default.language(), Language::Real(RealLanguage::English));
//! ```

use std::cmp::Ordering;

use crate::info::{SubtitleFile, SubtitleInfo};
use crate::language::Language;

/// Sort files best first: higher score, then more downloads.
///
/// The sort is stable, so files that rank equal keep their input order.
pub fn rank_files(files: &mut [SubtitleFile]) {
    files.sort_by(SubtitleFile::rank_cmp);
}

/// Keep only the candidates that belong to `media_id`.
///
/// The "none" choice is always kept.
pub fn filter_for_media(candidates: &[SubtitleInfo], media_id: &str) -> Vec<SubtitleInfo> {
    candidates
        .iter()
        .filter(|info| info.is_none() || info.imdb_id() == Some(media_id))
        .cloned()
        .collect()
}

/// Put candidates in menu order and rank the files of each one.
pub fn rank_candidates(mut candidates: Vec<SubtitleInfo>) -> Vec<SubtitleInfo> {
    candidates.sort();
    for info in &mut candidates {
        rank_files(info.files_mut());
    }
    candidates
}

/// Chooses which subtitle is selected without user interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleSelector {
    preferred_language: Option<Language>,
}

impl SubtitleSelector {
    /// A selector without a preferred language. It always selects
    /// [`SubtitleInfo::NONE`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Select this language by default when it is available.
    #[must_use]
    pub fn with_preferred_language(mut self, language: impl Into<Language>) -> Self {
        self.preferred_language = Some(language.into());
        self
    }

    pub fn preferred_language(&self) -> Option<Language> {
        self.preferred_language
    }

    /// Filter `candidates` to `media_id` and rank them.
    pub fn candidates_for(&self, candidates: &[SubtitleInfo], media_id: &str) -> Vec<SubtitleInfo> {
        let filtered = filter_for_media(candidates, media_id);
        log::debug!(
            "Kept {} of {} subtitle candidates for {}",
            filtered.len(),
            candidates.len(),
            media_id
        );
        rank_candidates(filtered)
    }

    /// The default choice among `candidates`.
    ///
    /// Returns the info in the preferred language whose best file ranks
    /// highest. Falls back to [`SubtitleInfo::NONE`] when no preferred
    /// language is set, when it is not available, or when `candidates`
    /// holds nothing but special choices.
    pub fn select_default(&self, candidates: &[SubtitleInfo]) -> SubtitleInfo {
        let preferred = match self.preferred_language {
            Some(language) if !language.is_special() => language,
            _ => return SubtitleInfo::NONE,
        };

        candidates
            .iter()
            .filter(|info| !info.is_special() && info.language() == preferred)
            .min_by(|a, b| compare_top_files(a, b))
            .cloned()
            .unwrap_or(SubtitleInfo::NONE)
    }
}

/// Order infos by their best file; infos without files rank last.
fn compare_top_files(a: &SubtitleInfo, b: &SubtitleInfo) -> Ordering {
    match (a.top_file(), b.top_file()) {
        (Some(a), Some(b)) => a.rank_cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
