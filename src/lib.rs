//! # subcue
//!
//! Subtitle parsing, selection and playback timing for media players.
//!
//! `subcue` turns SubRip (`.srt`) files into structured, styled cues, picks
//! which subtitle file to download for a media item, answers "which cue is
//! on screen right now" during playback, and keeps the user's typography
//! and timing offset in one observable model.
//!
//! ## Quick Start
//!
//! ### Parse a Subtitle File
//!
//! ```no_run
//! use subcue::SubtitleLoader;
//!
//! let document = SubtitleLoader::new().load("movie.srt", None).unwrap();
//! for cue in document.cues() {
//!     println!("{} --> {}: {}", cue.start_time, cue.end_time, cue.text());
//! }
//! ```
//!
//! ### Follow Playback
//!
//! ```
//! use subcue::{CueUpdate, SubtitleDocument, SubtitleTrack};
//!
//! let document = SubtitleDocument::parse("1\n00:00:01,000 --> 00:00:03,000\nHi\n").unwrap();
//! let mut track = SubtitleTrack::new();
//! track.set_document(document);
//! track.set_offset(0.5);
//!
//! match track.on_time_changed(1_200) {
//!     CueUpdate::Show(cue) => println!("draw {}", cue.text()),
//!     CueUpdate::Clear => println!("clear"),
//!     CueUpdate::Unchanged => {}
//! }
//! ```
//!
//! ### Pick a Default Subtitle
//!
//! ```
//! use subcue::{Language, RealLanguage, SubtitleFile, SubtitleInfo, SubtitleSelector};
//!
//! let candidates = vec![
//!     SubtitleInfo::NONE,
//!     SubtitleInfo::new(Some("tt0111161"), Language::Real(RealLanguage::French))
//!         .with_file(SubtitleFile::new("fr.srt", "https://example.com/fr.srt", 7.5, 120)),
//! ];
//!
//! let selector = SubtitleSelector::new().with_preferred_language(RealLanguage::French);
//! let choices = selector.candidates_for(&candidates, "tt0111161");
//! assert_eq!(
//!     selector.select_default(&choices).language(),
//!     Language::Real(RealLanguage::French)
//! );
//! ```
//!
//! ## Features
//!
//! - **SRT parsing**: index, time range and text lines with `<i>`, `<b>`
//!   and `<u>` markup, in simple or nested mode
//! - **Charset handling**: UTF-8, UTF-16, ISO-8859-1 and Windows-1252 with
//!   automatic fallback
//! - **Cue lookup**: first active cue for a playback time and offset
//! - **Candidate ranking**: files by score and downloads, languages in menu
//!   order, default language selection
//! - **Style model**: font, size, weight, decoration and offset with change
//!   notification
//! - **Validation**: report inverted, overlapping and empty cues
//! - **Export**: write documents back as SRT or WebVTT
//!
//! ### Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `async` | `DocumentFuture` for loading subtitles via Tokio |
//! | `full` | Enables all of the above |

pub mod config;
pub mod document;
pub mod error;
pub mod info;
pub mod language;
pub mod loader;
pub mod lookup;
pub mod parser;
pub mod selection;
#[cfg(feature = "async")]
pub mod stream;
pub mod style;
pub mod validation;

pub use config::{MarkupMode, ParseOptions, SubtitleSettings};
pub use document::{Cue, Line, SubtitleDocument, SubtitleType, TextRun};
pub use error::SubcueError;
pub use info::{SubtitleFile, SubtitleInfo, SubtitleMatcher};
pub use language::{Language, RealLanguage};
pub use loader::{SubtitleLoader, decode_text};
pub use lookup::{CueUpdate, SubtitleTrack, find_active_cue, offset_millis};
pub use parser::{SrtParser, parse_srt};
pub use selection::{SubtitleSelector, filter_for_media, rank_candidates, rank_files};
#[cfg(feature = "async")]
pub use stream::DocumentFuture;
pub use style::{Decoration, FontFamily, Modifiers, StyleChange, StyleListener, SubtitleStyle};
pub use validation::{ValidationReport, validate_document};
