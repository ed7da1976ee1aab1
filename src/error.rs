//! Error types for the `subcue` crate.
//!
//! This module defines [`SubcueError`], the unified error type returned by all
//! fallible operations in the crate. Errors carry enough context to report
//! the problem to a user, including the offending line number for parse
//! failures and the encoding label for decode failures.

use std::io::Error as IoError;

use serde_json::Error as JsonError;
use thiserror::Error;

use crate::document::SubtitleType;
use crate::language::Language;

/// The unified error type for all `subcue` operations.
///
/// Every public method that can fail returns `Result<T, SubcueError>`.
/// None of these errors is meant to be fatal to a player: callers are
/// expected to fall back to [`SubtitleDocument::NONE`](crate::SubtitleDocument::NONE)
/// and keep playing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubcueError {
    /// The subtitle text is malformed.
    #[error("Failed to parse subtitle at line {line_number}: {reason}")]
    Parse {
        /// 1-based line number of the offending line.
        line_number: usize,
        /// Human-readable description of what was wrong.
        reason: String,
    },

    /// The subtitle type is recognised but cannot be parsed.
    #[error("Unsupported subtitle format: {0}")]
    UnsupportedFormat(SubtitleType),

    /// The requested text encoding is not known.
    #[error("Unsupported text encoding: {0}")]
    UnsupportedEncoding(String),

    /// The subtitle bytes are not valid in the requested encoding.
    #[error("Failed to decode subtitle as {encoding}: {reason}")]
    Decode {
        /// Encoding label that was used.
        encoding: String,
        /// Underlying reason the decode failed.
        reason: String,
    },

    /// A subtitle info has no file that can be downloaded.
    #[error("No subtitle file available for language {language}")]
    NoSubtitleFile {
        /// Language of the info that was searched.
        language: Language,
    },

    /// A string could not be converted into one of the crate's enums.
    #[error("Unknown {kind}: {value:?}")]
    UnknownValue {
        /// What was being parsed (e.g. "language").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// Settings or candidate JSON could not be read.
    #[error("Invalid settings: {0}")]
    Settings(#[from] JsonError),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// A background load was dropped before it completed.
    #[error("Operation cancelled")]
    Cancelled,
}

impl SubcueError {
    pub(crate) fn parse(line_number: usize, reason: impl Into<String>) -> Self {
        SubcueError::Parse {
            line_number,
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        SubcueError::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}
