//! Loading subtitle files from disk.
//!
//! [`SubtitleLoader`] reads a file, decodes it with the right charset and
//! parses it into a [`SubtitleDocument`]. Players that must never fail on a
//! bad subtitle use [`SubtitleLoader::load_or_none`], which logs the error
//! and returns [`SubtitleDocument::NONE`] instead.
//!
//! # Example
//!
//! ```no_run
//! use subcue::{ParseOptions, SubtitleLoader};
//!
//! let loader = SubtitleLoader::with_options(ParseOptions::new().with_default_encoding("windows-1252"));
//! let document = loader.load_or_none("movie.srt", None);
//! if !document.is_none() {
//!     println!("{} cues", document.len());
//! }
//! ```

use std::path::Path;

use crate::config::ParseOptions;
use crate::document::{SubtitleDocument, SubtitleType};
use crate::error::SubcueError;
use crate::info::{SubtitleInfo, SubtitleMatcher};
use crate::parser::SrtParser;

/// Characters for Windows-1252 bytes 0x80..=0x9F. Unassigned bytes map to
/// the matching C1 control character.
const WINDOWS_1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Charset {
    Utf8,
    /// Byte order from the BOM, big-endian without one.
    Utf16,
    Utf16Le,
    Utf16Be,
    Latin1,
    Windows1252,
}

impl Charset {
    fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();

        match normalized.as_str() {
            "utf8" | "ascii" | "usascii" => Some(Charset::Utf8),
            "utf16" | "ucs2" => Some(Charset::Utf16),
            "utf16le" => Some(Charset::Utf16Le),
            "utf16be" => Some(Charset::Utf16Be),
            "iso88591" | "latin1" | "l1" => Some(Charset::Latin1),
            "windows1252" | "cp1252" => Some(Charset::Windows1252),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Utf16 => "UTF-16",
            Charset::Utf16Le => "UTF-16LE",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Windows1252 => "windows-1252",
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<String, SubcueError> {
        let decode_error = |reason: String| SubcueError::Decode {
            encoding: self.label().to_string(),
            reason,
        };

        match self {
            Charset::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                String::from_utf8(bytes.to_vec()).map_err(|e| decode_error(e.to_string()))
            }
            Charset::Utf16 if bytes.starts_with(b"\xFF\xFE") => Charset::Utf16Le.decode(bytes),
            Charset::Utf16 => Charset::Utf16Be.decode(bytes),
            Charset::Utf16Le | Charset::Utf16Be => {
                if bytes.len() % 2 != 0 {
                    return Err(decode_error(format!("odd byte length {}", bytes.len())));
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| match self {
                        Charset::Utf16Be => u16::from_be_bytes([pair[0], pair[1]]),
                        _ => u16::from_le_bytes([pair[0], pair[1]]),
                    })
                    .collect();
                let units = units.strip_prefix(&[0xFEFF]).unwrap_or(&units);
                String::from_utf16(units).map_err(|e| decode_error(e.to_string()))
            }
            Charset::Latin1 => Ok(bytes.iter().map(|&byte| byte as char).collect()),
            Charset::Windows1252 => Ok(bytes
                .iter()
                .map(|&byte| match byte {
                    0x80..=0x9F => WINDOWS_1252_HIGH[(byte - 0x80) as usize],
                    _ => byte as char,
                })
                .collect()),
        }
    }
}

/// Decode subtitle bytes to text.
///
/// With an explicit `encoding` label (UTF-8, UTF-16, UTF-16LE, UTF-16BE,
/// ISO-8859-1, Windows-1252), the bytes must be valid in that encoding.
/// Without one, a byte order mark selects UTF-8 or UTF-16; otherwise UTF-8
/// is tried first and Windows-1252 is used if the bytes are not valid UTF-8.
///
/// # Errors
///
/// - [`SubcueError::UnsupportedEncoding`] for an unknown label.
/// - [`SubcueError::Decode`] if the bytes are invalid for the encoding.
pub fn decode_text(bytes: &[u8], encoding: Option<&str>) -> Result<String, SubcueError> {
    if let Some(label) = encoding {
        let charset = Charset::from_label(label)
            .ok_or_else(|| SubcueError::UnsupportedEncoding(label.to_string()))?;
        return charset.decode(bytes);
    }

    if bytes.starts_with(b"\xFF\xFE") {
        return Charset::Utf16Le.decode(bytes);
    }
    if bytes.starts_with(b"\xFE\xFF") {
        return Charset::Utf16Be.decode(bytes);
    }

    Charset::Utf8.decode(bytes).or_else(|error| {
        log::warn!("Subtitle is not valid UTF-8 ({error}), decoding as windows-1252");
        Charset::Windows1252.decode(bytes)
    })
}

/// Reads, decodes and parses subtitle files.
#[derive(Debug, Clone, Default)]
pub struct SubtitleLoader {
    options: ParseOptions,
}

impl SubtitleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Decode and parse SRT bytes.
    ///
    /// `encoding` takes precedence over the options' default encoding.
    ///
    /// # Errors
    ///
    /// Decode errors from [`decode_text`] or parse errors from
    /// [`SrtParser::parse`].
    pub fn parse_bytes(
        &self,
        bytes: &[u8],
        encoding: Option<&str>,
    ) -> Result<SubtitleDocument, SubcueError> {
        let encoding = encoding.or(self.options.default_encoding());
        let text = decode_text(bytes, encoding)?;
        let cues = SrtParser::with_options(self.options.clone()).parse(&text)?;
        Ok(SubtitleDocument::new(cues))
    }

    /// Load the subtitle file at `path`.
    ///
    /// When `info` is given, the encoding of its file matching the path's
    /// file name (or its best-ranked file) is used, and the document
    /// records `info` as its provenance. Files without a known extension
    /// are read as SRT.
    ///
    /// # Errors
    ///
    /// - [`SubcueError::UnsupportedFormat`] for WebVTT files.
    /// - [`SubcueError::IoError`] if the file cannot be read.
    /// - Decode and parse errors as for [`parse_bytes`](Self::parse_bytes).
    pub fn load<P: AsRef<Path>>(
        &self,
        path: P,
        info: Option<SubtitleInfo>,
    ) -> Result<SubtitleDocument, SubcueError> {
        let path = path.as_ref();

        match SubtitleType::from_path(path) {
            Some(SubtitleType::Vtt) => return Err(SubcueError::UnsupportedFormat(SubtitleType::Vtt)),
            Some(SubtitleType::Srt) => {}
            None => log::debug!("No subtitle extension on {}, reading as SRT", path.display()),
        }

        let encoding = info.as_ref().and_then(|info| file_encoding(info, path));
        log::debug!(
            "Loading subtitle {} (encoding: {})",
            path.display(),
            encoding.as_deref().unwrap_or("auto")
        );

        let bytes = std::fs::read(path)?;
        let mut document = self
            .parse_bytes(&bytes, encoding.as_deref())?
            .with_source_path(path);
        if let Some(info) = info {
            document = document.with_info(info);
        }

        log::debug!("Loaded {} cue(s) from {}", document.len(), path.display());
        Ok(document)
    }

    /// Like [`load`](Self::load), but any failure is logged and turned into
    /// [`SubtitleDocument::NONE`].
    pub fn load_or_none<P: AsRef<Path>>(
        &self,
        path: P,
        info: Option<SubtitleInfo>,
    ) -> SubtitleDocument {
        let path = path.as_ref();
        match self.load(path, info) {
            Ok(document) => document,
            Err(error) => {
                log::warn!("Failed to load subtitle {}: {error}", path.display());
                SubtitleDocument::NONE
            }
        }
    }
}

fn file_encoding(info: &SubtitleInfo, path: &Path) -> Option<String> {
    let mut matcher = SubtitleMatcher::new();
    if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
        matcher = matcher.with_name(name);
    }

    info.best_file(&matcher)
        .ok()
        .and_then(|file| file.encoding.clone())
}
