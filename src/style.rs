//! Subtitle typography and change notification.
//!
//! [`SubtitleStyle`] holds the settings applied to every rendered cue: font
//! family, size, weight, box decoration, and the user's timing offset.
//! Renderers register a [`StyleListener`] and receive a [`StyleChange`]
//! for every setter call that actually changes a value.
//!
//! # Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use subcue::{FontFamily, Modifiers, StyleChange, StyleListener, SubtitleStyle};
//!
//! struct Recorder(Mutex<Vec<StyleChange>>);
//!
//! impl StyleListener for Recorder {
//!     fn on_style_changed(&self, change: &StyleChange) {
//!         self.0.lock().unwrap().push(change.clone());
//!     }
//! }
//!
//! let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
//! let mut style = SubtitleStyle::new();
//! style.subscribe(recorder.clone());
//!
//! style.set_font_family(FontFamily::Verdana);
//! style.increase_offset(Modifiers::SHIFT);
//!
//! assert_eq!(style.offset_seconds(), 1.0);
//! assert_eq!(recorder.0.lock().unwrap().len(), 2);
//! ```

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::SubcueError;

/// Fonts offered for subtitle rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FontFamily {
    #[default]
    Arial,
    ComicSans,
    Georgia,
    Tahoma,
    TrebuchetMs,
    Verdana,
}

impl FontFamily {
    pub const ALL: [FontFamily; 6] = [
        FontFamily::Arial,
        FontFamily::ComicSans,
        FontFamily::Georgia,
        FontFamily::Tahoma,
        FontFamily::TrebuchetMs,
        FontFamily::Verdana,
    ];

    /// The family name as understood by font lookup.
    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::ComicSans => "Comic Sans",
            FontFamily::Georgia => "Georgia",
            FontFamily::Tahoma => "Tahoma",
            FontFamily::TrebuchetMs => "Trebuchet MS",
            FontFamily::Verdana => "Verdana",
        }
    }
}

impl Display for FontFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl FromStr for FontFamily {
    type Err = SubcueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FontFamily::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| SubcueError::unknown("font family", value))
    }
}

impl TryFrom<String> for FontFamily {
    type Error = SubcueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FontFamily> for String {
    fn from(family: FontFamily) -> Self {
        family.name().to_string()
    }
}

/// Box decoration drawn around cue lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoration {
    None,
    #[default]
    Outline,
    OpaqueBackground,
    SeeThroughBackground,
}

impl FromStr for Decoration {
    type Err = SubcueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "none" => Ok(Decoration::None),
            "outline" => Ok(Decoration::Outline),
            "opaque_background" | "opaque" => Ok(Decoration::OpaqueBackground),
            "see_through_background" | "see_through" => Ok(Decoration::SeeThroughBackground),
            _ => Err(SubcueError::unknown("decoration", value)),
        }
    }
}

/// Modifier keys held while nudging the subtitle offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub control: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        control: false,
        shift: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        control: false,
        shift: true,
    };
    pub const CONTROL: Modifiers = Modifiers {
        control: true,
        shift: false,
    };
    pub const BOTH: Modifiers = Modifiers {
        control: true,
        shift: true,
    };

    /// Offset increment in seconds: 0.1 by default, 1.0 with shift,
    /// 5.0 with control, 10.0 with both.
    pub fn offset_step(self) -> f64 {
        match (self.control, self.shift) {
            (true, true) => 10.0,
            (true, false) => 5.0,
            (false, true) => 1.0,
            (false, false) => 0.1,
        }
    }
}

/// A single style mutation, carrying the new value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleChange {
    FontFamily(FontFamily),
    FontSize(u32),
    Bold(bool),
    Decoration(Decoration),
    /// New offset in seconds.
    Offset(f64),
}

/// Receives style mutations.
///
/// Implementations must be [`Send`] and [`Sync`] so a style can be shared
/// with a render thread.
pub trait StyleListener: Send + Sync {
    fn on_style_changed(&self, change: &StyleChange);
}

/// Rendering configuration shared by all cues of a track.
#[derive(Clone)]
pub struct SubtitleStyle {
    font_family: FontFamily,
    font_size: u32,
    bold: bool,
    decoration: Decoration,
    offset_seconds: f64,
    listeners: Vec<Arc<dyn StyleListener>>,
}

impl Debug for SubtitleStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SubtitleStyle")
            .field("font_family", &self.font_family)
            .field("font_size", &self.font_size)
            .field("bold", &self.bold)
            .field("decoration", &self.decoration)
            .field("offset_seconds", &self.offset_seconds)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl SubtitleStyle {
    /// Font size used when nothing is configured.
    pub const DEFAULT_FONT_SIZE: u32 = 24;

    /// Defaults: Arial, 24 pt, regular weight, outlined, no offset.
    pub fn new() -> Self {
        Self {
            font_family: FontFamily::Arial,
            font_size: Self::DEFAULT_FONT_SIZE,
            bold: false,
            decoration: Decoration::Outline,
            offset_seconds: 0.0,
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_font_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    #[must_use]
    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    #[must_use]
    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decoration = decoration;
        self
    }

    /// Register a listener for all later mutations.
    pub fn subscribe(&mut self, listener: Arc<dyn StyleListener>) {
        self.listeners.push(listener);
    }

    pub fn font_family(&self) -> FontFamily {
        self.font_family
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn decoration(&self) -> Decoration {
        self.decoration
    }

    /// Offset in seconds. Positive values delay subtitles.
    pub fn offset_seconds(&self) -> f64 {
        self.offset_seconds
    }

    pub fn set_font_family(&mut self, family: FontFamily) {
        if self.font_family != family {
            self.font_family = family;
            self.broadcast(StyleChange::FontFamily(family));
        }
    }

    pub fn set_font_size(&mut self, size: u32) {
        if self.font_size != size {
            self.font_size = size;
            self.broadcast(StyleChange::FontSize(size));
        }
    }

    pub fn set_bold(&mut self, bold: bool) {
        if self.bold != bold {
            self.bold = bold;
            self.broadcast(StyleChange::Bold(bold));
        }
    }

    pub fn set_decoration(&mut self, decoration: Decoration) {
        if self.decoration != decoration {
            self.decoration = decoration;
            self.broadcast(StyleChange::Decoration(decoration));
        }
    }

    /// Set the offset, rounded to whole milliseconds.
    ///
    /// This does not re-evaluate the active cue; the next playback time
    /// update picks up the new offset.
    pub fn set_offset_seconds(&mut self, offset: f64) {
        let offset = round_to_millis(offset);
        if self.offset_seconds != offset {
            self.offset_seconds = offset;
            self.broadcast(StyleChange::Offset(offset));
        }
    }

    /// Delay subtitles by one step for the held modifiers.
    pub fn increase_offset(&mut self, modifiers: Modifiers) {
        self.set_offset_seconds(self.offset_seconds + modifiers.offset_step());
    }

    /// Advance subtitles by one step for the held modifiers.
    pub fn decrease_offset(&mut self, modifiers: Modifiers) {
        self.set_offset_seconds(self.offset_seconds - modifiers.offset_step());
    }

    fn broadcast(&self, change: StyleChange) {
        log::trace!(
            "Broadcasting {:?} to {} listener(s)",
            change,
            self.listeners.len()
        );
        for listener in &self.listeners {
            listener.on_style_changed(&change);
        }
    }
}

fn round_to_millis(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}
