//! Active cue lookup during playback.
//!
//! [`find_active_cue`] answers "which cue is on screen at this time" for a
//! document and offset. [`SubtitleTrack`] wraps that in the state a
//! renderer needs: it remembers the cue currently shown and reports
//! through [`CueUpdate`] only when something has to be redrawn.
//!
//! # Example
//!
//! ```
//! use subcue::{CueUpdate, SubtitleDocument, SubtitleTrack};
//!
//! let document = SubtitleDocument::parse("1\n00:00:01,000 --> 00:00:02,000\nHello\n")?;
//! let mut track = SubtitleTrack::new();
//! track.set_document(document);
//!
//! assert!(matches!(track.on_time_changed(1_500), CueUpdate::Show(cue) if cue.text() == "Hello"));
//! assert!(matches!(track.on_time_changed(1_600), CueUpdate::Unchanged));
//! assert!(matches!(track.on_time_changed(2_500), CueUpdate::Clear));
//! # Ok::<(), subcue::SubcueError>(())
//! ```

use crate::document::{Cue, SubtitleDocument};

/// Convert an offset in seconds to whole milliseconds.
pub fn offset_millis(offset_seconds: f64) -> i64 {
    (offset_seconds * 1000.0).round() as i64
}

/// The first cue of `document`, in document order, that is on screen at
/// `current_time` (milliseconds) once shifted by `offset_seconds`.
///
/// Always `None` for [`SubtitleDocument::NONE`].
pub fn find_active_cue(
    document: &SubtitleDocument,
    current_time: u64,
    offset_seconds: f64,
) -> Option<&Cue> {
    find_active_index(document, current_time, offset_seconds).map(|index| &document.cues()[index])
}

fn find_active_index(
    document: &SubtitleDocument,
    current_time: u64,
    offset_seconds: f64,
) -> Option<usize> {
    if document.is_none() {
        return None;
    }

    let time = current_time as i64;
    let offset = offset_millis(offset_seconds);
    document
        .cues()
        .iter()
        .position(|cue| cue.is_active_at(time, offset))
}

/// What a renderer has to do after a playback time update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueUpdate<'a> {
    /// A different cue became active; draw it.
    Show(&'a Cue),
    /// The previously shown cue is no longer active; draw nothing.
    Clear,
    /// Keep whatever is currently drawn.
    Unchanged,
}

/// The subtitle track of a player: one document, one offset, and the cue
/// currently on screen.
///
/// Time updates must be delivered sequentially.
#[derive(Debug, Clone)]
pub struct SubtitleTrack {
    document: SubtitleDocument,
    offset_seconds: f64,
    active: Option<usize>,
}

impl Default for SubtitleTrack {
    fn default() -> Self {
        Self::new()
    }
}

impl SubtitleTrack {
    /// A track showing [`SubtitleDocument::NONE`] with a zero offset.
    pub fn new() -> Self {
        Self {
            document: SubtitleDocument::NONE,
            offset_seconds: 0.0,
            active: None,
        }
    }

    /// Replace the document. The active cue is forgotten; the next time
    /// update decides what to show.
    pub fn set_document(&mut self, document: SubtitleDocument) {
        log::debug!(
            "Subtitle track switched to document with {} cue(s)",
            document.len()
        );
        self.document = document;
        self.active = None;
    }

    pub fn document(&self) -> &SubtitleDocument {
        &self.document
    }

    /// Store a new offset in seconds.
    ///
    /// The active cue is not re-evaluated until the next
    /// [`on_time_changed`](Self::on_time_changed).
    pub fn set_offset(&mut self, offset_seconds: f64) {
        self.offset_seconds = offset_seconds;
    }

    pub fn offset(&self) -> f64 {
        self.offset_seconds
    }

    /// The cue currently on screen.
    pub fn active_cue(&self) -> Option<&Cue> {
        self.active.map(|index| &self.document.cues()[index])
    }

    /// Re-evaluate the active cue for a new playback time in milliseconds.
    pub fn on_time_changed(&mut self, current_time: u64) -> CueUpdate<'_> {
        let found = find_active_index(&self.document, current_time, self.offset_seconds);

        match (found, self.active) {
            (Some(index), Some(active)) if index == active => CueUpdate::Unchanged,
            (Some(index), _) => {
                self.active = Some(index);
                let cue = &self.document.cues()[index];
                log::trace!("Showing subtitle {} at {} ms", cue.id, current_time);
                CueUpdate::Show(cue)
            }
            (None, Some(_)) => {
                log::trace!("Clearing subtitle at {} ms", current_time);
                self.active = None;
                CueUpdate::Clear
            }
            (None, None) => CueUpdate::Unchanged,
        }
    }

    /// Drop the document and the active cue.
    ///
    /// Returns `true` if a cue was on screen and has to be cleared.
    pub fn clear(&mut self) -> bool {
        self.document = SubtitleDocument::NONE;
        self.active.take().is_some()
    }
}
