//! Active cue lookup and subtitle track tests.

use subcue::{Cue, CueUpdate, Line, SubtitleDocument, SubtitleTrack, TextRun, find_active_cue, offset_millis};

fn cue(id: &str, start_time: u64, end_time: u64) -> Cue {
    Cue {
        id: id.to_string(),
        start_time,
        end_time,
        lines: vec![Line::new(vec![TextRun::plain(format!("cue {id}"))])],
    }
}

fn single_cue_document() -> SubtitleDocument {
    SubtitleDocument::new(vec![cue("1", 1000, 2000)])
}

fn shown_id(update: CueUpdate<'_>) -> Option<String> {
    match update {
        CueUpdate::Show(cue) => Some(cue.id.clone()),
        _ => None,
    }
}

// ── find_active_cue ──────────────────────────────────────────────

#[test]
fn lookup_bounds_are_inclusive() {
    let document = single_cue_document();

    assert!(find_active_cue(&document, 1000, 0.0).is_some());
    assert!(find_active_cue(&document, 2000, 0.0).is_some());
    assert!(find_active_cue(&document, 999, 0.0).is_none());
    assert!(find_active_cue(&document, 2001, 0.0).is_none());
}

#[test]
fn lookup_positive_offset_delays_cue() {
    let document = single_cue_document();

    assert!(find_active_cue(&document, 2000, 1.0).is_some());
    assert!(find_active_cue(&document, 3000, 1.0).is_some());
    assert!(find_active_cue(&document, 1999, 1.0).is_none());
}

#[test]
fn lookup_negative_offset_advances_cue() {
    let document = single_cue_document();

    assert!(find_active_cue(&document, 500, -0.5).is_some());
    assert!(find_active_cue(&document, 1501, -0.5).is_none());
}

#[test]
fn lookup_first_match_wins() {
    let document = SubtitleDocument::new(vec![cue("A", 0, 5000), cue("B", 100, 4000)]);
    let found = find_active_cue(&document, 200, 0.0).expect("A cue should be active");
    assert_eq!(found.id, "A");
}

#[test]
fn lookup_none_document_never_matches() {
    for time in [0, 1000, u64::from(u32::MAX)] {
        for offset in [-10.0, 0.0, 10.0] {
            assert!(find_active_cue(&SubtitleDocument::NONE, time, offset).is_none());
        }
    }
}

#[test]
fn lookup_empty_document() {
    let document = SubtitleDocument::new(Vec::new());
    assert!(!document.is_none());
    assert!(find_active_cue(&document, 0, 0.0).is_none());
}

#[test]
fn offset_millis_rounds() {
    assert_eq!(offset_millis(1.0), 1000);
    assert_eq!(offset_millis(0.1), 100);
    assert_eq!(offset_millis(-0.3), -300);
    assert_eq!(offset_millis(0.0004), 0);
}

// ── SubtitleTrack ────────────────────────────────────────────────

#[test]
fn track_starts_empty() {
    let mut track = SubtitleTrack::new();
    assert!(track.document().is_none());
    assert!(track.active_cue().is_none());
    assert_eq!(track.on_time_changed(1000), CueUpdate::Unchanged);
}

#[test]
fn track_shows_then_keeps_then_clears() {
    let mut track = SubtitleTrack::new();
    track.set_document(single_cue_document());

    assert_eq!(track.on_time_changed(500), CueUpdate::Unchanged);
    assert_eq!(shown_id(track.on_time_changed(1000)), Some("1".to_string()));
    assert_eq!(track.on_time_changed(1500), CueUpdate::Unchanged);
    assert_eq!(track.active_cue().map(|cue| cue.id.as_str()), Some("1"));
    assert_eq!(track.on_time_changed(2500), CueUpdate::Clear);
    assert_eq!(track.on_time_changed(3000), CueUpdate::Unchanged);
    assert!(track.active_cue().is_none());
}

#[test]
fn track_switches_between_adjacent_cues() {
    let mut track = SubtitleTrack::new();
    track.set_document(SubtitleDocument::new(vec![cue("1", 0, 1000), cue("2", 1001, 2000)]));

    assert_eq!(shown_id(track.on_time_changed(500)), Some("1".to_string()));
    assert_eq!(shown_id(track.on_time_changed(1500)), Some("2".to_string()));
}

#[test]
fn track_offset_applies_on_next_time_update() {
    let mut track = SubtitleTrack::new();
    track.set_document(single_cue_document());
    assert!(matches!(track.on_time_changed(1500), CueUpdate::Show(_)));

    track.set_offset(5.0);
    assert_eq!(track.offset(), 5.0);
    assert!(track.active_cue().is_some(), "Offset alone should not re-evaluate");

    assert_eq!(track.on_time_changed(1600), CueUpdate::Clear);
    assert!(matches!(track.on_time_changed(6500), CueUpdate::Show(_)));
}

#[test]
fn track_set_document_resets_active_cue() {
    let mut track = SubtitleTrack::new();
    track.set_document(single_cue_document());
    assert!(matches!(track.on_time_changed(1500), CueUpdate::Show(_)));

    track.set_document(single_cue_document());
    assert!(track.active_cue().is_none());
    assert!(matches!(track.on_time_changed(1500), CueUpdate::Show(_)));
}

#[test]
fn track_clear_reports_visible_cue() {
    let mut track = SubtitleTrack::new();
    track.set_document(single_cue_document());
    assert!(!track.clear(), "Nothing was shown yet");

    track.set_document(single_cue_document());
    track.on_time_changed(1200);
    assert!(track.clear());
    assert!(track.document().is_none());
    assert_eq!(track.on_time_changed(1200), CueUpdate::Unchanged);
}
