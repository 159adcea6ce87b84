// Integration tests (native) for the `scroll-sequence` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic so
// they can run under `cargo test` on the host.

use scroll_sequence::sequence::preload::LoadOutcome;
use scroll_sequence::{ScrollMetrics, SequenceConfig, SequenceState};

// Stock naming scheme: percent-encoded folder, zero-padded 3-digit index.
#[test]
fn exported_frame_path_matches_naming_scheme() {
    assert_eq!(scroll_sequence::frame_path(1), "Sequence%20images/ezgif-frame-001.jpg");
    assert_eq!(scroll_sequence::frame_path(240), "Sequence%20images/ezgif-frame-240.jpg");
    assert_eq!(scroll_sequence::frame_count(), 240);
}

// No player has been started on the host.
#[test]
fn load_percent_is_negative_before_start() {
    assert_eq!(scroll_sequence::load_percent(), -1);
}

#[test]
fn half_scroll_selects_slot_120_and_draws_it_once_loaded() {
    let mut state = SequenceState::new(SequenceConfig::default());
    // 4000px document, 1000px viewport -> 3000px of travel
    let idx = state.update_scroll(ScrollMetrics::new(1500.0, 4000.0, 1000.0));
    assert_eq!(idx.slot(), 120);
    assert_eq!(idx.number(), 121);
    assert_eq!(state.drawable_slot(), None);

    let update = state.record_load(120, LoadOutcome::Loaded).unwrap();
    assert!(update.is_current);
    assert_eq!(state.drawable_slot(), Some(120));
}

#[test]
fn top_and_bottom_of_page() {
    let mut state = SequenceState::new(SequenceConfig::default());
    assert_eq!(state.update_scroll(ScrollMetrics::new(0.0, 4000.0, 1000.0)).number(), 1);
    assert_eq!(state.update_scroll(ScrollMetrics::new(3000.0, 4000.0, 1000.0)).number(), 240);
    // rubber-band overscroll past the bottom
    assert_eq!(state.update_scroll(ScrollMetrics::new(3300.0, 4000.0, 1000.0)).number(), 240);
}

#[test]
fn frame_57_failure_still_completes_preload() {
    let mut state = SequenceState::new(SequenceConfig::default());
    let mut reveals = 0;
    let mut last = None;
    for slot in 0..240 {
        let outcome = if slot == 56 { LoadOutcome::Failed } else { LoadOutcome::Loaded };
        let update = state.record_load(slot, outcome).unwrap();
        if update.progress.reveal {
            reveals += 1;
        }
        last = Some(update.progress);
    }
    let last = last.unwrap();
    assert_eq!(reveals, 1);
    assert!(last.finished);
    assert_eq!(last.completed, 240);
    assert_eq!(last.percent, 100);
    assert_eq!(state.tracker().failed(), 1);

    // park the reader on frame 57 (slot 56): nothing to draw, forever
    let metrics = ScrollMetrics::new(693.75, 4000.0, 1000.0);
    assert_eq!(state.update_scroll(metrics).number(), 57);
    assert_eq!(state.drawable_slot(), None);
    assert!(state.record_load(56, LoadOutcome::Loaded).is_none());
    assert_eq!(state.drawable_slot(), None);
}

#[test]
fn burst_of_scroll_events_yields_one_redraw() {
    let mut state = SequenceState::new(SequenceConfig::default());
    let mut callbacks = 0;
    for top in (0..3000).step_by(50) {
        state.update_scroll(ScrollMetrics::new(top as f64, 4000.0, 1000.0));
        if state.scheduler_mut().request() {
            callbacks += 1;
        }
    }
    assert_eq!(callbacks, 1);
    assert!(state.scheduler_mut().take());
}
