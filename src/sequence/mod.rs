//! Platform-independent core of the scroll-driven frame player.
//!
//! Nothing in here touches the DOM: the browser glue in `crate::player` feeds
//! measurements and load completions in and reads drawing decisions out, which
//! keeps all of the arithmetic testable on the host.

pub mod cover;
pub mod overlay;
pub mod preload;
pub mod schedule;
pub mod scroll;

use crate::config::SequenceConfig;

use self::overlay::Overlay;
use self::preload::{LoadOutcome, LoadProgress, LoadTracker};
use self::schedule::RedrawScheduler;
use self::scroll::{FrameIndex, ScrollMetrics};

/// Result of feeding one load completion into the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadUpdate {
    pub progress: LoadProgress,
    /// The slot that just loaded is the one the reader is looking at.
    pub is_current: bool,
}

pub struct SequenceState {
    config: SequenceConfig,
    tracker: LoadTracker,
    scheduler: RedrawScheduler,
    fraction: f64,
    current: FrameIndex,
}

impl SequenceState {
    pub fn new(config: SequenceConfig) -> Self {
        let tracker = LoadTracker::new(config.frame_count, config.effective_reveal_threshold());
        Self {
            config,
            tracker,
            scheduler: RedrawScheduler::new(),
            fraction: 0.0,
            current: FrameIndex::default(),
        }
    }

    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    pub fn frame_count(&self) -> usize {
        self.config.frame_count
    }

    pub fn tracker(&self) -> &LoadTracker {
        &self.tracker
    }

    pub fn scheduler_mut(&mut self) -> &mut RedrawScheduler {
        &mut self.scheduler
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn current(&self) -> FrameIndex {
        self.current
    }

    /// Recompute fraction and frame from fresh measurements.
    pub fn update_scroll(&mut self, metrics: ScrollMetrics) -> FrameIndex {
        self.fraction = metrics.fraction();
        self.current = FrameIndex::from_fraction(self.fraction, self.frame_count());
        self.current
    }

    pub fn record_load(&mut self, slot: usize, outcome: LoadOutcome) -> Option<LoadUpdate> {
        let progress = self.tracker.record(slot, outcome)?;
        Some(LoadUpdate {
            progress,
            is_current: outcome == LoadOutcome::Loaded && slot == self.current.slot(),
        })
    }

    /// The current slot, only if its image is available to draw.
    pub fn drawable_slot(&self) -> Option<usize> {
        let slot = self.current.slot();
        self.tracker.is_loaded(slot).then_some(slot)
    }

    pub fn overlay(&self) -> Option<Overlay> {
        Overlay::for_fraction(self.fraction, &self.config.overlay)
    }

    pub fn frame_path(&self, number: usize) -> String {
        self.config.frames.path(number)
    }
}
