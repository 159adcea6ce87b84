//! Load accounting for the frame set.
//!
//! Every slot resolves exactly once, either way. Failures count toward completion
//! so the preloader overlay can never hang on a single bad file.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Pending,
    Loaded,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

/// Snapshot returned for each accepted completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
    /// True on exactly one completion: the one that reaches the reveal threshold.
    pub reveal: bool,
    /// True on the completion that resolves the last pending slot.
    pub finished: bool,
}

pub struct LoadTracker {
    slots: Vec<SlotState>,
    completed: usize,
    failed: usize,
    reveal_at: usize,
}

impl LoadTracker {
    pub fn new(total: usize, reveal_threshold: usize) -> Self {
        Self {
            slots: vec![SlotState::Pending; total],
            completed: 0,
            failed: 0,
            reveal_at: reveal_threshold.clamp(1, total.max(1)),
        }
    }

    /// `None` for an unknown slot or one that already resolved.
    pub fn record(&mut self, slot: usize, outcome: LoadOutcome) -> Option<LoadProgress> {
        let state = self.slots.get_mut(slot)?;
        if *state != SlotState::Pending {
            return None;
        }
        *state = match outcome {
            LoadOutcome::Loaded => SlotState::Loaded,
            LoadOutcome::Failed => {
                self.failed += 1;
                SlotState::Failed
            }
        };
        self.completed += 1;
        Some(LoadProgress {
            completed: self.completed,
            total: self.total(),
            percent: self.percent(),
            reveal: self.completed == self.reveal_at,
            finished: self.completed == self.total(),
        })
    }

    pub fn total(&self) -> usize {
        self.slots.len()
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn loaded(&self) -> usize {
        self.completed - self.failed
    }

    /// floor(completed / total * 100), computed in integers.
    pub fn percent(&self) -> u32 {
        if self.slots.is_empty() {
            return 100;
        }
        (self.completed * 100 / self.slots.len()) as u32
    }

    pub fn state(&self, slot: usize) -> Option<SlotState> {
        self.slots.get(slot).copied()
    }

    pub fn is_loaded(&self, slot: usize) -> bool {
        self.state(slot) == Some(SlotState::Loaded)
    }
}
