//! Redraw coalescing between animation frames.

/// Coalesces redraw requests: however many scroll / resize / load events land
/// between two paints, only one animation-frame callback gets registered.
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    pending: bool,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the caller must register a callback for the next paint.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    /// Called from the paint callback. False means nothing was requested.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
