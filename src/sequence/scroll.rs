//! Scroll position -> frame mapping.

/// Raw document measurements taken on each scroll / resize event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self { scroll_top, scroll_height, viewport_height }
    }

    /// Document height minus viewport height; may be <= 0 on short pages.
    pub fn max_scroll(&self) -> f64 {
        self.scroll_height - self.viewport_height
    }

    pub fn fraction(&self) -> f64 {
        scroll_fraction(self.scroll_top, self.max_scroll())
    }
}

/// `scroll_top / max_scroll` clamped to [0, 1]. A page that cannot scroll (or
/// garbage input) sits at 0 instead of producing NaN / infinity.
pub fn scroll_fraction(scroll_top: f64, max_scroll: f64) -> f64 {
    if !scroll_top.is_finite() || !max_scroll.is_finite() || max_scroll <= 0.0 {
        return 0.0;
    }
    (scroll_top / max_scroll).clamp(0.0, 1.0)
}

/// 0-based slot into the frame list: `min(total - 1, ceil(fraction * total))`.
///
/// The ceiling means any scroll past zero already skips frame 1, and the last
/// frame is only selected at (or within one step of) the very bottom.
pub fn frame_slot(fraction: f64, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let f = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    let raw = (f * total as f64).ceil() as usize;
    raw.min(total - 1)
}

/// A frame position, valid for the sequence it was computed against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameIndex(usize);

impl FrameIndex {
    pub fn from_fraction(fraction: f64, total: usize) -> Self {
        FrameIndex(frame_slot(fraction, total))
    }

    pub fn from_metrics(metrics: &ScrollMetrics, total: usize) -> Self {
        Self::from_fraction(metrics.fraction(), total)
    }

    /// Position in the image list, in [0, N-1].
    pub fn slot(self) -> usize {
        self.0
    }

    /// 1-based frame number used in file names, in [1, N].
    pub fn number(self) -> usize {
        self.0 + 1
    }
}
