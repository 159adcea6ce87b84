//! Scroll-dependent darkening drawn on top of the frame.

use crate::config::OverlayConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlay {
    pub opacity: f64,
    pub blur_px: f64,
    pub color: (u8, u8, u8),
}

impl Overlay {
    /// Nothing to draw at or below the threshold; above it both opacity and blur
    /// grow linearly with the excess fraction up to their caps.
    pub fn for_fraction(fraction: f64, cfg: &OverlayConfig) -> Option<Self> {
        if !fraction.is_finite() || fraction <= cfg.threshold {
            return None;
        }
        let excess = fraction - cfg.threshold;
        Some(Self {
            opacity: (excess * cfg.opacity_slope).min(cfg.max_opacity),
            blur_px: (excess * cfg.blur_slope).min(cfg.max_blur_px),
            color: cfg.color,
        })
    }

    pub fn fill_style(&self) -> String {
        let (r, g, b) = self.color;
        format!("rgba({}, {}, {}, {})", r, g, b, self.opacity)
    }

    pub fn filter(&self) -> String {
        format!("blur({}px)", self.blur_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_threshold_is_clear() {
        let cfg = OverlayConfig::default();
        assert_eq!(Overlay::for_fraction(0.0, &cfg), None);
        assert_eq!(Overlay::for_fraction(0.2, &cfg), None);
    }

    #[test]
    fn ramps_then_caps() {
        let cfg = OverlayConfig::default();
        let o = Overlay::for_fraction(0.3, &cfg).unwrap();
        assert!((o.opacity - 0.2).abs() < 1e-9);
        assert!((o.blur_px - 2.0).abs() < 1e-9);

        let o = Overlay::for_fraction(1.0, &cfg).unwrap();
        assert_eq!(o.opacity, 0.6);
        assert_eq!(o.blur_px, 5.0);
    }

    #[test]
    fn css_strings() {
        let o = Overlay { opacity: 0.5, blur_px: 3.0, color: (38, 38, 38) };
        assert_eq!(o.fill_style(), "rgba(38, 38, 38, 0.5)");
        assert_eq!(o.filter(), "blur(3px)");
    }
}
