//! "Cover" fit: scale the frame to fill the surface, crop the overflow evenly.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    pub scale: f64,
    /// Destination origin; never positive on either axis.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CoverFit {
    /// `None` when any dimension is zero, negative or non-finite (an image
    /// that has not decoded yet reports 0x0).
    pub fn compute(surface_w: f64, surface_h: f64, image_w: f64, image_h: f64) -> Option<Self> {
        let dims = [surface_w, surface_h, image_w, image_h];
        if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return None;
        }
        let scale = (surface_w / image_w).max(surface_h / image_h);
        let width = image_w * scale;
        let height = image_h * scale;
        Some(Self {
            scale,
            x: (surface_w - width) / 2.0,
            y: (surface_h - height) / 2.0,
            width,
            height,
        })
    }
}
