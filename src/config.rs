//! Player configuration.
//!
//! `SequenceConfig::default()` reproduces the page's stock setup: 240 JPEG frames
//! under `Sequence images/`, reveal after 30 completed loads, and the slate
//! darkening overlay that kicks in past 20% scroll. Hosts that need different
//! assets or element ids pass a JSON object to `start_sequence_with_config`;
//! any field left out keeps its default.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Errors produced while building or validating a [`SequenceConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroFrameCount,
    ZeroPadWidth,
    InvalidOverlay(&'static str),
    #[cfg(feature = "serde_json")]
    Json(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroFrameCount => write!(f, "frame_count must be at least 1"),
            ConfigError::ZeroPadWidth => write!(f, "pad_width must be at least 1"),
            ConfigError::InvalidOverlay(field) => {
                write!(f, "overlay.{field} must be a finite, non-negative number")
            }
            #[cfg(feature = "serde_json")]
            ConfigError::Json(msg) => write!(f, "invalid sequence config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for wasm_bindgen::JsValue {
    fn from(err: ConfigError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

/// Where frames live and how they are named.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FrameSource {
    /// Already percent-encoded; prepended verbatim.
    pub prefix: String,
    pub extension: String,
    pub pad_width: usize,
}

impl Default for FrameSource {
    fn default() -> Self {
        Self {
            prefix: "Sequence%20images/ezgif-frame-".to_string(),
            extension: "jpg".to_string(),
            pad_width: 3,
        }
    }
}

impl FrameSource {
    /// Resource locator for a 1-based frame number, e.g. `...-frame-007.jpg`.
    pub fn path(&self, number: usize) -> String {
        format!(
            "{}{:0width$}.{}",
            self.prefix,
            number,
            self.extension,
            width = self.pad_width
        )
    }
}

/// Darkening / blur post-process drawn over the frame once the reader has
/// scrolled past `threshold`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayConfig {
    pub threshold: f64,
    pub opacity_slope: f64,
    pub max_opacity: f64,
    pub blur_slope: f64,
    pub max_blur_px: f64,
    pub color: (u8, u8, u8),
    /// Canvas-level blur is expensive; off unless the host opts in.
    pub canvas_blur: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            opacity_slope: 2.0,
            max_opacity: 0.6,
            blur_slope: 20.0,
            max_blur_px: 5.0,
            color: (38, 38, 38),
            canvas_blur: false,
        }
    }
}

/// Ids / selectors of the page collaborators. Only the canvas is mandatory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageIds {
    pub canvas: String,
    pub preloader: String,
    pub load_progress: String,
    pub percent_label: String,
    pub hero_selector: String,
    pub hero_active_class: String,
    pub scroll_progress_selector: String,
}

impl Default for PageIds {
    fn default() -> Self {
        Self {
            canvas: "scroll-sequence".to_string(),
            preloader: "preloader".to_string(),
            load_progress: "load-progress".to_string(),
            percent_label: "percent".to_string(),
            hero_selector: ".hero-section".to_string(),
            hero_active_class: "active".to_string(),
            scroll_progress_selector: ".scroll-progress-bar".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SequenceConfig {
    pub frame_count: usize,
    pub frames: FrameSource,
    /// Completed loads (success or failure) needed before the preloader fades.
    pub reveal_threshold: usize,
    pub fade_delay_ms: i32,
    pub removal_delay_ms: i32,
    pub overlay: OverlayConfig,
    pub page: PageIds,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            frame_count: 240,
            frames: FrameSource::default(),
            reveal_threshold: 30,
            fade_delay_ms: 500,
            removal_delay_ms: 800,
            overlay: OverlayConfig::default(),
            page: PageIds::default(),
        }
    }
}

impl SequenceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_count == 0 {
            return Err(ConfigError::ZeroFrameCount);
        }
        if self.frames.pad_width == 0 {
            return Err(ConfigError::ZeroPadWidth);
        }
        let o = &self.overlay;
        let numbers = [
            ("threshold", o.threshold),
            ("opacity_slope", o.opacity_slope),
            ("max_opacity", o.max_opacity),
            ("blur_slope", o.blur_slope),
            ("max_blur_px", o.max_blur_px),
        ];
        for (field, value) in numbers {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidOverlay(field));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON object; absent fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: SequenceConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Never exceeds the frame count, so short sequences still reveal.
    pub fn effective_reveal_threshold(&self) -> usize {
        self.reveal_threshold.clamp(1, self.frame_count.max(1))
    }
}
