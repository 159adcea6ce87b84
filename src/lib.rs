//! Scroll Sequence core crate.
//!
//! Scroll-driven canvas frame player for the portfolio page: preloads an
//! ordered set of still frames, maps the document's scroll position onto one
//! of them and paints it full-viewport with a cover fit plus a darkening
//! overlay. The arithmetic lives in [`sequence`] and runs anywhere; the DOM
//! wiring in `player` only does something useful inside a browser.

use wasm_bindgen::prelude::*;

pub mod config;
mod player;
pub mod sequence;

pub use config::{ConfigError, SequenceConfig};
pub use sequence::SequenceState;
pub use sequence::scroll::{FrameIndex, ScrollMetrics, frame_slot, scroll_fraction};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (e.g. the host already installed a logger) is harmless.
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Start the player with the stock page setup.
#[wasm_bindgen]
pub fn start_sequence() -> Result<(), JsValue> {
    player::start(SequenceConfig::default())
}

/// Start the player with a JSON configuration object; absent fields keep
/// their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_sequence_with_config(json: &str) -> Result<(), JsValue> {
    player::start(SequenceConfig::from_json(json)?)
}

/// Locator of a 1-based frame under the stock naming scheme.
#[wasm_bindgen]
pub fn frame_path(index: usize) -> String {
    SequenceConfig::default().frames.path(index)
}

#[wasm_bindgen]
pub fn frame_count() -> usize {
    SequenceConfig::default().frame_count
}

/// Preload percentage of the running player, or -1 before it has started.
#[wasm_bindgen]
pub fn load_percent() -> i32 {
    player::load_percent().map(|p| p as i32).unwrap_or(-1)
}
