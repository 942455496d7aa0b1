//! Ambient visual effects for the emotion-scroll site.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns
//! the two continuous, per-frame effects layered over the page: a
//! full-viewport film-grain overlay and a smoothed, delayed cursor-trail
//! indicator. Both drive their own animation-frame loops, read live input
//! (time, pointer position, focus-region visibility), and mutate rendered
//! output every frame. The host page keeps everything declarative — panel
//! composition, enter/exit presets, audio — and only calls `mount`/`stop`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`grain`] | Noise tile generation, refresh cadence, surface sizing |
//! | [`history`] | Fixed-length pointer delay line |
//! | [`trail`] | Cursor trail core: smoothing, idle gate, visibility |
//! | [`pattern`] | Off-screen tile canvas and repeating fill pattern |
//! | [`overlay`] | Grain overlay renderer and its resize handling |
//! | [`cursor`] | Cursor trail controller: DOM events and presentation |
//! | [`schedule`] | Cancellable `requestAnimationFrame` loop |
//! | [`error`] | Mount-time error taxonomy |
//! | [`consts`] | Shared numeric constants (sizes, cadences, thresholds) |

pub mod consts;
pub mod cursor;
pub mod error;
pub mod grain;
pub mod history;
pub mod overlay;
pub mod pattern;
pub mod schedule;
pub mod trail;

pub use cursor::CursorTrail;
pub use error::FxError;
pub use grain::GrainConfig;
pub use overlay::GrainOverlay;

use wasm_bindgen::prelude::wasm_bindgen;

/// Module initialization: route panics and `log` records to the console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
