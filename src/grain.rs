//! Grain overlay core: noise tile generation and the refresh cadence.
//!
//! Everything in this module is pure in-memory state so it can be tested
//! without a browser. Randomness is injected as a closure: the overlay glue
//! passes `js_sys::Math::random` and tests pass a seeded generator.

#[cfg(test)]
#[path = "grain_test.rs"]
mod grain_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    PATTERN_ALPHA, PATTERN_REFRESH_INTERVAL, PATTERN_SCALE_X, PATTERN_SCALE_Y, PATTERN_SIZE,
};
use crate::error::FxError;

/// Tunable parameters for the grain overlay.
///
/// Field names serialize in camelCase so the host page can pass the same
/// options object it would hand to any other component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrainConfig {
    /// Edge length of the square noise tile, in pixels.
    pub pattern_size: u32,
    /// Horizontal context scale for the overlay canvas.
    pub pattern_scale_x: f64,
    /// Vertical context scale for the overlay canvas.
    pub pattern_scale_y: f64,
    /// Frames between tile regenerations.
    pub pattern_refresh_interval: u64,
    /// Constant alpha for every grain pixel (0–255).
    pub pattern_alpha: u8,
}

impl Default for GrainConfig {
    fn default() -> Self {
        Self {
            pattern_size: PATTERN_SIZE,
            pattern_scale_x: PATTERN_SCALE_X,
            pattern_scale_y: PATTERN_SCALE_Y,
            pattern_refresh_interval: PATTERN_REFRESH_INTERVAL,
            pattern_alpha: PATTERN_ALPHA,
        }
    }
}

impl GrainConfig {
    /// Parse a JSON options object. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Config`] if the string is not a valid options object.
    pub fn from_json(json: &str) -> Result<Self, FxError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A square RGBA buffer of independent random grayscale speckles.
///
/// The buffer is allocated once and refilled wholesale on each refresh; one
/// refresh cycle is the full lifetime of its contents.
pub struct NoiseTile {
    size: u32,
    alpha: u8,
    data: Vec<u8>,
}

impl NoiseTile {
    #[must_use]
    pub fn new(size: u32, alpha: u8) -> Self {
        let len = size as usize * size as usize * 4;
        Self { size, alpha, data: vec![0; len] }
    }

    /// Refill every pixel with an independently drawn grayscale value.
    ///
    /// `rng` yields uniform values in `[0, 1)`. The three color channels get
    /// the same draw; alpha stays constant.
    pub fn fill(&mut self, mut rng: impl FnMut() -> f64) {
        for px in self.data.chunks_exact_mut(4) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let value = (rng() * 255.0) as u8;
            px[0] = value;
            px[1] = value;
            px[2] = value;
            px[3] = self.alpha;
        }
    }

    /// Tile edge length in pixels.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Raw RGBA bytes, row-major, `size × size × 4` long.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Frame counter driving the tile refresh cadence.
///
/// The refresh rate is deliberately coupled to the render loop's frame
/// counter rather than a wall clock, so the visual cadence tracks the
/// display refresh rate exactly like the original effect.
pub struct GrainCore {
    frame: u64,
    refresh_interval: u64,
}

impl GrainCore {
    /// A zero interval would refresh never; clamp it to every frame instead.
    #[must_use]
    pub fn new(refresh_interval: u64) -> Self {
        Self { frame: 0, refresh_interval: refresh_interval.max(1) }
    }

    /// Advance by one frame. Returns whether this frame must regenerate the
    /// tile (frames 0, N, 2N, … for interval N).
    pub fn advance(&mut self) -> bool {
        let refresh = self.frame % self.refresh_interval == 0;
        self.frame += 1;
        refresh
    }

    /// Frames advanced so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Device-pixel dimensions for the overlay surface: CSS size × device pixel
/// ratio. Recomputed on every resize event.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn surface_size(css_w: f64, css_h: f64, dpr: f64) -> (u32, u32) {
    ((css_w * dpr).max(0.0) as u32, (css_h * dpr).max(0.0) as u32)
}
