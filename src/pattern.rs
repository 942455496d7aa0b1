//! Pattern cache: the off-screen tile canvas and its repeating fill pattern.
//!
//! Owns one tile-sized canvas plus the [`NoiseTile`] buffer that backs it.
//! `refresh` is the only expensive operation; callers invoke it on the
//! cadence decided by [`crate::grain::GrainCore`], while the cached
//! [`CanvasPattern`] is reused for every in-between repaint.

use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasPattern, CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData};

use crate::error::FxError;
use crate::grain::{GrainConfig, NoiseTile};

/// Acquire a 2d context or fail with a clearly identified error.
///
/// # Errors
///
/// Returns [`FxError::ContextUnavailable`] if the platform has no 2d canvas
/// context. Callers must treat this as fatal at mount time.
pub(crate) fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, FxError> {
    canvas
        .get_context("2d")
        .map_err(FxError::from)?
        .ok_or(FxError::ContextUnavailable)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| FxError::ContextUnavailable)
}

/// Reusable fill pattern backed by an off-screen noise tile.
pub struct PatternCache {
    tile_canvas: HtmlCanvasElement,
    tile_ctx: CanvasRenderingContext2d,
    tile: NoiseTile,
    current: Option<CanvasPattern>,
}

impl PatternCache {
    /// Allocate the off-screen tile canvas.
    ///
    /// # Errors
    ///
    /// Fails if the canvas element cannot be created or has no 2d context.
    pub fn new(document: &Document, config: &GrainConfig) -> Result<Self, FxError> {
        let tile_canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FxError::Dom("created element is not a canvas".into()))?;
        tile_canvas.set_width(config.pattern_size);
        tile_canvas.set_height(config.pattern_size);
        let tile_ctx = context_2d(&tile_canvas)?;

        Ok(Self {
            tile_canvas,
            tile_ctx,
            tile: NoiseTile::new(config.pattern_size, config.pattern_alpha),
            current: None,
        })
    }

    /// Regenerate the tile and rebuild the repeating pattern for `target`.
    ///
    /// # Errors
    ///
    /// Fails if the tile pixels cannot be committed or the pattern cannot be
    /// created.
    pub fn refresh(
        &mut self,
        target: &CanvasRenderingContext2d,
        rng: impl FnMut() -> f64,
    ) -> Result<(), FxError> {
        self.tile.fill(rng);

        let size = self.tile.size();
        let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(self.tile.data()), size, size)?;
        self.tile_ctx.put_image_data(&image, 0.0, 0.0)?;

        let pattern = target
            .create_pattern_with_html_canvas_element(&self.tile_canvas, "repeat")?
            .ok_or_else(|| FxError::Dom("createPattern returned null".into()))?;
        self.current = Some(pattern);
        Ok(())
    }

    /// The most recently built pattern, if any refresh has happened yet.
    #[must_use]
    pub fn current(&self) -> Option<&CanvasPattern> {
        self.current.as_ref()
    }
}
