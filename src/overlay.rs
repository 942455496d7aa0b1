//! Grain overlay renderer: sizes the full-viewport canvas, tracks resize,
//! and repaints the cached noise pattern every animation frame.
//!
//! Lifecycle is Stopped → Running → Stopped: `mount` acquires the context
//! (failing fast if the platform has no 2d canvas), starts the frame loop,
//! and hands back a handle whose `stop` tears everything down synchronously.
//!
//! The host page owns the `<canvas>` element and its compositing style
//! (fixed, full-viewport, `mix-blend-mode: overlay`, `pointer-events: none`);
//! this module only ever draws into it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::error::FxError;
use crate::grain::{GrainConfig, GrainCore, surface_size};
use crate::pattern::{PatternCache, context_2d};
use crate::schedule::FrameLoop;

struct OverlayState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    core: GrainCore,
    cache: PatternCache,
    config: GrainConfig,
}

/// Running grain overlay. Obtained from [`GrainOverlay::mount`]; call
/// [`GrainOverlay::stop`] to unmount.
#[wasm_bindgen]
pub struct GrainOverlay {
    state: Rc<RefCell<OverlayState>>,
    frames: FrameLoop,
    resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl GrainOverlay {
    /// Mount the overlay onto `canvas`. `options` is an optional JSON object
    /// (`patternSize`, `patternScaleX`, `patternScaleY`,
    /// `patternRefreshInterval`, `patternAlpha`); missing fields keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Fails if the options do not parse or the canvas has no 2d context.
    pub fn mount(canvas: HtmlCanvasElement, options: Option<String>) -> Result<GrainOverlay, wasm_bindgen::JsValue> {
        let config = match options {
            Some(json) => GrainConfig::from_json(&json)?,
            None => GrainConfig::default(),
        };
        Ok(Self::mount_with_config(canvas, config)?)
    }

    /// Stop the loop and drop the resize listener. Idempotent.
    pub fn stop(&mut self) {
        self.frames.stop();
        if let Some(callback) = self.resize.take() {
            if let Some(window) = web_sys::window() {
                let _ = window
                    .remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref());
            }
        }
        log::info!("grain overlay stopped");
    }
}

impl GrainOverlay {
    /// Mount with an already-built [`GrainConfig`].
    ///
    /// # Errors
    ///
    /// Fails fast, before any frame is scheduled, if the window or document
    /// is missing or a 2d context cannot be acquired.
    pub fn mount_with_config(
        canvas: HtmlCanvasElement,
        config: GrainConfig,
    ) -> Result<Self, FxError> {
        let window = web_sys::window().ok_or(FxError::NoWindow)?;
        let document = window.document().ok_or(FxError::NoDocument)?;

        let ctx = context_2d(&canvas)?;
        let cache = PatternCache::new(&document, &config)?;
        let state = Rc::new(RefCell::new(OverlayState {
            canvas,
            ctx,
            core: GrainCore::new(config.pattern_refresh_interval),
            cache,
            config,
        }));

        apply_surface_size(&window, &state.borrow())?;

        let resize: Closure<dyn FnMut()> = {
            let window = window.clone();
            let state = Rc::clone(&state);
            Closure::new(move || {
                if let Err(err) = apply_surface_size(&window, &state.borrow()) {
                    log::error!("overlay resize failed: {err}");
                }
            })
        };
        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;

        let frames = {
            let state = Rc::clone(&state);
            FrameLoop::start(move || {
                if let Err(err) = render_frame(&mut state.borrow_mut()) {
                    log::error!("grain frame skipped: {err}");
                }
            })?
        };

        log::info!(
            "grain overlay mounted: tile {}px, scale {}x{}, refresh every {} frames",
            config.pattern_size,
            config.pattern_scale_x,
            config.pattern_scale_y,
            config.pattern_refresh_interval,
        );
        Ok(Self { state, frames, resize: Some(resize) })
    }

    /// Frames rendered so far. Mainly useful for the host's debug HUD.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.state.borrow().core.frame()
    }
}

/// Size the backing store to `window × devicePixelRatio` and reapply the
/// pattern scale. Setting width/height resets the context transform, so the
/// scale must follow every resize.
fn apply_surface_size(window: &Window, state: &OverlayState) -> Result<(), FxError> {
    let css_w = window.inner_width()?.as_f64().unwrap_or(0.0);
    let css_h = window.inner_height()?.as_f64().unwrap_or(0.0);
    let (w, h) = surface_size(css_w, css_h, window.device_pixel_ratio());

    state.canvas.set_width(w);
    state.canvas.set_height(h);
    state.ctx.scale(state.config.pattern_scale_x, state.config.pattern_scale_y)?;
    Ok(())
}

/// One frame: refresh the pattern on schedule, then always clear and refill
/// the whole surface. Off-schedule frames repaint the same pattern, which is
/// what produces the flicker cadence.
fn render_frame(state: &mut OverlayState) -> Result<(), FxError> {
    let OverlayState { canvas, ctx, core, cache, .. } = state;

    if core.advance() {
        cache.refresh(ctx, js_sys::Math::random)?;
    }

    let w = f64::from(canvas.width());
    let h = f64::from(canvas.height());
    ctx.clear_rect(0.0, 0.0, w, h);
    if let Some(pattern) = cache.current() {
        ctx.set_fill_style_canvas_pattern(pattern);
        ctx.fill_rect(0.0, 0.0, w, h);
    }
    Ok(())
}
