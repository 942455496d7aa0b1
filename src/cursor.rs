//! Cursor trail controller: browser glue around [`TrailCore`].
//!
//! Wires three inputs — window `mousemove` events, the focus region's
//! intersection ratio, and the frame clock — into the core, and presents
//! each [`TrailFrame`] onto the indicator element's style. The indicator is
//! a fixed-position disk the host composites with `mix-blend-mode:
//! exclusion`; it must never intercept pointer events meant for the page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{
    CssStyleDeclaration, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent,
};

use crate::consts::{DEFAULT_FOCUS_REGION_ID, FOCUS_RATIO_THRESHOLD, TRAIL_SIZE_TRANSITION};
use crate::error::FxError;
use crate::history::Point;
use crate::schedule::FrameLoop;
use crate::trail::{TrailCore, TrailFrame};

type ObserverCallback = Closure<dyn FnMut(js_sys::Array)>;

/// Running cursor trail. Obtained from [`CursorTrail::mount`]; call
/// [`CursorTrail::stop`] to unmount.
#[wasm_bindgen]
pub struct CursorTrail {
    core: Rc<RefCell<TrailCore>>,
    frames: FrameLoop,
    mousemove: Option<Closure<dyn FnMut(MouseEvent)>>,
    observer: Option<IntersectionObserver>,
    observer_callback: Option<ObserverCallback>,
}

#[wasm_bindgen]
impl CursorTrail {
    /// Mount the trail onto `indicator`, gated by the visibility of the
    /// element with id `focus_id` (default `first-panel`).
    ///
    /// # Errors
    ///
    /// Fails outside a browser or if listeners cannot be registered. A
    /// missing focus element is NOT an error: the indicator simply stays
    /// hidden.
    pub fn mount(indicator: HtmlElement, focus_id: Option<String>) -> Result<CursorTrail, wasm_bindgen::JsValue> {
        let focus_id = focus_id.unwrap_or_else(|| DEFAULT_FOCUS_REGION_ID.to_owned());
        Ok(Self::mount_on(&indicator, &focus_id)?)
    }

    /// Stop the loop, remove the mousemove listener, and disconnect the
    /// visibility observer. All deregistration is synchronous. Idempotent.
    pub fn stop(&mut self) {
        self.frames.stop();
        if let Some(callback) = self.mousemove.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback(
                    "mousemove",
                    callback.as_ref().unchecked_ref(),
                );
            }
        }
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.observer_callback.take();
        log::info!("cursor trail stopped");
    }
}

impl CursorTrail {
    /// Mount with an explicit focus region id.
    ///
    /// # Errors
    ///
    /// Fails if the window, document, or performance clock is unavailable,
    /// or if a listener cannot be registered.
    pub fn mount_on(indicator: &HtmlElement, focus_id: &str) -> Result<Self, FxError> {
        let window = web_sys::window().ok_or(FxError::NoWindow)?;
        let document = window.document().ok_or(FxError::NoDocument)?;
        let performance = window
            .performance()
            .ok_or_else(|| FxError::Dom("performance clock unavailable".into()))?;

        let core = Rc::new(RefCell::new(TrailCore::new()));

        // Size transitions animate in CSS; position updates are discrete.
        let style = indicator.style();
        style.set_property("transition", TRAIL_SIZE_TRANSITION)?;
        style.set_property("pointer-events", "none")?;
        present(&style, false, None);

        let mousemove: Closure<dyn FnMut(MouseEvent)> = {
            let core = Rc::clone(&core);
            let performance = performance.clone();
            Closure::new(move |event: MouseEvent| {
                let sample = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
                core.borrow_mut().on_pointer_move(sample, performance.now());
            })
        };
        window.add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;

        let (observer, observer_callback) = match document.get_element_by_id(focus_id) {
            Some(region) => {
                let callback = Self::observe_focus(&core);
                let init = IntersectionObserverInit::new();
                init.set_threshold(&wasm_bindgen::JsValue::from_f64(FOCUS_RATIO_THRESHOLD));
                let observer =
                    IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
                observer.observe(&region);
                (Some(observer), Some(callback))
            }
            None => {
                log::warn!("focus region #{focus_id} not found; cursor trail stays hidden");
                (None, None)
            }
        };

        let frames = {
            let core = Rc::clone(&core);
            let style = style.clone();
            FrameLoop::start(move || {
                let mut core = core.borrow_mut();
                let visible = core.focus_visible();
                let frame = core.frame(performance.now());
                present(&style, visible, frame.as_ref());
            })?
        };

        log::info!("cursor trail mounted, gated on #{focus_id}");
        Ok(Self { core, frames, mousemove: Some(mousemove), observer, observer_callback })
    }

    /// Whether the focus region is currently visible enough to show the
    /// indicator.
    #[must_use]
    pub fn focus_visible(&self) -> bool {
        self.core.borrow().focus_visible()
    }

    fn observe_focus(core: &Rc<RefCell<TrailCore>>) -> ObserverCallback {
        let core = Rc::clone(core);
        Closure::new(move |entries: js_sys::Array| {
            if let Ok(entry) = entries.get(0).dyn_into::<IntersectionObserverEntry>() {
                core.borrow_mut().set_focus_ratio(entry.intersection_ratio());
            }
        })
    }
}

/// Apply one frame's output to the indicator element. Visibility toggles
/// opacity only; the loop itself never pauses, so a visibility change shows
/// up on the next frame.
fn present(style: &CssStyleDeclaration, visible: bool, frame: Option<&TrailFrame>) {
    let _ = style.set_property("opacity", if visible { "1" } else { "0" });
    let _ = style.set_property("visibility", if visible { "visible" } else { "hidden" });
    if let Some(frame) = frame {
        let _ = style.set_property(
            "transform",
            &format!("translate3d({}px, {}px, 0) translate(-50%, -50%)", frame.x, frame.y),
        );
        let _ = style.set_property("width", &format!("{}px", frame.size));
        let _ = style.set_property("height", &format!("{}px", frame.size));
    }
}
