//! Cancellable `requestAnimationFrame` loop.
//!
//! Wraps the browser's frame-callback recursion behind an owned handle with
//! an explicit `stop()`. The cancellation flag is checked before every tick
//! and before every reschedule, and the pending frame id is cancelled
//! synchronously on stop, so a stopped loop can never fire again against a
//! detached visual target.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::error::FxError;

type FrameClosure = Closure<dyn FnMut()>;

/// A running per-frame loop. Dropping the handle stops the loop.
pub struct FrameLoop {
    cancelled: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    // The closure holds an Rc back to this slot so it can reschedule itself;
    // `stop()` takes it out to break the cycle.
    closure: Rc<RefCell<Option<FrameClosure>>>,
}

impl FrameLoop {
    /// Start invoking `tick` once per animation frame until [`stop`] is
    /// called.
    ///
    /// # Errors
    ///
    /// Returns an error outside a browser or if the first frame cannot be
    /// scheduled.
    ///
    /// [`stop`]: FrameLoop::stop
    pub fn start(mut tick: impl FnMut() + 'static) -> Result<Self, FxError> {
        let window = web_sys::window().ok_or(FxError::NoWindow)?;

        let cancelled = Rc::new(Cell::new(false));
        let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let closure: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));

        {
            let slot = Rc::clone(&closure);
            let cancelled = Rc::clone(&cancelled);
            let raf_id = Rc::clone(&raf_id);
            let closure = Rc::clone(&closure);
            let window = window.clone();
            *slot.borrow_mut() = Some(Closure::new(move || {
                if cancelled.get() {
                    return;
                }
                tick();
                if cancelled.get() {
                    return;
                }
                let slot = closure.borrow();
                let Some(callback) = slot.as_ref() else { return };
                match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(id) => raf_id.set(Some(id)),
                    Err(err) => {
                        log::error!("failed to reschedule frame callback: {err:?}");
                        cancelled.set(true);
                    }
                }
            }));
        }

        {
            let slot = closure.borrow();
            let callback = slot
                .as_ref()
                .ok_or_else(|| FxError::Dom("frame closure missing".into()))?;
            let id = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
            raf_id.set(Some(id));
        }

        Ok(Self { cancelled, raf_id, closure })
    }

    /// Synchronously cancel the loop: revoke the flag, cancel any pending
    /// frame, and release the callback. Idempotent. Must not be called from
    /// inside the tick itself.
    pub fn stop(&self) {
        self.cancelled.set(true);
        if let Some(id) = self.raf_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.closure.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
