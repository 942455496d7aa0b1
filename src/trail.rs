//! Cursor trail core: delay line + exponential smoothing + idle detection.
//!
//! All state that does not touch the DOM lives here, so the controller logic
//! can be driven in tests with synthetic pointer events, a simulated clock,
//! and synthetic visibility ratios. The browser glue in [`crate::cursor`]
//! feeds it real events and presents the resulting [`TrailFrame`]s.

#[cfg(test)]
#[path = "trail_test.rs"]
mod trail_test;

use crate::consts::{
    EASING, FOCUS_RATIO_THRESHOLD, IDLE_TIMEOUT_MS, TRAIL_SIZE_IDLE_PX, TRAIL_SIZE_MOVING_PX,
};
use crate::history::{Point, PointerHistory};

/// Restartable idle window, held as a deadline value instead of a live timer.
///
/// Each pointer move re-arms the window (debounce, not throttle); the flag is
/// only ever read at frame time, so polling the deadline is equivalent to a
/// timer firing between frames and leaves nothing to cancel on unmount.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleGate {
    deadline_ms: Option<f64>,
}

impl IdleGate {
    /// Restart the idle window: the pointer counts as moving until
    /// `now + IDLE_TIMEOUT_MS`.
    pub fn poke(&mut self, now_ms: f64) {
        self.deadline_ms = Some(now_ms + IDLE_TIMEOUT_MS);
    }

    /// Whether the pointer still counts as moving at `now`.
    #[must_use]
    pub fn active(&self, now_ms: f64) -> bool {
        self.deadline_ms.is_some_and(|deadline| now_ms < deadline)
    }
}

/// One frame's worth of indicator output: position and diameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailFrame {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Per-frame state machine for the trailing cursor indicator.
///
/// Combines a hard delay (the [`PointerHistory`] FIFO) with a soft lag
/// (first-order exponential smoothing toward the delayed sample), plus the
/// idle gate that drives the indicator's size and the focus-visibility flag
/// that gates whether it shows at all.
pub struct TrailCore {
    history: PointerHistory,
    gate: IdleGate,
    position: Point,
    focus_visible: bool,
}

impl Default for TrailCore {
    fn default() -> Self {
        Self {
            history: PointerHistory::new(),
            gate: IdleGate::default(),
            // Smoothing starts from the origin, exactly once, on first show.
            position: Point::new(0.0, 0.0),
            // Hidden until the visibility observer reports in; if the focus
            // region is missing the observer never fires and this stays false.
            focus_visible: false,
        }
    }
}

impl TrailCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw pointer move: push into the delay line and restart the
    /// idle window.
    pub fn on_pointer_move(&mut self, sample: Point, now_ms: f64) {
        self.history.push(sample);
        self.gate.poke(now_ms);
    }

    /// Feed the focus region's current intersection ratio. Visibility is a
    /// hard threshold with no intermediate state.
    pub fn set_focus_ratio(&mut self, ratio: f64) {
        self.focus_visible = ratio >= FOCUS_RATIO_THRESHOLD;
    }

    /// Whether the focus region is currently visible enough to show the
    /// indicator.
    #[must_use]
    pub fn focus_visible(&self) -> bool {
        self.focus_visible
    }

    /// Whether the pointer counts as moving at `now`.
    #[must_use]
    pub fn is_moving(&self, now_ms: f64) -> bool {
        self.gate.active(now_ms)
    }

    /// Advance the smoothing filter by one frame.
    ///
    /// Returns `None` until the pointer has actually moved and the focus
    /// region is visible; the glue keeps the loop running regardless so
    /// visibility changes take effect on the very next frame.
    pub fn frame(&mut self, now_ms: f64) -> Option<TrailFrame> {
        if !self.history.has_real_sample() || !self.focus_visible {
            return None;
        }

        let target = self.history.oldest();
        self.position.x += (target.x - self.position.x) * EASING;
        self.position.y += (target.y - self.position.y) * EASING;

        let size = if self.gate.active(now_ms) { TRAIL_SIZE_MOVING_PX } else { TRAIL_SIZE_IDLE_PX };

        Some(TrailFrame { x: self.position.x, y: self.position.y, size })
    }

    /// Last rendered position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }
}
