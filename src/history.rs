//! Pointer sample delay line.
//!
//! A fixed-capacity FIFO of recent pointer positions. The front of the queue
//! is the sample pushed [`HISTORY_LENGTH`] pushes ago, which gives the cursor
//! indicator its hard delay before smoothing is applied on top.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::{HISTORY_LENGTH, OFFSCREEN_PX};

/// A pointer position in screen coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The off-screen sentinel the buffer is seeded with.
    #[must_use]
    pub fn offscreen() -> Self {
        Self::new(OFFSCREEN_PX, OFFSCREEN_PX)
    }
}

/// Fixed-length FIFO of the most recent pointer samples, oldest first.
///
/// Seeded with the off-screen sentinel so consumers start pointed off-canvas.
/// After construction the length never changes: every push evicts the oldest
/// sample.
pub struct PointerHistory {
    samples: VecDeque<Point>,
    has_real_sample: bool,
}

impl Default for PointerHistory {
    fn default() -> Self {
        let mut samples = VecDeque::with_capacity(HISTORY_LENGTH);
        for _ in 0..HISTORY_LENGTH {
            samples.push_back(Point::offscreen());
        }
        Self { samples, has_real_sample: false }
    }
}

impl PointerHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, evicting the oldest to keep the length fixed.
    pub fn push(&mut self, sample: Point) {
        self.samples.push_back(sample);
        if self.samples.len() > HISTORY_LENGTH {
            self.samples.pop_front();
        }
        self.has_real_sample = true;
    }

    /// The front of the delay line: the sample pushed [`HISTORY_LENGTH`]
    /// pushes ago, or the sentinel while real samples are still flushing in.
    #[must_use]
    pub fn oldest(&self) -> Point {
        self.samples.front().copied().unwrap_or_else(Point::offscreen)
    }

    /// Whether any real pointer sample has ever been pushed.
    #[must_use]
    pub fn has_real_sample(&self) -> bool {
        self.has_real_sample
    }

    /// Current number of samples; constant after construction.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
