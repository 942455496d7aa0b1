//! Shared numeric constants for the effects crate.

// ── Grain overlay ───────────────────────────────────────────────

/// Edge length of the square noise tile, in pixels.
pub const PATTERN_SIZE: u32 = 250;

/// Horizontal context scale applied to the overlay canvas. Stretching the
/// tile makes the grain coarser and more visible.
pub const PATTERN_SCALE_X: f64 = 5.0;

/// Vertical context scale applied to the overlay canvas.
pub const PATTERN_SCALE_Y: f64 = 5.0;

/// Frames between tile regenerations. The canvas is repainted every frame;
/// the tile itself only changes on this cadence.
pub const PATTERN_REFRESH_INTERVAL: u64 = 2;

/// Constant alpha for every grain pixel, on a 0–255 scale (~20% opacity).
pub const PATTERN_ALPHA: u8 = 50;

// ── Cursor trail ────────────────────────────────────────────────

/// Number of pointer samples retained in the delay line. Higher = more lag.
pub const HISTORY_LENGTH: usize = 10;

/// Per-frame exponential smoothing factor. Lower = more trailing.
pub const EASING: f64 = 0.1;

/// Milliseconds without a pointer move before the pointer counts as idle.
pub const IDLE_TIMEOUT_MS: f64 = 100.0;

/// Intersection ratio at or above which the focus region counts as visible.
pub const FOCUS_RATIO_THRESHOLD: f64 = 0.3;

/// Indicator diameter in pixels while the pointer is moving.
pub const TRAIL_SIZE_MOVING_PX: f64 = 120.0;

/// Indicator diameter in pixels while the pointer is idle.
pub const TRAIL_SIZE_IDLE_PX: f64 = 100.0;

/// CSS transition applied to the indicator's size properties only; position
/// is updated discretely every frame.
pub const TRAIL_SIZE_TRANSITION: &str = "width 0.3s, height 0.3s";

/// Coordinate used for the off-screen sentinel sample, so the indicator
/// starts hidden off-canvas instead of snapping in from the origin.
pub const OFFSCREEN_PX: f64 = -100.0;

/// Default DOM id of the focus region whose visibility gates the indicator.
pub const DEFAULT_FOCUS_REGION_ID: &str = "first-panel";
