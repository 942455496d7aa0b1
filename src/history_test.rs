#![allow(clippy::float_cmp)]

use super::*;

#[allow(clippy::cast_precision_loss)]
fn sample(i: usize) -> Point {
    Point::new(i as f64, i as f64 * 2.0)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn offscreen_sentinel_is_off_canvas() {
    let p = Point::offscreen();
    assert!(p.x < 0.0);
    assert!(p.y < 0.0);
}

// --- Construction ---

#[test]
fn new_buffer_is_full_of_sentinels() {
    let history = PointerHistory::new();
    assert_eq!(history.len(), HISTORY_LENGTH);
    assert_eq!(history.oldest(), Point::offscreen());
    assert!(!history.has_real_sample());
    assert!(!history.is_empty());
}

// --- Length invariant ---

#[test]
fn length_is_constant_under_any_push_sequence() {
    let mut history = PointerHistory::new();
    for i in 0..100 {
        history.push(sample(i));
        assert_eq!(history.len(), HISTORY_LENGTH);
    }
}

// --- Delay semantics ---

#[test]
fn oldest_is_sentinel_until_buffer_cycles() {
    let mut history = PointerHistory::new();
    for i in 0..HISTORY_LENGTH - 1 {
        history.push(sample(i));
        assert_eq!(history.oldest(), Point::offscreen());
    }
    // The HISTORY_LENGTH-th push evicts the last sentinel.
    history.push(sample(HISTORY_LENGTH - 1));
    assert_eq!(history.oldest(), sample(0));
}

#[test]
fn oldest_lags_by_history_length() {
    let mut history = PointerHistory::new();
    for i in 0..50 {
        history.push(sample(i));
        if i >= HISTORY_LENGTH {
            assert_eq!(history.oldest(), sample(i - HISTORY_LENGTH + 1));
        }
    }
}

#[test]
fn has_real_sample_flips_on_first_push() {
    let mut history = PointerHistory::new();
    assert!(!history.has_real_sample());
    history.push(sample(0));
    assert!(history.has_real_sample());
}
