#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::HISTORY_LENGTH;

const EPSILON: f64 = 1e-6;

/// Push the same sample enough times that it reaches the front of the delay
/// line, then report whether the core is ready to render.
fn flood_history(core: &mut TrailCore, target: Point, now_ms: f64) {
    for _ in 0..HISTORY_LENGTH {
        core.on_pointer_move(target, now_ms);
    }
}

// --- IdleGate ---

#[test]
fn gate_is_inactive_before_any_poke() {
    let gate = IdleGate::default();
    assert!(!gate.active(0.0));
    assert!(!gate.active(1e9));
}

#[test]
fn gate_stays_active_within_the_window() {
    let mut gate = IdleGate::default();
    gate.poke(0.0);
    assert!(gate.active(0.0));
    assert!(gate.active(99.0));
    assert!(!gate.active(100.0));
}

#[test]
fn each_poke_restarts_the_window() {
    // Move at t=0 and t=90: still moving at t=150.
    let mut gate = IdleGate::default();
    gate.poke(0.0);
    gate.poke(90.0);
    assert!(gate.active(150.0));
    // No move after t=90: idle by t=191.
    assert!(!gate.active(191.0));
}

// --- Focus visibility gating ---

#[test]
fn visibility_is_a_hard_threshold_at_0_3() {
    let mut core = TrailCore::new();
    core.set_focus_ratio(0.299_999);
    assert!(!core.focus_visible());
    core.set_focus_ratio(0.3);
    assert!(core.focus_visible());
    core.set_focus_ratio(1.0);
    assert!(core.focus_visible());
    core.set_focus_ratio(0.0);
    assert!(!core.focus_visible());
}

#[test]
fn core_starts_hidden() {
    assert!(!TrailCore::new().focus_visible());
}

// --- Frame gating ---

#[test]
fn no_frame_before_the_pointer_has_moved() {
    let mut core = TrailCore::new();
    core.set_focus_ratio(1.0);
    assert!(core.frame(0.0).is_none());
}

#[test]
fn no_frame_while_focus_region_is_hidden() {
    let mut core = TrailCore::new();
    core.on_pointer_move(Point::new(10.0, 10.0), 0.0);
    assert!(core.frame(0.0).is_none());
}

#[test]
fn hiding_the_focus_region_freezes_the_position() {
    let mut core = TrailCore::new();
    core.set_focus_ratio(1.0);
    flood_history(&mut core, Point::new(100.0, 100.0), 0.0);
    core.frame(0.0).unwrap();
    let frozen = core.position();

    core.set_focus_ratio(0.0);
    for _ in 0..10 {
        assert!(core.frame(0.0).is_none());
    }
    assert_eq!(core.position(), frozen);
}

// --- Smoothing ---

#[test]
fn one_frame_moves_ten_percent_toward_the_delayed_target() {
    let mut core = TrailCore::new();
    core.set_focus_ratio(1.0);
    flood_history(&mut core, Point::new(200.0, 100.0), 0.0);

    let frame = core.frame(0.0).unwrap();
    assert!((frame.x - 20.0).abs() < EPSILON);
    assert!((frame.y - 10.0).abs() < EPSILON);
}

#[test]
fn smoothing_converges_geometrically_to_a_constant_target() {
    let mut core = TrailCore::new();
    core.set_focus_ratio(1.0);
    let target = Point::new(640.0, 480.0);
    flood_history(&mut core, target, 0.0);

    // Residual decays by 0.9 per frame: 0.9^n * 640 < 1e-3 within 300 frames.
    let mut last = Point::new(0.0, 0.0);
    for _ in 0..300 {
        let frame = core.frame(0.0).unwrap();
        last = Point::new(frame.x, frame.y);
    }
    assert!((last.x - target.x).abs() < 1e-3);
    assert!((last.y - target.y).abs() < 1e-3);
}

#[test]
fn residual_shrinks_every_frame() {
    let mut core = TrailCore::new();
    core.set_focus_ratio(1.0);
    let target = Point::new(300.0, -200.0);
    flood_history(&mut core, target, 0.0);

    let mut residual = f64::MAX;
    for _ in 0..50 {
        let frame = core.frame(0.0).unwrap();
        let next = (target.x - frame.x).hypot(target.y - frame.y);
        assert!(next < residual);
        residual = next;
    }
}

#[test]
fn smoothing_tracks_the_delayed_sample_not_the_latest() {
    let mut core = TrailCore::new();
    core.set_focus_ratio(1.0);
    // Fill the line with one position, then push a single newer one: the
    // delayed target at the front is still the old position.
    flood_history(&mut core, Point::new(100.0, 0.0), 0.0);
    core.on_pointer_move(Point::new(9000.0, 0.0), 0.0);

    let frame = core.frame(0.0).unwrap();
    assert!((frame.x - 10.0).abs() < EPSILON);
}

// --- Size / movement flag ---

#[test]
fn size_is_large_while_moving_and_small_when_idle() {
    let mut core = TrailCore::new();
    core.set_focus_ratio(1.0);
    flood_history(&mut core, Point::new(50.0, 50.0), 1000.0);

    assert_eq!(core.frame(1050.0).unwrap().size, 120.0);
    assert!(core.is_moving(1050.0));

    // 100ms after the last move the indicator shrinks.
    assert_eq!(core.frame(1100.0).unwrap().size, 100.0);
    assert!(!core.is_moving(1100.0));
}

#[test]
fn idle_timing_matches_the_debounce_window() {
    let mut core = TrailCore::new();
    core.set_focus_ratio(1.0);
    core.on_pointer_move(Point::new(1.0, 1.0), 0.0);
    core.on_pointer_move(Point::new(2.0, 2.0), 90.0);
    assert!(core.is_moving(150.0));
    assert!(!core.is_moving(191.0));
}
