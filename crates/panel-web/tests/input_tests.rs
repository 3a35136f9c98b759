// Host-side tests for pure input functions.
// The web crate is wasm-only, so the pointer helpers are included directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::{Vec2, Vec3};
use input::*;

#[test]
fn scale_factor_tracks_horizontal_travel() {
    assert_eq!(scale_factor(0.0), 1.0);
    assert_eq!(scale_factor(SCALE_DRAG_PX), 2.0);
    assert!((scale_factor(-SCALE_DRAG_PX * 0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn scale_factor_never_goes_negative() {
    assert_eq!(scale_factor(-SCALE_DRAG_PX), 0.0);
    assert_eq!(scale_factor(-2.0 * SCALE_DRAG_PX), 0.0);
}

#[test]
fn scaled_leaves_depth_untouched() {
    let base = Vec3::new(1.5, 0.5, 0.8);
    assert_eq!(scaled(base, 2.0), Vec3::new(3.0, 1.0, 0.8));
    assert_eq!(scaled(base, 0.0), Vec3::new(0.0, 0.0, 0.8));
}

#[test]
fn wheel_down_zooms_out_and_up_zooms_in() {
    assert_eq!(wheel_factor(120.0), WHEEL_ZOOM_STEP);
    assert!((wheel_factor(-120.0) * WHEEL_ZOOM_STEP - 1.0).abs() < 1e-6);
    // A zero delta counts as zoom in.
    assert_eq!(wheel_factor(0.0), 1.0 / WHEEL_ZOOM_STEP);
}

#[test]
fn pointer_mode_defaults_to_idle() {
    assert_eq!(PointerMode::default(), PointerMode::Idle);
    let orbit = PointerMode::Orbit {
        last: Vec2::new(10.0, 20.0),
    };
    assert_ne!(orbit, PointerMode::Idle);
}
