use glam::{Vec2, Vec3};
use web_sys as web;

/// Pixels of horizontal pointer travel that double the panel's size.
pub const SCALE_DRAG_PX: f32 = 200.0;
/// Radians of orbit per pixel of pointer travel.
pub const ORBIT_RAD_PER_PX: f32 = 0.005;
pub const WHEEL_ZOOM_STEP: f32 = 1.1;

/// What the pointer is currently doing on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerMode {
    #[default]
    Idle,
    /// A panel grabbed through the configurator's drag gesture.
    Panel,
    /// Shift+drag on a panel with transform controls on.
    Scale { start: Vec2, base: Vec3 },
    /// Empty-space drag orbiting the perspective camera.
    Orbit { last: Vec2 },
}

// ---------------- Pointer helpers ----------------
/// Pointer position relative to the canvas, in CSS pixels.
#[inline]
pub fn pointer_canvas_css(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

/// Uniform in-plane scale factor for a shift+drag that has travelled `dx` pixels.
#[inline]
pub fn scale_factor(dx: f32) -> f32 {
    (1.0 + dx / SCALE_DRAG_PX).max(0.0)
}

#[inline]
pub fn scaled(base: Vec3, factor: f32) -> Vec3 {
    Vec3::new(base.x * factor, base.y * factor, base.z)
}

#[inline]
pub fn wheel_factor(delta_y: f64) -> f32 {
    if delta_y > 0.0 {
        WHEEL_ZOOM_STEP
    } else {
        1.0 / WHEEL_ZOOM_STEP
    }
}
