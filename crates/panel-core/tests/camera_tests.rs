// Picking math: cameras, rays and the camera-facing drag plane.

use glam::{Vec2, Vec3};
use panel_core::geometry::intersect_ray_plane;
use panel_core::{Camera, Frame, OrbitControls, PlaneDrag, Ray, Tuning, ViewMode, Viewport};

fn frame() -> Frame {
    Frame::new(1000.0, 800.0, 20.0, &Tuning::default()).unwrap()
}

#[test]
fn target_projects_to_viewport_center() {
    let vp = Viewport::default();
    for mode in [ViewMode::Perspective, ViewMode::Sheet] {
        let cam = Camera::for_mode(&frame(), mode, vp.aspect());
        let px = cam.world_to_pixel(cam.target, vp).unwrap();
        assert!((px - Vec2::new(400.0, 300.0)).length() < 1e-2, "{mode:?} {px:?}");
    }
}

#[test]
fn center_ray_passes_through_target() {
    let vp = Viewport::default();
    let cam = Camera::perspective_for(&frame(), vp.aspect());
    let ray = cam.pixel_to_ray(Vec2::new(400.0, 300.0), vp);
    let to_target = cam.target - ray.origin;
    let miss = to_target - ray.dir * to_target.dot(ray.dir);
    assert!(miss.length() < 0.5, "{miss:?}");
    assert!((ray.dir - cam.forward()).length() < 1e-3);
}

#[test]
fn pixel_ray_round_trips_world_point() {
    let vp = Viewport::default();
    let cam = Camera::perspective_for(&frame(), vp.aspect());
    let p = Vec3::new(250.0, 600.0, 10.0);
    let px = cam.world_to_pixel(p, vp).unwrap();
    let ray = cam.pixel_to_ray(px, vp);
    let hit = intersect_ray_plane(&ray, p, Vec3::Z, 1e-6).unwrap();
    assert!((hit - p).length() < 0.5, "{hit:?}");
}

#[test]
fn sheet_camera_keeps_world_up_on_screen() {
    let vp = Viewport::default();
    let cam = Camera::sheet_for(&frame(), vp.aspect());
    // Sheet v = -y: the frame's world top edge (v = -H) is at the top of the screen.
    let top = cam.world_to_pixel(Vec3::new(500.0, -800.0, 0.0), vp).unwrap();
    let bottom = cam.world_to_pixel(Vec3::new(500.0, 0.0, 0.0), vp).unwrap();
    assert!(top.y < bottom.y);
    let left = cam.world_to_pixel(Vec3::new(0.0, -400.0, 0.0), vp).unwrap();
    let right = cam.world_to_pixel(Vec3::new(1000.0, -400.0, 0.0), vp).unwrap();
    assert!(left.x < right.x);
    for p in [top, bottom, left, right] {
        assert!(p.x >= 0.0 && p.x <= vp.width && p.y >= 0.0 && p.y <= vp.height, "{p:?}");
    }
}

#[test]
fn point_behind_camera_has_no_pixel() {
    let vp = Viewport::default();
    let cam = Camera::perspective_for(&frame(), vp.aspect());
    let behind = cam.eye - cam.forward() * 100.0;
    assert_eq!(cam.world_to_pixel(behind, vp), None);
}

#[test]
fn orbit_pitch_is_limited() {
    let mut orbit = OrbitControls::for_frame(&frame());
    orbit.rotate(0.0, 10.0);
    assert!(orbit.pitch < std::f32::consts::FRAC_PI_2);
    assert!(!orbit.rotate(0.0, 1.0));
    assert!(orbit.zoom(0.5, 100.0, 5000.0));
    assert_eq!(orbit.distance, 800.0);
}

#[test]
fn drag_keeps_grab_offset() {
    let drag = PlaneDrag::begin(Vec3::NEG_Z, Vec3::new(10.0, 10.0, 5.0), Vec3::new(12.0, 9.0, 5.0));
    let ray = Ray {
        origin: Vec3::new(50.0, 60.0, -100.0),
        dir: Vec3::Z,
    };
    assert_eq!(drag.update(&ray), Some(Vec3::new(52.0, 59.0, 5.0)));
}

#[test]
fn edge_on_drag_plane_yields_nothing() {
    let drag = PlaneDrag::begin(Vec3::NEG_Z, Vec3::ZERO, Vec3::ZERO);
    let parallel = Ray {
        origin: Vec3::new(0.0, 0.0, -10.0),
        dir: Vec3::X,
    };
    assert_eq!(drag.update(&parallel), None);

    let away = Ray {
        origin: Vec3::new(0.0, 0.0, 10.0),
        dir: Vec3::Z,
    };
    assert_eq!(drag.update(&away), None);
}
