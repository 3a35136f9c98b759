// Pointer gestures driven through the configurator facade.

use glam::{Vec2, Vec3};
use panel_core::{
    Configurator, EntityKind, Gesture, LabelBuffer, PanelId, SceneGraph, Tuning, ViewMode,
};

const EPS: f32 = 1e-2;

type App = Configurator<SceneGraph, LabelBuffer>;

fn app_with_panel() -> (App, PanelId) {
    let mut app = Configurator::new(SceneGraph::new(), LabelBuffer::default(), Tuning::default());
    app.create_frame(1000.0, 800.0, 20.0).unwrap();
    let id = app.add_panel(200.0, 150.0, 10.0).unwrap();
    (app, id)
}

fn pixel_of(app: &App, world: Vec3) -> Vec2 {
    app.camera().world_to_pixel(world, app.viewport()).unwrap()
}

fn dimension_lines(app: &App) -> usize {
    app.scene
        .count(|k| matches!(k, EntityKind::DimensionLine { .. }))
}

#[test]
fn sheet_drag_past_corner_stops_on_frame_edges() {
    let (mut app, id) = app_with_panel();
    assert_eq!(app.toggle_mode(), ViewMode::Sheet);

    let grab = pixel_of(&app, Vec3::new(500.0, -400.0, 0.0));
    assert_eq!(app.pointer_down(grab), Some(id));
    assert!(matches!(app.gesture(), Gesture::Dragging { panel, .. } if panel == id));

    let far = pixel_of(&app, Vec3::new(2000.0, 2000.0, 0.0));
    let p = app.pointer_move(far).unwrap();
    assert!((p - Vec3::new(900.0, -75.0, 0.0)).length() < EPS, "{p:?}");

    assert_eq!(app.pointer_up(), Some(id));
    assert_eq!(app.gesture(), Gesture::Idle);

    app.toggle_mode();
    let world = app.panel(id).unwrap().placement().position;
    assert!((world - Vec3::new(900.0, 75.0, 10.0)).length() < EPS, "{world:?}");
}

#[test]
fn pointer_down_on_empty_space_starts_nothing() {
    let (mut app, _) = app_with_panel();
    assert_eq!(app.pointer_down(Vec2::new(1.0, 1.0)), None);
    assert_eq!(app.gesture(), Gesture::Idle);
    assert_eq!(app.pointer_move(Vec2::new(400.0, 300.0)), None);
}

#[test]
fn perspective_drag_keeps_depth_on_mid_plane() {
    let (mut app, id) = app_with_panel();
    let grab = pixel_of(&app, Vec3::new(500.0, 400.0, 10.0));
    assert_eq!(app.pointer_down(grab), Some(id));

    let to = pixel_of(&app, Vec3::new(700.0, 550.0, 15.0));
    let p = app.pointer_move(to).unwrap();
    assert_eq!(p.z, 10.0);
    assert!(p.x > 600.0 && p.x <= 900.0, "{p:?}");
    assert!(p.y > 420.0 && p.y <= 725.0, "{p:?}");
    assert_eq!(app.panel(id).unwrap().placement().position, p);
}

#[test]
fn drag_end_refreshes_snap_anchors() {
    let (mut app, id) = app_with_panel();
    app.toggle_mode();
    let grab = pixel_of(&app, Vec3::new(500.0, -400.0, 0.0));
    app.pointer_down(grab);
    app.pointer_move(pixel_of(&app, Vec3::new(2000.0, 2000.0, 0.0)));
    app.pointer_up();

    let center = app.snaps().anchors_of(id).unwrap()[8];
    assert!((center - Vec3::new(900.0, -75.0, 0.0)).length() < EPS);
}

#[test]
fn pointer_leave_ends_drag() {
    let (mut app, id) = app_with_panel();
    let grab = pixel_of(&app, Vec3::new(500.0, 400.0, 10.0));
    app.pointer_down(grab);
    assert_eq!(app.pointer_leave(), Some(id));
    assert_eq!(app.gesture(), Gesture::Idle);
    assert_eq!(app.pointer_leave(), None);
}

#[test]
fn scale_needs_transform_controls() {
    let (mut app, id) = app_with_panel();
    assert!(!app.begin_scale(id));
    assert_eq!(app.scale_to(Vec3::splat(2.0)), None);

    assert!(app.toggle_transform_controls());
    assert!(app.begin_scale(id));
    assert_eq!(app.gesture(), Gesture::Scaling { panel: id });
}

#[test]
fn scale_shows_dimensions_until_release() {
    let (mut app, id) = app_with_panel();
    app.toggle_transform_controls();
    app.begin_scale(id);

    let s = app.scale_to(Vec3::new(1.5, 1.0, 1.0)).unwrap();
    assert_eq!(s, Vec3::new(1.5, 1.0, 1.0));
    let texts: Vec<&str> = app.overlay.labels.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(texts, ["300 mm", "150 mm"]);
    assert_eq!(dimension_lines(&app), 2);
    assert_eq!(app.annotator().active(), Some(id));

    app.scale_to(Vec3::new(1.6, 1.2, 1.0));
    assert_eq!(dimension_lines(&app), 2);
    assert_eq!(app.overlay.labels[1].0, "180 mm");

    assert_eq!(app.end_scale(), Some(id));
    assert!(app.overlay.labels.is_empty());
    assert_eq!(dimension_lines(&app), 0);
    assert_eq!(app.annotator().active(), None);
}

#[test]
fn oversized_scale_is_clamped_to_frame() {
    let (mut app, id) = app_with_panel();
    app.toggle_transform_controls();
    app.begin_scale(id);

    let s = app.scale_to(Vec3::new(10.0, 10.0, 1.0)).unwrap();
    assert!((s.x - 5.0).abs() < 1e-4);
    assert!((s.y - 800.0 / 150.0).abs() < 1e-4);
    assert_eq!(s.z, 1.0);

    let panel = app.panel(id).unwrap();
    let centered = panel.placement().position - Vec3::new(500.0, 400.0, 10.0);
    assert!(centered.length() < EPS, "{centered:?}");
    assert_eq!(app.overlay.labels[0].0, "1000 mm");
    assert_eq!(app.overlay.labels[1].0, "800 mm");
}

#[test]
fn turning_transform_controls_off_ends_scale() {
    let (mut app, id) = app_with_panel();
    app.toggle_transform_controls();
    app.begin_scale(id);
    app.scale_to(Vec3::new(1.2, 1.2, 1.0));

    assert!(!app.toggle_transform_controls());
    assert_eq!(app.gesture(), Gesture::Idle);
    assert_eq!(dimension_lines(&app), 0);
}

#[test]
fn drag_with_snap_off_only_clamps() {
    let (mut app, id) = app_with_panel();
    let other = app.add_panel(200.0, 150.0, 10.0).unwrap();
    assert!(!app.toggle_snap());

    let grab = pixel_of(&app, Vec3::new(500.0, 400.0, 10.0));
    let hit = app.pointer_down(grab).unwrap();
    assert!(hit == id || hit == other);
    let p = app.pointer_move(pixel_of(&app, Vec3::new(-500.0, -500.0, 15.0))).unwrap();
    assert_eq!((p.x, p.y, p.z), (100.0, 75.0, 10.0));
}

#[test]
fn pick_reports_panel_without_grabbing_it() {
    let (app, id) = app_with_panel();
    let over = pixel_of(&app, Vec3::new(500.0, 400.0, 10.0));
    assert_eq!(app.pick_panel(over), Some(id));
    assert_eq!(app.pick_panel(Vec2::new(1.0, 1.0)), None);
    assert_eq!(app.gesture(), Gesture::Idle);
}
