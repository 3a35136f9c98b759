// Mesh <-> outline projection.

use glam::Vec3;
use panel_core::projector::{boundary_polygon, to_sheet, to_world};
use panel_core::{
    EntityKind, Error, ModeProjector, PanelRegistry, PanelSpec, PanelView, Placement, SceneGraph,
    ViewMode,
};

const EPS: f32 = 1e-4;

fn spec(w: f32, h: f32) -> PanelSpec {
    PanelSpec {
        width: w,
        height: h,
        depth: 10.0,
        kind: "door".into(),
    }
}

fn meshes(scene: &SceneGraph) -> usize {
    scene.count(|k| matches!(k, EntityKind::Mesh { .. }))
}

fn outlines(scene: &SceneGraph) -> usize {
    scene.count(|k| matches!(k, EntityKind::Outline { .. }))
}

#[test]
fn placement_mapping_flips_vertical_and_rotation() {
    let world = Placement {
        position: Vec3::new(120.0, 340.0, 10.0),
        scale: Vec3::new(1.5, 0.5, 1.0),
        rotation: 0.25,
    };
    let sheet = to_sheet(&world);
    assert_eq!(sheet.position, Vec3::new(120.0, -340.0, 0.0));
    assert_eq!(sheet.scale, world.scale);
    assert_eq!(sheet.rotation, -0.25);
    assert_eq!(to_world(&sheet, 10.0), world);
}

#[test]
fn boundary_of_a_box_is_its_face_rectangle() {
    let poly = boundary_polygon(Vec3::new(200.0, 150.0, 10.0));
    assert_eq!(poly.len(), 4);
    for p in &poly {
        assert!((p.x.abs() - 100.0).abs() < EPS);
        assert!((p.y.abs() - 75.0).abs() < EPS);
    }
    // Counter-clockwise: positive signed area.
    let area: f32 = (0..poly.len())
        .map(|i| poly[i].perp_dot(poly[(i + 1) % poly.len()]))
        .sum::<f32>()
        * 0.5;
    assert!((area - 200.0 * 150.0).abs() < 1e-2);
}

#[test]
fn round_trip_restores_transform() {
    let mut scene = SceneGraph::new();
    let mut reg = PanelRegistry::new();
    let original = Placement {
        position: Vec3::new(321.5, 612.25, 10.0),
        scale: Vec3::new(1.3, 0.8, 1.0),
        rotation: 0.4,
    };
    let id = reg.insert(spec(200.0, 150.0), original, &mut scene);
    let projector = ModeProjector;

    let panel = reg.get_mut(id).unwrap();
    projector.project_to_sheet(panel, &mut scene).unwrap();
    assert_eq!(panel.mode(), ViewMode::Sheet);
    assert!(matches!(panel.view, PanelView::Outline { .. }));
    assert_eq!((meshes(&scene), outlines(&scene)), (0, 1));
    assert_eq!(scene.get(panel.entity()).unwrap().placement, *panel.placement());

    projector.project_to_world(panel, &mut scene).unwrap();
    assert_eq!((meshes(&scene), outlines(&scene)), (1, 0));
    let back = panel.placement();
    assert!((back.position - original.position).length() < EPS);
    assert!((back.scale - original.scale).length() < EPS);
    assert!((back.rotation - original.rotation).abs() < EPS);
}

#[test]
fn sheet_edit_is_carried_back_to_world() {
    let mut scene = SceneGraph::new();
    let mut reg = PanelRegistry::new();
    let id = reg.insert(
        spec(200.0, 150.0),
        Placement::at(Vec3::new(500.0, 400.0, 10.0)),
        &mut scene,
    );
    let projector = ModeProjector;

    projector.project_to_sheet(reg.get_mut(id).unwrap(), &mut scene).unwrap();
    reg.set_position(id, Vec3::new(300.0, -250.0, 0.0), &mut scene);
    projector.project_to_world(reg.get_mut(id).unwrap(), &mut scene).unwrap();

    let p = reg.get(id).unwrap().placement().position;
    assert_eq!(p, Vec3::new(300.0, 250.0, 10.0));
}

#[test]
fn degenerate_outline_is_skipped_and_mesh_kept() {
    let mut scene = SceneGraph::new();
    let mut reg = PanelRegistry::new();
    let id = reg.insert(spec(0.0, 150.0), Placement::at(Vec3::new(500.0, 400.0, 10.0)), &mut scene);

    let panel = reg.get_mut(id).unwrap();
    let err = ModeProjector.project_to_sheet(panel, &mut scene).unwrap_err();
    assert_eq!(err, Error::DegenerateGeometry(id));
    assert_eq!(panel.mode(), ViewMode::Perspective);
    assert_eq!((meshes(&scene), outlines(&scene)), (1, 0));
}

#[test]
fn projecting_without_counterpart_is_a_no_op() {
    let mut scene = SceneGraph::new();
    let mut reg = PanelRegistry::new();
    let id = reg.insert(spec(200.0, 150.0), Placement::default(), &mut scene);
    let before = reg.get(id).unwrap().clone();

    let panel = reg.get_mut(id).unwrap();
    let err = ModeProjector.project_to_world(panel, &mut scene).unwrap_err();
    assert_eq!(err, Error::MissingCounterpart(id));
    assert_eq!(*panel, before);
}
