// Dimension lines and labels during a scale edit.

use glam::Vec3;
use panel_core::{
    format_dimension, Camera, DimensionAnnotator, EntityId, EntityKind, Frame, LabelBuffer,
    ModeProjector, OrbitControls, PanelId, PanelRegistry, PanelSpec, Placement, SceneGraph,
    Tuning, ViewMode, Viewport,
};

struct Fixture {
    frame: Frame,
    scene: SceneGraph,
    reg: PanelRegistry,
    overlay: LabelBuffer,
    annotator: DimensionAnnotator,
    camera: Camera,
    id: PanelId,
}

fn fixture() -> Fixture {
    let frame = Frame::new(1000.0, 800.0, 20.0, &Tuning::default()).unwrap();
    let mut scene = SceneGraph::new();
    let mut reg = PanelRegistry::new();
    let spec = PanelSpec {
        width: 200.0,
        height: 150.0,
        depth: 10.0,
        kind: "door".into(),
    };
    let id = reg.insert(spec, Placement::at(Vec3::new(500.0, 400.0, 10.0)), &mut scene);
    Fixture {
        camera: Camera::perspective_for(&frame, Viewport::default().aspect()),
        frame,
        scene,
        reg,
        overlay: LabelBuffer::default(),
        annotator: DimensionAnnotator::new(Tuning::default().dimension_margin),
        id,
    }
}

impl Fixture {
    fn show(&mut self) {
        let panel = self.reg.get(self.id).unwrap();
        self.annotator.show(
            panel,
            &mut self.scene,
            &mut self.overlay,
            &self.camera,
            Viewport::default(),
        );
    }

    fn line_ids(&self) -> Vec<EntityId> {
        self.scene
            .iter()
            .filter(|(_, e)| matches!(e.kind, EntityKind::DimensionLine { .. }))
            .map(|(id, _)| id)
            .collect()
    }
}

#[test]
fn labels_follow_scaled_size() {
    let mut fx = fixture();
    fx.reg.set_scale(fx.id, Vec3::new(1.5, 1.0, 1.0), &mut fx.scene);
    fx.show();

    let texts: Vec<&str> = fx.overlay.labels.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(texts, ["300 mm", "150 mm"]);
    assert!(fx.overlay.labels.iter().all(|(_, px)| px.is_some()));

    let lines = fx.annotator.lines();
    assert_eq!(lines.len(), 2);
    // Width line above the top edge, height line right of the right edge.
    assert_eq!(lines[0].start, Vec3::new(350.0, 495.0, 10.0));
    assert_eq!(lines[0].end, Vec3::new(650.0, 495.0, 10.0));
    assert_eq!(lines[1].start, Vec3::new(670.0, 325.0, 10.0));
    assert_eq!(lines[1].end, Vec3::new(670.0, 475.0, 10.0));
}

#[test]
fn repeated_show_moves_existing_lines() {
    let mut fx = fixture();
    fx.show();
    let first = fx.line_ids();
    assert_eq!(first.len(), 2);

    fx.reg.set_scale(fx.id, Vec3::new(2.0, 1.2, 1.0), &mut fx.scene);
    fx.show();
    assert_eq!(fx.line_ids(), first);
    assert_eq!(fx.overlay.labels[0].0, "400 mm");
    assert_eq!(fx.overlay.labels[1].0, "180 mm");

    let entity = fx.scene.get(first[0]).unwrap();
    assert_eq!(
        entity.kind,
        EntityKind::DimensionLine {
            start: Vec3::new(300.0, 510.0, 10.0),
            end: Vec3::new(700.0, 510.0, 10.0),
        }
    );
}

#[test]
fn hide_is_idempotent() {
    let mut fx = fixture();
    fx.show();
    fx.annotator.hide(&mut fx.scene, &mut fx.overlay);
    fx.annotator.hide(&mut fx.scene, &mut fx.overlay);

    assert_eq!(fx.overlay.clears, 1);
    assert!(fx.overlay.labels.is_empty());
    assert!(fx.line_ids().is_empty());
    assert!(fx.annotator.lines().is_empty());
    assert_eq!(fx.annotator.active(), None);
}

#[test]
fn hide_with_nothing_shown_does_nothing() {
    let mut fx = fixture();
    fx.annotator.hide(&mut fx.scene, &mut fx.overlay);
    assert_eq!(fx.overlay.clears, 0);
    assert_eq!(fx.scene.len(), 1);
}

#[test]
fn sheet_lines_sit_above_in_screen_terms() {
    let mut fx = fixture();
    let panel = fx.reg.get_mut(fx.id).unwrap();
    ModeProjector.project_to_sheet(panel, &mut fx.scene).unwrap();
    fx.camera = Camera::sheet_for(&fx.frame, Viewport::default().aspect());
    fx.show();

    let lines = fx.annotator.lines();
    assert_eq!(lines[0].start, Vec3::new(400.0, -495.0, 0.0));
    assert_eq!(lines[1].start.x, 620.0);

    // Top edge of the panel is above its center on screen.
    let vp = Viewport::default();
    let label = fx.overlay.labels[0].1.unwrap();
    let center = fx.camera.world_to_pixel(Vec3::new(500.0, -400.0, 0.0), vp).unwrap();
    assert!(label.y < center.y);
    assert_eq!(fx.reg.get(fx.id).unwrap().mode(), ViewMode::Sheet);
}

#[test]
fn camera_change_moves_labels() {
    let mut fx = fixture();
    fx.show();
    let before = fx.overlay.labels.clone();

    let mut orbit = OrbitControls::for_frame(&fx.frame);
    assert!(orbit.rotate(0.6, 0.0));
    orbit.apply(&mut fx.camera);
    fx.annotator
        .update_position(&mut fx.overlay, &fx.camera, Viewport::default());

    assert_eq!(fx.overlay.labels.len(), 2);
    assert_eq!(fx.overlay.labels[0].0, before[0].0);
    assert_ne!(fx.overlay.labels[0].1, before[0].1);
}

#[test]
fn dimension_text_rounds_to_whole_units() {
    assert_eq!(format_dimension(299.6), "300 mm");
    assert_eq!(format_dimension(149.4), "149 mm");
    assert_eq!(format_dimension(0.5), "1 mm");
}
