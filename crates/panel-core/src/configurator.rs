//! The facade the UI layer talks to.
//!
//! `Configurator` owns the frame, the panels and every derived structure, and
//! exposes the operations the page calls: create the frame, add panels,
//! toggle mode/snap/transform controls, and feed pointer events.

use crate::camera::{Camera, OrbitControls, Viewport};
use crate::constraint::ConstraintEnforcer;
use crate::context::{EditContext, Tuning, ViewMode};
use crate::dimensions::{DimensionAnnotator, LabelOverlay};
use crate::error::{Error, Result};
use crate::frame::{validate_dimension, Frame};
use crate::geometry::Placement;
use crate::interaction::{DragInteraction, Gesture, Stage};
use crate::panel::{Panel, PanelId, PanelRegistry, PanelSpec};
use crate::projector::ModeProjector;
use crate::scene::{EntityId, Scene};
use crate::snap::SnapPointIndex;
use glam::{Vec2, Vec3};

pub struct Configurator<S: Scene, O: LabelOverlay> {
    pub scene: S,
    pub overlay: O,
    tuning: Tuning,
    context: EditContext,
    frame: Option<Frame>,
    frame_entity: Option<EntityId>,
    panels: PanelRegistry,
    snaps: SnapPointIndex,
    enforcer: ConstraintEnforcer,
    projector: ModeProjector,
    annotator: DimensionAnnotator,
    interaction: DragInteraction,
    camera: Camera,
    orbit: Option<OrbitControls>,
    viewport: Viewport,
}

impl<S: Scene, O: LabelOverlay> Configurator<S, O> {
    pub fn new(scene: S, overlay: O, tuning: Tuning) -> Self {
        let viewport = Viewport::default();
        let placeholder = Frame {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        };
        Self {
            scene,
            overlay,
            tuning,
            context: EditContext::default(),
            frame: None,
            frame_entity: None,
            panels: PanelRegistry::new(),
            snaps: SnapPointIndex::new(),
            enforcer: ConstraintEnforcer::new(tuning.snap_tolerance, tuning.min_scale),
            projector: ModeProjector,
            annotator: DimensionAnnotator::new(tuning.dimension_margin),
            interaction: DragInteraction::new(),
            camera: Camera::perspective_for(&placeholder, viewport.aspect()),
            orbit: None,
            viewport,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    #[must_use]
    pub fn context(&self) -> EditContext {
        self.context
    }

    #[must_use]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    #[must_use]
    pub fn panels(&self) -> &PanelRegistry {
        &self.panels
    }

    #[must_use]
    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(id)
    }

    #[must_use]
    pub fn snaps(&self) -> &SnapPointIndex {
        &self.snaps
    }

    #[must_use]
    pub fn annotator(&self) -> &DimensionAnnotator {
        &self.annotator
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.interaction.gesture()
    }

    // --- Frame and panels ---

    /// Replace the frame wholesale. Existing panels are pulled back inside.
    pub fn create_frame(&mut self, width: f32, height: f32, depth: f32) -> Result<()> {
        let frame = Frame::new(width, height, depth, &self.tuning)?;
        self.end_gesture();
        if let Some(old) = self.frame_entity.take() {
            self.scene.remove(old);
        }
        let entity = self.scene.add_frame(frame.size());
        self.scene
            .set_placement(entity, &Placement::at(frame.center(self.context.mode)));
        self.frame_entity = Some(entity);
        self.frame = Some(frame);
        self.orbit = Some(OrbitControls::for_frame(&frame));
        self.reset_camera();

        for id in self.panels.ids() {
            self.reclamp(id);
        }
        self.rebuild_snaps();
        log::info!("[frame] {} x {} x {}", width, height, depth);
        Ok(())
    }

    /// Add an untagged panel centered in the frame.
    pub fn add_panel(&mut self, width: f32, height: f32, depth: f32) -> Result<PanelId> {
        self.add_panel_with_type(width, height, depth, "panel")
    }

    pub fn add_panel_with_type(
        &mut self,
        width: f32,
        height: f32,
        depth: f32,
        kind: &str,
    ) -> Result<PanelId> {
        let frame = self.frame.ok_or(Error::NoFrame)?;
        let spec = PanelSpec {
            width: validate_dimension("width", width, &self.tuning)?,
            height: validate_dimension("height", height, &self.tuning)?,
            depth: validate_dimension("depth", depth, &self.tuning)?,
            kind: kind.to_string(),
        };
        frame.check_fits(spec.width, spec.height, spec.depth)?;

        let placement = Placement::at(frame.center(ViewMode::Perspective));
        let id = self.panels.insert(spec, placement, &mut self.scene);
        if self.context.mode == ViewMode::Sheet {
            self.project_panel(id, ViewMode::Sheet);
        }
        if let Some(panel) = self.panels.get(id).filter(|p| !p.omitted) {
            self.snaps.rebuild(panel);
        }
        Ok(id)
    }

    pub fn remove_panel(&mut self, id: PanelId) -> Result<()> {
        if self.annotator.active() == Some(id) || self.gesture_panel() == Some(id) {
            self.end_gesture();
        }
        self.panels
            .remove(id, &mut self.scene)
            .ok_or(Error::UnknownPanel(id))?;
        self.snaps.remove(id);
        Ok(())
    }

    /// Rotate a panel about the view axis and pull it back inside the frame.
    pub fn rotate_panel(&mut self, id: PanelId, radians: f32) -> Result<()> {
        if self.panels.get(id).is_none() {
            return Err(Error::UnknownPanel(id));
        }
        self.panels.set_rotation(id, radians, &mut self.scene);
        if let (Some(frame), Some(panel)) = (self.frame, self.panels.get(id)) {
            let scale = self.enforcer.clamp_scale(&frame, panel, panel.placement().scale);
            self.panels.set_scale(id, scale, &mut self.scene);
        }
        self.reclamp(id);
        if let Some(panel) = self.panels.get(id).filter(|p| !p.omitted) {
            self.snaps.rebuild(panel);
        }
        Ok(())
    }

    // --- Toggles ---

    /// Switch every panel between mesh and outline. Returns the new mode.
    pub fn toggle_mode(&mut self) -> ViewMode {
        self.end_gesture();
        let mode = self.context.mode.toggled();
        self.context.mode = mode;
        for id in self.panels.ids() {
            self.project_panel(id, mode);
            // The frame may have been replaced while the panel was an outline.
            if mode == ViewMode::Perspective {
                self.reclamp(id);
            }
        }
        if let (Some(frame), Some(entity)) = (self.frame, self.frame_entity) {
            self.scene.set_placement(entity, &Placement::at(frame.center(mode)));
        }
        self.reset_camera();
        self.rebuild_snaps();
        log::info!("[mode] switched to {} ({} panels)", mode.label(), self.panels.len());
        mode
    }

    pub fn toggle_snap(&mut self) -> bool {
        self.context.snap_enabled = !self.context.snap_enabled;
        log::info!("[snap] {}", if self.context.snap_enabled { "on" } else { "off" });
        self.context.snap_enabled
    }

    pub fn toggle_transform_controls(&mut self) -> bool {
        self.context.transform_enabled = !self.context.transform_enabled;
        if !self.context.transform_enabled && matches!(self.gesture(), Gesture::Scaling { .. }) {
            self.end_gesture();
        }
        log::info!(
            "[drag] transform controls {}",
            if self.context.transform_enabled { "on" } else { "off" }
        );
        self.context.transform_enabled
    }

    // --- Pointer and gizmo events ---

    /// Nearest panel under `px` in the current mode, without starting a gesture.
    #[must_use]
    pub fn pick_panel(&self, px: Vec2) -> Option<PanelId> {
        let mut targets = Vec::new();
        self.panels.draggable_entities(self.context.mode, &mut targets);
        let ray = self.camera.pixel_to_ray(px, self.viewport);
        self.scene
            .raycast(&ray, &targets)
            .into_iter()
            .find_map(|h| h.owner)
    }

    pub fn pointer_down(&mut self, px: Vec2) -> Option<PanelId> {
        self.with_stage(|interaction, stage| interaction.pointer_down(stage, px))
            .flatten()
    }

    pub fn pointer_move(&mut self, px: Vec2) -> Option<Vec3> {
        self.with_stage(|interaction, stage| interaction.pointer_move(stage, px))
            .flatten()
    }

    pub fn pointer_up(&mut self) -> Option<PanelId> {
        self.with_stage(|interaction, stage| interaction.pointer_up(stage))
            .flatten()
    }

    /// Leaving the canvas ends the gesture like a release.
    pub fn pointer_leave(&mut self) -> Option<PanelId> {
        self.pointer_up()
    }

    pub fn begin_scale(&mut self, id: PanelId) -> bool {
        self.with_stage(|interaction, stage| interaction.begin_scale(stage, id))
            .unwrap_or(false)
    }

    pub fn scale_to(&mut self, scale: Vec3) -> Option<Vec3> {
        self.with_stage(|interaction, stage| interaction.scale_to(stage, scale))
            .flatten()
    }

    pub fn end_scale(&mut self) -> Option<PanelId> {
        self.pointer_up()
    }

    // --- View ---

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport {
            width: width.max(1.0),
            height: height.max(1.0),
        };
        self.reset_camera();
    }

    /// Orbit the perspective camera by pointer deltas; ignored on the sheet.
    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        if self.context.mode != ViewMode::Perspective {
            return;
        }
        if let Some(orbit) = self.orbit.as_mut() {
            if orbit.rotate(d_yaw, d_pitch) {
                orbit.apply(&mut self.camera);
                self.camera_changed();
            }
        }
    }

    pub fn zoom(&mut self, factor: f32) {
        let Some(frame) = self.frame else { return };
        if self.context.mode != ViewMode::Perspective {
            return;
        }
        if let Some(orbit) = self.orbit.as_mut() {
            let extent = frame.largest_extent();
            if orbit.zoom(factor, extent * 0.25, extent * 10.0) {
                orbit.apply(&mut self.camera);
                self.camera_changed();
            }
        }
    }

    /// Controls' change notification: re-project dimension labels.
    pub fn camera_changed(&mut self) {
        self.annotator
            .update_position(&mut self.overlay, &self.camera, self.viewport);
    }

    // --- internals ---

    fn with_stage<R>(
        &mut self,
        f: impl FnOnce(&mut DragInteraction, &mut Stage<'_>) -> R,
    ) -> Option<R> {
        let frame = self.frame.as_ref()?;
        let mut stage = Stage {
            frame,
            panels: &mut self.panels,
            snaps: &mut self.snaps,
            annotator: &mut self.annotator,
            scene: &mut self.scene,
            overlay: &mut self.overlay,
            enforcer: &self.enforcer,
            context: &self.context,
            camera: &self.camera,
            viewport: self.viewport,
        };
        Some(f(&mut self.interaction, &mut stage))
    }

    fn gesture_panel(&self) -> Option<PanelId> {
        match self.interaction.gesture() {
            Gesture::Idle => None,
            Gesture::Dragging { panel, .. } | Gesture::Scaling { panel } => Some(panel),
        }
    }

    fn end_gesture(&mut self) {
        if self.with_stage(|interaction, stage| interaction.pointer_up(stage)).is_none() {
            self.annotator.hide(&mut self.scene, &mut self.overlay);
        }
    }

    fn reset_camera(&mut self) {
        let Some(frame) = self.frame else { return };
        let aspect = self.viewport.aspect();
        self.camera = Camera::for_mode(&frame, self.context.mode, aspect);
        if self.context.mode == ViewMode::Perspective {
            if let Some(orbit) = &self.orbit {
                orbit.apply(&mut self.camera);
            }
        }
        self.camera_changed();
    }

    fn reclamp(&mut self, id: PanelId) {
        let Some(frame) = self.frame else { return };
        let Some(panel) = self.panels.get(id) else { return };
        let scale = self.enforcer.clamp_scale(&frame, panel, panel.placement().scale);
        self.panels.set_scale(id, scale, &mut self.scene);
        let Some(panel) = self.panels.get(id) else { return };
        let position = self
            .enforcer
            .clamp_to_frame(&frame, panel, panel.placement().position);
        self.panels.set_position(id, position, &mut self.scene);
    }

    fn project_panel(&mut self, id: PanelId, mode: ViewMode) {
        let Some(panel) = self.panels.get_mut(id) else { return };
        let result = match mode {
            ViewMode::Sheet => self.projector.project_to_sheet(panel, &mut self.scene),
            ViewMode::Perspective => self.projector.project_to_world(panel, &mut self.scene),
        };
        match result {
            Ok(()) => panel.omitted = false,
            Err(Error::DegenerateGeometry(_)) => {
                log::warn!("[mode] {} skipped: degenerate outline", id);
                panel.omitted = true;
                self.scene.set_visible(panel.entity(), false);
            }
            Err(Error::MissingCounterpart(_)) => {
                log::debug!("[mode] {} has no counterpart, left as is", id);
                if panel.mode() == mode {
                    panel.omitted = false;
                    self.scene.set_visible(panel.entity(), true);
                }
            }
            Err(e) => log::warn!("[mode] {}: {}", id, e),
        }
    }

    fn rebuild_snaps(&mut self) {
        self.snaps.clear();
        for panel in self.panels.iter().filter(|p| !p.omitted) {
            self.snaps.rebuild(panel);
        }
        if let Some(frame) = &self.frame {
            self.snaps
                .rebuild_grid(frame, self.context.mode, self.tuning.grid_divisions);
        }
    }
}
