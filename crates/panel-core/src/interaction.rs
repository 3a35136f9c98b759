//! Pointer gestures: hit-test, constrain, commit, refresh.
//!
//! Idle -> Dragging on a pointer-down over a panel, Dragging stays Dragging on
//! every move (clamp + snap, then commit), back to Idle on pointer-up or
//! pointer-leave. Scaling follows the same shape for transform-control edits.
//! Within one tick the correction is fully resolved before it is committed,
//! and dimension overlays are recomputed only after the commit.

use crate::camera::{Camera, Viewport};
use crate::constraint::{ConstraintEnforcer, Correction};
use crate::context::EditContext;
use crate::dimensions::{DimensionAnnotator, LabelOverlay};
use crate::frame::Frame;
use crate::panel::{PanelId, PanelRegistry};
use crate::plane_drag::PlaneDrag;
use crate::scene::{EntityId, Scene};
use crate::snap::SnapPointIndex;
use glam::{Vec2, Vec3};

/// Everything a gesture step may read or mutate, borrowed for one call.
pub struct Stage<'a> {
    pub frame: &'a Frame,
    pub panels: &'a mut PanelRegistry,
    pub snaps: &'a mut SnapPointIndex,
    pub annotator: &'a mut DimensionAnnotator,
    pub scene: &'a mut dyn Scene,
    pub overlay: &'a mut dyn LabelOverlay,
    pub enforcer: &'a ConstraintEnforcer,
    pub context: &'a EditContext,
    pub camera: &'a Camera,
    pub viewport: Viewport,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging { panel: PanelId, drag: PlaneDrag },
    Scaling { panel: PanelId },
}

#[derive(Debug, Default)]
pub struct DragInteraction {
    gesture: Gesture,
    // Reused between gestures.
    targets: Vec<EntityId>,
}

impl DragInteraction {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    /// Start dragging the nearest panel under `px`. A miss changes nothing.
    pub fn pointer_down(&mut self, stage: &mut Stage<'_>, px: Vec2) -> Option<PanelId> {
        if !self.is_idle() {
            self.finish(stage);
        }
        stage
            .panels
            .draggable_entities(stage.context.mode, &mut self.targets);
        let ray = stage.camera.pixel_to_ray(px, stage.viewport);
        let hit = stage
            .scene
            .raycast(&ray, &self.targets)
            .into_iter()
            .find(|h| h.owner.is_some())?;
        let id = hit.owner?;
        let panel = stage.panels.get(id)?;
        let drag = PlaneDrag::begin(
            stage.camera.forward(),
            hit.point,
            panel.placement().position,
        );
        self.gesture = Gesture::Dragging { panel: id, drag };
        log::debug!(
            "[drag] begin {} at ({:.1},{:.1},{:.1})",
            id,
            hit.point.x,
            hit.point.y,
            hit.point.z
        );
        Some(id)
    }

    /// Move the dragged panel under `px`; returns the committed position.
    pub fn pointer_move(&mut self, stage: &mut Stage<'_>, px: Vec2) -> Option<Vec3> {
        let Gesture::Dragging { panel: id, drag } = self.gesture else {
            return None;
        };
        let ray = stage.camera.pixel_to_ray(px, stage.viewport);
        let Some(candidate) = drag.update(&ray) else {
            log::debug!("[drag] edge-on drag plane, frame skipped");
            return None;
        };
        let panel = stage.panels.get(id)?;
        let corrected = if stage.context.snap_enabled {
            stage.enforcer.snap(stage.frame, stage.snaps, panel, candidate)
        } else {
            Correction::Clamped(stage.enforcer.clamp_to_frame(stage.frame, panel, candidate))
        };
        let position = corrected.position();
        stage.panels.set_position(id, position, stage.scene);
        Some(position)
    }

    /// End whatever gesture is running.
    pub fn pointer_up(&mut self, stage: &mut Stage<'_>) -> Option<PanelId> {
        self.finish(stage)
    }

    /// Enter a scale gesture on `id` when transform controls are on.
    pub fn begin_scale(&mut self, stage: &mut Stage<'_>, id: PanelId) -> bool {
        if !stage.context.transform_enabled || stage.panels.get(id).is_none() {
            return false;
        }
        if !self.is_idle() {
            self.finish(stage);
        }
        self.gesture = Gesture::Scaling { panel: id };
        log::debug!("[drag] begin scale {}", id);
        true
    }

    /// Clamp and commit a scale, re-clamp the position, then refresh dimensions.
    pub fn scale_to(&mut self, stage: &mut Stage<'_>, candidate: Vec3) -> Option<Vec3> {
        let Gesture::Scaling { panel: id } = self.gesture else {
            return None;
        };
        let panel = stage.panels.get(id)?;
        let scale = stage.enforcer.clamp_scale(stage.frame, panel, candidate);
        stage.panels.set_scale(id, scale, stage.scene);

        let panel = stage.panels.get(id)?;
        let position = stage
            .enforcer
            .clamp_to_frame(stage.frame, panel, panel.placement().position);
        stage.panels.set_position(id, position, stage.scene);

        let panel = stage.panels.get(id)?;
        stage
            .annotator
            .show(panel, stage.scene, stage.overlay, stage.camera, stage.viewport);
        Some(scale)
    }

    fn finish(&mut self, stage: &mut Stage<'_>) -> Option<PanelId> {
        let id = match std::mem::take(&mut self.gesture) {
            Gesture::Idle => None,
            Gesture::Dragging { panel, .. } | Gesture::Scaling { panel } => Some(panel),
        };
        stage.annotator.hide(stage.scene, stage.overlay);
        if let Some(panel) = id.and_then(|id| stage.panels.get(id)) {
            stage.snaps.rebuild(panel);
            log::debug!("[drag] end {}", panel.id);
        }
        id
    }
}
