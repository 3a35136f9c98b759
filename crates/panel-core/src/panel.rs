//! Panels and the registry that owns them.
//!
//! A panel is one entity with exactly one live view: a box mesh while the
//! configurator is in perspective mode, a flat outline while it is in sheet
//! mode. The inactive view does not exist; it is regenerated from the live
//! one by the projector on every mode switch.

use crate::context::ViewMode;
use crate::geometry::{Aabb, Placement};
use crate::scene::{EntityId, Scene};
use glam::{Vec2, Vec3};
use smallvec::SmallVec;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub u32);

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The live representation of a panel.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelView {
    /// World-space box mesh.
    Mesh { entity: EntityId, placement: Placement },
    /// Sheet-space outline. `plane_z` is the world depth it was flattened from.
    Outline {
        entity: EntityId,
        placement: Placement,
        polygon: SmallVec<[Vec2; 8]>,
        plane_z: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub id: PanelId,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Free-text tag, e.g. "door".
    pub kind: String,
    pub view: PanelView,
    /// Set when the panel could not be projected into the current mode.
    pub omitted: bool,
}

impl Panel {
    #[must_use]
    pub fn placement(&self) -> &Placement {
        match &self.view {
            PanelView::Mesh { placement, .. } | PanelView::Outline { placement, .. } => placement,
        }
    }

    fn placement_mut(&mut self) -> &mut Placement {
        match &mut self.view {
            PanelView::Mesh { placement, .. } | PanelView::Outline { placement, .. } => placement,
        }
    }

    #[must_use]
    pub fn entity(&self) -> EntityId {
        match &self.view {
            PanelView::Mesh { entity, .. } | PanelView::Outline { entity, .. } => *entity,
        }
    }

    /// Coordinate convention of the live view.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        match self.view {
            PanelView::Mesh { .. } => ViewMode::Perspective,
            PanelView::Outline { .. } => ViewMode::Sheet,
        }
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }

    /// Scaled width and height, ignoring rotation.
    #[must_use]
    pub fn scaled_size(&self) -> Vec2 {
        let s = self.placement().scale;
        Vec2::new(self.width * s.x, self.height * s.y)
    }

    /// Half extents of the axis-aligned box around the scaled, rotated panel.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        let p = self.placement();
        half_extents_for(self.size(), p.scale, p.rotation, self.mode())
    }

    /// Bounding box if the panel were centered at `position`.
    #[must_use]
    pub fn bounds_at(&self, position: Vec3) -> Aabb {
        Aabb::from_center_half(position, self.half_extents())
    }

    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.bounds_at(self.placement().position)
    }
}

/// Half extents of a `size` box under `scale` and a rotation about z.
/// Sheet outlines are flat, so their z extent is zero.
#[must_use]
pub fn half_extents_for(size: Vec3, scale: Vec3, rotation: f32, mode: ViewMode) -> Vec3 {
    let hw = size.x * scale.x * 0.5;
    let hh = size.y * scale.y * 0.5;
    let (s, c) = rotation.sin_cos();
    let (s, c) = (s.abs(), c.abs());
    let hz = match mode {
        ViewMode::Perspective => size.z * scale.z * 0.5,
        ViewMode::Sheet => 0.0,
    };
    Vec3::new(c * hw + s * hh, s * hw + c * hh, hz)
}

/// What `add_panel` needs to know about a new panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelSpec {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub kind: String,
}

/// Owns every panel, in insertion order.
#[derive(Debug, Default)]
pub struct PanelRegistry {
    panels: Vec<Panel>,
    next_id: u32,
}

impl PanelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a panel with a live mesh at `placement` (world convention).
    pub fn insert(
        &mut self,
        spec: PanelSpec,
        placement: Placement,
        scene: &mut dyn Scene,
    ) -> PanelId {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        let entity = scene.add_mesh(id, Vec3::new(spec.width, spec.height, spec.depth));
        scene.set_placement(entity, &placement);
        self.panels.push(Panel {
            id,
            width: spec.width,
            height: spec.height,
            depth: spec.depth,
            kind: spec.kind,
            view: PanelView::Mesh { entity, placement },
            omitted: false,
        });
        log::info!("[panels] added {} ({} panels)", id, self.panels.len());
        id
    }

    /// Drop a panel and its live entity.
    pub fn remove(&mut self, id: PanelId, scene: &mut dyn Scene) -> Option<Panel> {
        let idx = self.panels.iter().position(|p| p.id == id)?;
        let panel = self.panels.remove(idx);
        scene.remove(panel.entity());
        Some(panel)
    }

    #[must_use]
    pub fn get(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Panel> {
        self.panels.iter_mut()
    }

    #[must_use]
    pub fn ids(&self) -> SmallVec<[PanelId; 16]> {
        self.panels.iter().map(|p| p.id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Commit a position to the panel and its live entity.
    pub fn set_position(&mut self, id: PanelId, position: Vec3, scene: &mut dyn Scene) {
        self.update(id, scene, |p| p.position = position);
    }

    pub fn set_scale(&mut self, id: PanelId, scale: Vec3, scene: &mut dyn Scene) {
        self.update(id, scene, |p| p.scale = scale);
    }

    pub fn set_rotation(&mut self, id: PanelId, rotation: f32, scene: &mut dyn Scene) {
        self.update(id, scene, |p| p.rotation = rotation);
    }

    fn update(&mut self, id: PanelId, scene: &mut dyn Scene, f: impl FnOnce(&mut Placement)) {
        if let Some(panel) = self.get_mut(id) {
            f(panel.placement_mut());
            let entity = panel.entity();
            scene.set_placement(entity, panel.placement());
        }
    }

    /// Entities that can be grabbed in `mode`, written into a reused buffer.
    pub fn draggable_entities(&self, mode: ViewMode, out: &mut Vec<EntityId>) {
        out.clear();
        out.extend(
            self.panels
                .iter()
                .filter(|p| !p.omitted && p.mode() == mode)
                .map(Panel::entity),
        );
    }
}
