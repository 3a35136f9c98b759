//! Width/height dimension overlays shown while a panel is being scaled.
//!
//! Two lines are derived per panel: the width line above the top edge and the
//! height line right of the right edge, both offset by the margin. Line
//! primitives are created once per gesture and moved in place on later ticks;
//! labels are handed to a [`LabelOverlay`] at projected pixel positions.

use crate::camera::{Camera, Viewport};
use crate::constants::DIMENSION_UNIT;
use crate::context::ViewMode;
use crate::panel::{Panel, PanelId};
use crate::scene::{EntityId, Scene};
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq)]
pub struct DimensionLine {
    pub start: Vec3,
    pub end: Vec3,
    pub label: String,
}

impl DimensionLine {
    #[must_use]
    pub fn midpoint(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }
}

/// Where label nodes go. The web frontend backs this with absolutely
/// positioned DOM elements.
pub trait LabelOverlay {
    /// Create or move label `slot`; `None` hides it (point behind the camera).
    fn place(&mut self, slot: usize, text: &str, pixel: Option<Vec2>);
    /// Remove every label node.
    fn clear(&mut self);
}

/// `LabelOverlay` that just remembers what it was told.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelBuffer {
    pub labels: Vec<(String, Option<Vec2>)>,
    pub clears: usize,
}

impl LabelOverlay for LabelBuffer {
    fn place(&mut self, slot: usize, text: &str, pixel: Option<Vec2>) {
        if self.labels.len() <= slot {
            self.labels.resize(slot + 1, (String::new(), None));
        }
        self.labels[slot] = (text.to_string(), pixel);
    }

    fn clear(&mut self) {
        self.labels.clear();
        self.clears += 1;
    }
}

/// Rounded to whole units with the unit suffix, e.g. `"300 mm"`.
#[must_use]
pub fn format_dimension(value: f32) -> String {
    format!("{} {}", value.round() as i64, DIMENSION_UNIT)
}

#[derive(Debug, Default)]
pub struct DimensionAnnotator {
    pub margin: f32,
    lines: SmallVec<[DimensionLine; 2]>,
    primitives: SmallVec<[EntityId; 2]>,
    active: Option<PanelId>,
}

impl DimensionAnnotator {
    #[must_use]
    pub fn new(margin: f32) -> Self {
        Self {
            margin,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<PanelId> {
        self.active
    }

    #[must_use]
    pub fn lines(&self) -> &[DimensionLine] {
        &self.lines
    }

    /// Derive both lines from geometry size x current scale, then draw and label them.
    pub fn show(
        &mut self,
        panel: &Panel,
        scene: &mut dyn Scene,
        overlay: &mut dyn LabelOverlay,
        camera: &Camera,
        viewport: Viewport,
    ) {
        if self.active.is_some_and(|id| id != panel.id) {
            self.hide(scene, overlay);
        }
        let size = panel.scaled_size();
        let (hw, hh) = (size.x * 0.5, size.y * 0.5);
        let c = panel.placement().position;
        // "Up" on the sheet is -v.
        let up = match panel.mode() {
            ViewMode::Perspective => 1.0,
            ViewMode::Sheet => -1.0,
        };
        let top = c.y + up * (hh + self.margin);
        let right = c.x + hw + self.margin;
        let width_line = DimensionLine {
            start: Vec3::new(c.x - hw, top, c.z),
            end: Vec3::new(c.x + hw, top, c.z),
            label: format_dimension(size.x),
        };
        let height_line = DimensionLine {
            start: Vec3::new(right, c.y - up * hh, c.z),
            end: Vec3::new(right, c.y + up * hh, c.z),
            label: format_dimension(size.y),
        };
        self.lines.clear();
        self.lines.push(width_line);
        self.lines.push(height_line);

        if self.primitives.is_empty() {
            for line in &self.lines {
                self.primitives.push(scene.add_dimension_line(line.start, line.end));
            }
        } else {
            for (id, line) in self.primitives.iter().zip(&self.lines) {
                scene.set_line(*id, line.start, line.end);
            }
        }
        self.active = Some(panel.id);
        log::debug!(
            "[dims] {} {} x {}",
            panel.id,
            self.lines[0].label,
            self.lines[1].label
        );
        self.update_position(overlay, camera, viewport);
    }

    /// Re-project label positions after a camera or viewport change.
    pub fn update_position(
        &self,
        overlay: &mut dyn LabelOverlay,
        camera: &Camera,
        viewport: Viewport,
    ) {
        for (slot, line) in self.lines.iter().enumerate() {
            let px = camera.world_to_pixel(line.midpoint(), viewport);
            overlay.place(slot, &line.label, px);
        }
    }

    /// Remove lines and labels; safe to call with nothing shown.
    pub fn hide(&mut self, scene: &mut dyn Scene, overlay: &mut dyn LabelOverlay) {
        if self.active.is_none() && self.primitives.is_empty() {
            return;
        }
        for id in self.primitives.drain(..) {
            scene.remove(id);
        }
        self.lines.clear();
        self.active = None;
        overlay.clear();
    }
}
