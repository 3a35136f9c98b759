//! Snap anchors: per-panel corner/edge/center points plus the sheet grid.
//!
//! Anchors live in fixed-size per-panel slots addressed by index, so a rebuild
//! overwrites a slot in place instead of allocating. Slot order is
//! registration order; `nearest` scans slots first, then the grid, and keeps
//! the first anchor on exact ties.

use crate::constants::ANCHORS_PER_PANEL;
use crate::context::ViewMode;
use crate::frame::Frame;
use crate::geometry::Aabb;
use crate::panel::{Panel, PanelId};
use fnv::FnvHashMap;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapPoint {
    /// `None` for grid anchors.
    pub owner: Option<PanelId>,
    pub position: Vec3,
}

/// Result of a nearest-anchor query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapMatch {
    pub point: SnapPoint,
    pub distance: f32,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    owner: PanelId,
    anchors: [Vec3; ANCHORS_PER_PANEL],
    live: bool,
}

#[derive(Debug, Default)]
pub struct SnapPointIndex {
    slots: Vec<Slot>,
    by_owner: FnvHashMap<PanelId, usize>,
    free: Vec<usize>,
    grid: Vec<Vec3>,
}

/// Corners, edge midpoints, center, and the center of the back face.
#[must_use]
pub fn anchors_for(bounds: &Aabb) -> [Vec3; ANCHORS_PER_PANEL] {
    let c = bounds.center();
    let (lo, hi) = (bounds.min, bounds.max);
    [
        Vec3::new(lo.x, lo.y, c.z),
        Vec3::new(hi.x, lo.y, c.z),
        Vec3::new(hi.x, hi.y, c.z),
        Vec3::new(lo.x, hi.y, c.z),
        Vec3::new(c.x, lo.y, c.z),
        Vec3::new(hi.x, c.y, c.z),
        Vec3::new(c.x, hi.y, c.z),
        Vec3::new(lo.x, c.y, c.z),
        c,
        Vec3::new(c.x, c.y, lo.z),
    ]
}

impl SnapPointIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute `panel`'s anchors from its current bounding box.
    pub fn rebuild(&mut self, panel: &Panel) {
        let anchors = anchors_for(&panel.bounds());
        if let Some(&i) = self.by_owner.get(&panel.id) {
            self.slots[i].anchors = anchors;
            return;
        }
        let slot = Slot {
            owner: panel.id,
            anchors,
            live: true,
        };
        let i = if let Some(i) = self.free.pop() {
            self.slots[i] = slot;
            i
        } else {
            self.slots.push(slot);
            self.slots.len() - 1
        };
        self.by_owner.insert(panel.id, i);
    }

    /// Forget `owner`'s anchors; the slot is reused by the next new panel.
    pub fn remove(&mut self, owner: PanelId) {
        if let Some(i) = self.by_owner.remove(&owner) {
            self.slots[i].live = false;
            self.free.push(i);
        }
    }

    /// Regenerate the lattice: sheet mode only, spacing = frame extent / divisions.
    pub fn rebuild_grid(&mut self, frame: &Frame, mode: ViewMode, divisions: u32) {
        self.grid.clear();
        if mode != ViewMode::Sheet || divisions == 0 {
            return;
        }
        let b = frame.bounds(mode);
        let step = b.size() / divisions as f32;
        for j in 0..=divisions {
            for i in 0..=divisions {
                self.grid.push(Vec3::new(
                    b.min.x + step.x * i as f32,
                    b.min.y + step.y * j as f32,
                    b.min.z,
                ));
            }
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.by_owner.clear();
        self.free.clear();
        self.grid.clear();
    }

    /// Closest anchor to `point` within `tolerance`, skipping `exclude`'s own.
    #[must_use]
    pub fn nearest(
        &self,
        point: Vec3,
        exclude: Option<PanelId>,
        tolerance: f32,
    ) -> Option<SnapMatch> {
        let mut best: Option<SnapMatch> = None;
        let mut consider = |owner: Option<PanelId>, position: Vec3| {
            let distance = position.distance(point);
            if distance > tolerance {
                return;
            }
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(SnapMatch {
                    point: SnapPoint { owner, position },
                    distance,
                });
            }
        };
        for slot in self.slots.iter().filter(|s| s.live && Some(s.owner) != exclude) {
            for a in &slot.anchors {
                consider(Some(slot.owner), *a);
            }
        }
        for g in &self.grid {
            consider(None, *g);
        }
        best
    }

    /// Every live anchor, panel anchors first.
    pub fn points(&self) -> impl Iterator<Item = SnapPoint> + '_ {
        self.slots
            .iter()
            .filter(|s| s.live)
            .flat_map(|s| {
                s.anchors.iter().map(move |a| SnapPoint {
                    owner: Some(s.owner),
                    position: *a,
                })
            })
            .chain(self.grid.iter().map(|g| SnapPoint {
                owner: None,
                position: *g,
            }))
    }

    #[must_use]
    pub fn anchors_of(&self, owner: PanelId) -> Option<&[Vec3; ANCHORS_PER_PANEL]> {
        self.by_owner.get(&owner).map(|&i| &self.slots[i].anchors)
    }

    #[must_use]
    pub fn grid_len(&self) -> usize {
        self.grid.len()
    }
}
