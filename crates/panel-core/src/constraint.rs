//! Containment and snapping for candidate positions.
//!
//! Clamping never rejects a candidate: every axis whose edge would leave the
//! frame is pulled back so the edge sits exactly on the frame edge, and the
//! depth axis is pinned to the frame's mid plane. Snapping runs on top of the
//! clamped position and is discarded when it would push the box back out.

use crate::constants::PLANE_EPSILON;
use crate::context::ViewMode;
use crate::frame::Frame;
use crate::panel::{half_extents_for, Panel};
use crate::snap::{anchors_for, SnapPointIndex};
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstraintEnforcer {
    pub tolerance: f32,
    pub min_scale: f32,
}

/// How a candidate was corrected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Correction {
    Clamped(Vec3),
    Snapped { position: Vec3, target: Vec3 },
}

impl Correction {
    #[must_use]
    pub fn position(&self) -> Vec3 {
        match *self {
            Self::Clamped(p) | Self::Snapped { position: p, .. } => p,
        }
    }
}

#[inline]
fn clamp_axis(candidate: f32, half: f32, lo: f32, hi: f32) -> f32 {
    let lo = lo + half;
    let hi = hi - half;
    if lo > hi {
        // Wider than the frame on this axis: center it.
        return (lo + hi) * 0.5;
    }
    // max/min rather than clamp: a NaN candidate lands on `lo`.
    candidate.max(lo).min(hi)
}

impl ConstraintEnforcer {
    #[must_use]
    pub fn new(tolerance: f32, min_scale: f32) -> Self {
        Self {
            tolerance,
            min_scale,
        }
    }

    /// Pull `candidate` back so the panel's box lies inside the frame.
    #[must_use]
    pub fn clamp_to_frame(&self, frame: &Frame, panel: &Panel, candidate: Vec3) -> Vec3 {
        let mode = panel.mode();
        let bounds = frame.bounds(mode);
        let half = panel.half_extents();
        Vec3::new(
            clamp_axis(candidate.x, half.x, bounds.min.x, bounds.max.x),
            clamp_axis(candidate.y, half.y, bounds.min.y, bounds.max.y),
            frame.plane_z(mode),
        )
    }

    /// Whether the panel centered at `position` is inside the frame and on its plane.
    ///
    /// Containment has no slack: a box touching an edge fits, one past it does not.
    #[must_use]
    pub fn fits(&self, frame: &Frame, panel: &Panel, position: Vec3) -> bool {
        let mode = panel.mode();
        frame.bounds(mode).contains(&panel.bounds_at(position), 0.0)
            && (position.z - frame.plane_z(mode)).abs() <= PLANE_EPSILON
    }

    /// Clamp, then pull toward the closest foreign anchor within tolerance.
    ///
    /// The snap is only kept if the translated box still fits the frame; a
    /// position that was already flush with a frame edge may still snap as
    /// long as the translation keeps it inside.
    #[must_use]
    pub fn snap(
        &self,
        frame: &Frame,
        index: &SnapPointIndex,
        panel: &Panel,
        candidate: Vec3,
    ) -> Correction {
        let clamped = self.clamp_to_frame(frame, panel, candidate);
        let own = anchors_for(&panel.bounds_at(clamped));
        let mut best: Option<(f32, Vec3, Vec3)> = None;
        for a in own {
            if let Some(m) = index.nearest(a, Some(panel.id), self.tolerance) {
                if best.map_or(true, |(d, _, _)| m.distance < d) {
                    best = Some((m.distance, a, m.point.position));
                }
            }
        }
        let Some((_, from, target)) = best else {
            return Correction::Clamped(clamped);
        };
        let mut delta = target - from;
        delta.z = 0.0;
        let snapped = clamped + delta;
        if self.fits(frame, panel, snapped) {
            log::debug!("[snap] {} -> ({:.1},{:.1})", panel.id, target.x, target.y);
            Correction::Snapped {
                position: snapped,
                target,
            }
        } else {
            log::debug!("[snap] rejected for {}: would leave frame", panel.id);
            Correction::Clamped(clamped)
        }
    }

    /// Limit a candidate scale so the scaled, rotated panel still fits the frame.
    #[must_use]
    pub fn clamp_scale(&self, frame: &Frame, panel: &Panel, candidate: Vec3) -> Vec3 {
        let mode = panel.mode();
        let room = frame.bounds(mode).size();
        let size = panel.size();
        let limit = |c: f32, dim: f32, space: f32| {
            let max = (space / dim).max(self.min_scale);
            c.max(self.min_scale).min(max)
        };
        let mut scale = Vec3::new(
            limit(candidate.x, size.x, room.x),
            limit(candidate.y, size.y, room.y),
            match mode {
                ViewMode::Perspective => limit(candidate.z, size.z, room.z),
                ViewMode::Sheet => candidate.z.max(self.min_scale),
            },
        );
        // Rotation can still push the box past the frame; shrink uniformly in-plane.
        let rotation = panel.placement().rotation;
        let half = half_extents_for(size, scale, rotation, mode);
        let fit = Vec2::new(room.x * 0.5 / half.x, room.y * 0.5 / half.y).min_element();
        if fit < 1.0 {
            scale.x = (scale.x * fit).max(self.min_scale);
            scale.y = (scale.y * fit).max(self.min_scale);
        }
        scale
    }
}
