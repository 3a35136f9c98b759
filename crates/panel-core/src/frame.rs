//! The outer bounding volume every panel must stay inside.
//!
//! World space: the frame occupies `[0, W] x [0, H] x [0, D]` with y up.
//! Sheet space (2D drawing): `u = x`, `v = -y`, so the frame covers
//! `[0, W] x [-H, 0]` on the sheet's z = 0 plane.

use crate::context::{Tuning, ViewMode};
use crate::error::{Error, Result};
use crate::geometry::Aabb;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Frame {
    /// Validate user-entered dimensions and build a frame.
    pub fn new(width: f32, height: f32, depth: f32, tuning: &Tuning) -> Result<Self> {
        Ok(Self {
            width: validate_dimension("width", width, tuning)?,
            height: validate_dimension("height", height, tuning)?,
            depth: validate_dimension("depth", depth, tuning)?,
        })
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }

    /// Bounds in the given mode's coordinate convention.
    #[must_use]
    pub fn bounds(&self, mode: ViewMode) -> Aabb {
        match mode {
            ViewMode::Perspective => Aabb::new(Vec3::ZERO, self.size()),
            ViewMode::Sheet => Aabb::new(
                Vec3::new(0.0, -self.height, 0.0),
                Vec3::new(self.width, 0.0, 0.0),
            ),
        }
    }

    #[must_use]
    pub fn center(&self, mode: ViewMode) -> Vec3 {
        self.bounds(mode).center()
    }

    /// The depth coordinate panels are pinned to; never dragged freely.
    #[must_use]
    pub fn plane_z(&self, mode: ViewMode) -> f32 {
        match mode {
            ViewMode::Perspective => self.depth * 0.5,
            ViewMode::Sheet => 0.0,
        }
    }

    #[must_use]
    pub fn largest_extent(&self) -> f32 {
        self.width.max(self.height).max(self.depth)
    }

    /// Check that a panel of the given size can be placed inside this frame.
    pub fn check_fits(&self, width: f32, height: f32, depth: f32) -> Result<()> {
        for (field, value, limit) in [
            ("width", width, self.width),
            ("height", height, self.height),
            ("depth", depth, self.depth),
        ] {
            if value > limit {
                return Err(Error::PanelTooLarge { field, value, limit });
            }
        }
        Ok(())
    }
}

/// Reject non-finite, non-positive or oversized user input.
pub fn validate_dimension(field: &'static str, value: f32, tuning: &Tuning) -> Result<f32> {
    if value.is_finite() && value > 0.0 && value <= tuning.max_dimension {
        Ok(value)
    } else {
        Err(Error::InvalidDimension {
            field,
            value,
            max: tuning.max_dimension,
        })
    }
}
