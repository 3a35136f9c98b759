//! Editing context and tuning knobs.
//!
//! `EditContext` is the one place the view mode and the snap/transform
//! toggles live. Every component that behaves differently per mode reads it
//! from here instead of keeping its own flag.

use crate::constants::{
    DIMENSION_MARGIN, GRID_DIVISIONS, MAX_DIMENSION, MIN_SCALE, SNAP_TOLERANCE,
};

/// Which representation of the panels is live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Perspective view, panels are draggable box meshes.
    #[default]
    Perspective,
    /// Orthographic top-down production drawing, panels are flat outlines.
    Sheet,
}

impl ViewMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Perspective => Self::Sheet,
            Self::Sheet => Self::Perspective,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Perspective => "3D",
            Self::Sheet => "2D",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditContext {
    pub mode: ViewMode,
    pub snap_enabled: bool,
    pub transform_enabled: bool,
}

impl Default for EditContext {
    fn default() -> Self {
        Self {
            mode: ViewMode::Perspective,
            snap_enabled: true,
            transform_enabled: false,
        }
    }
}

/// Numeric tuning, defaulting to the values in `constants`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    pub snap_tolerance: f32,
    pub grid_divisions: u32,
    pub dimension_margin: f32,
    pub min_scale: f32,
    pub max_dimension: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            snap_tolerance: SNAP_TOLERANCE,
            grid_divisions: GRID_DIVISIONS,
            dimension_margin: DIMENSION_MARGIN,
            min_scale: MIN_SCALE,
            max_dimension: MAX_DIMENSION,
        }
    }
}
