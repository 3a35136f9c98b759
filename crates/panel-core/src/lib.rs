pub mod camera;
pub mod configurator;
pub mod constants;
pub mod constraint;
pub mod context;
pub mod dimensions;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod interaction;
pub mod panel;
pub mod plane_drag;
pub mod projector;
pub mod scene;
pub mod snap;

pub use camera::{Camera, OrbitControls, Projection, Viewport};
pub use configurator::Configurator;
pub use constants::*;
pub use constraint::{ConstraintEnforcer, Correction};
pub use context::{EditContext, Tuning, ViewMode};
pub use dimensions::{
    format_dimension, DimensionAnnotator, DimensionLine, LabelBuffer, LabelOverlay,
};
pub use error::{Error, Result};
pub use frame::Frame;
pub use geometry::{Aabb, Placement, Ray};
pub use interaction::{DragInteraction, Gesture, Stage};
pub use panel::{Panel, PanelId, PanelRegistry, PanelSpec, PanelView};
pub use plane_drag::PlaneDrag;
pub use projector::ModeProjector;
pub use scene::{Entity, EntityId, EntityKind, Hit, Scene, SceneGraph};
pub use snap::{SnapMatch, SnapPoint, SnapPointIndex};
