// Shared editing/tuning constants used by the core and the web frontend.

// Snapping
pub const SNAP_TOLERANCE: f32 = 5.0; // world units between two anchors that still snap
pub const GRID_DIVISIONS: u32 = 10; // sheet grid spacing = frame extent / divisions
pub const ANCHORS_PER_PANEL: usize = 10; // 4 corners, 4 edge midpoints, center, behind

// Dimensions
pub const DIMENSION_MARGIN: f32 = 20.0; // offset of dimension lines from the panel box
pub const DIMENSION_UNIT: &str = "mm";
pub const MAX_DIMENSION: f32 = 100_000.0; // largest accepted width/height/depth

// Scaling
pub const MIN_SCALE: f32 = 0.05;

// Picking / plane math
pub const PLANE_EPSILON: f32 = 1e-6; // |n·d| below this is an edge-on drag plane
pub const DEDUP_EPSILON: f32 = 1e-5; // outline vertices closer than this are one point

// Cameras
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_DISTANCE_FACTOR: f32 = 1.6; // orbit distance = factor * largest frame extent
pub const SHEET_MARGIN: f32 = 1.2; // sheet camera shows the frame plus 20%
pub const DEFAULT_YAW: f32 = 0.45;
pub const DEFAULT_PITCH: f32 = 0.3;
pub const PITCH_LIMIT: f32 = 1.45;
