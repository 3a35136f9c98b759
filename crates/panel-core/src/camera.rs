//! Cameras for both view modes and the orbit controller.
//!
//! These types avoid platform APIs so picking and label placement can be
//! tested on the host. Pixel coordinates are CSS pixels with the origin at
//! the top-left of the canvas.

use crate::constants::{
    CAMERA_DISTANCE_FACTOR, CAMERA_FOVY_DEG, DEFAULT_PITCH, DEFAULT_YAW, PITCH_LIMIT,
    SHEET_MARGIN,
};
use crate::context::ViewMode;
use crate::frame::Frame;
use crate::geometry::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Perspective { fovy_radians: f32 },
    /// `half_height` is half the visible world height.
    Orthographic { half_height: f32 },
}

/// Right-handed look-at camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub projection: Projection,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Perspective camera framing the whole frame from the default orbit.
    #[must_use]
    pub fn perspective_for(frame: &Frame, aspect: f32) -> Self {
        let mut cam = Self {
            eye: Vec3::ZERO,
            target: frame.center(ViewMode::Perspective),
            up: Vec3::Y,
            aspect,
            projection: Projection::Perspective {
                fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            },
            znear: 1.0,
            zfar: frame.largest_extent() * 20.0,
        };
        OrbitControls::for_frame(frame).apply(&mut cam);
        cam
    }

    /// Top-down sheet camera. It sits behind the sheet looking along +z with
    /// up = -y, so sheet `u` runs right and world "up" runs up on screen.
    #[must_use]
    pub fn sheet_for(frame: &Frame, aspect: f32) -> Self {
        let target = frame.center(ViewMode::Sheet);
        let dist = frame.largest_extent() * 2.0 + 1.0;
        let half_h = frame.height * 0.5 * SHEET_MARGIN;
        let half_w = frame.width * 0.5 * SHEET_MARGIN;
        Self {
            eye: target - Vec3::Z * dist,
            target,
            up: Vec3::NEG_Y,
            aspect,
            projection: Projection::Orthographic {
                half_height: half_h.max(half_w / aspect.max(1e-3)),
            },
            znear: 0.1,
            zfar: dist * 2.0,
        }
    }

    #[must_use]
    pub fn for_mode(frame: &Frame, mode: ViewMode, aspect: f32) -> Self {
        match mode {
            ViewMode::Perspective => Self::perspective_for(frame, aspect),
            ViewMode::Sheet => Self::sheet_for(frame, aspect),
        }
    }

    /// Clip-space projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective { fovy_radians } => {
                Mat4::perspective_rh(fovy_radians, self.aspect, self.znear, self.zfar)
            }
            Projection::Orthographic { half_height } => {
                let half_width = half_height * self.aspect;
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.znear,
                    self.zfar,
                )
            }
        }
    }

    /// World -> view space.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Normalized device coordinates, or `None` behind the camera.
    #[must_use]
    pub fn world_to_ndc(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    #[must_use]
    pub fn ndc_to_pixel(ndc: Vec3, viewport: Viewport) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc.y) * 0.5 * viewport.height,
        )
    }

    #[must_use]
    pub fn world_to_pixel(&self, world: Vec3, viewport: Viewport) -> Option<Vec2> {
        self.world_to_ndc(world)
            .map(|ndc| Self::ndc_to_pixel(ndc, viewport))
    }

    /// World-space ray through a pixel, unprojected at the near and far planes.
    #[must_use]
    pub fn pixel_to_ray(&self, px: Vec2, viewport: Viewport) -> Ray {
        let ndc_x = (2.0 * px.x / viewport.width.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * px.y / viewport.height.max(1.0));
        let inv = self.view_projection().inverse();
        let p_near = inv * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near: Vec3 = p_near.truncate() / p_near.w;
        let far: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: near,
            dir: (far - near).normalize_or_zero(),
        }
    }
}

/// Yaw/pitch/distance orbit around a target; perspective mode only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl OrbitControls {
    #[must_use]
    pub fn for_frame(frame: &Frame) -> Self {
        Self {
            target: frame.center(ViewMode::Perspective),
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            distance: frame.largest_extent() * CAMERA_DISTANCE_FACTOR,
        }
    }

    pub fn apply(&self, camera: &mut Camera) {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        let offset = Vec3::new(sy * cp, sp, cy * cp) * self.distance;
        camera.target = self.target;
        camera.eye = self.target + offset;
        camera.up = Vec3::Y;
    }

    /// Rotate by pointer deltas (radians). Returns whether anything changed.
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) -> bool {
        let before = (self.yaw, self.pitch);
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        before != (self.yaw, self.pitch)
    }

    /// Multiply the distance by `factor`, kept within sane limits.
    pub fn zoom(&mut self, factor: f32, min: f32, max: f32) -> bool {
        let before = self.distance;
        self.distance = (self.distance * factor).clamp(min, max);
        (before - self.distance).abs() > f32::EPSILON
    }
}
