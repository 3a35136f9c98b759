//! Camera-facing plane drag, shared by every viewer that moves things with
//! the pointer.

use crate::constants::PLANE_EPSILON;
use crate::geometry::{intersect_ray_plane, Ray};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneDrag {
    pub origin: Vec3,
    pub normal: Vec3,
    /// Object position minus the grabbed point.
    pub offset: Vec3,
}

impl PlaneDrag {
    /// Plane through `hit_point` facing the camera.
    #[must_use]
    pub fn begin(camera_forward: Vec3, hit_point: Vec3, object_position: Vec3) -> Self {
        Self {
            origin: hit_point,
            normal: -camera_forward,
            offset: object_position - hit_point,
        }
    }

    /// Candidate object position under `ray`; `None` when the plane is edge-on
    /// or behind the ray.
    #[must_use]
    pub fn update(&self, ray: &Ray) -> Option<Vec3> {
        intersect_ray_plane(ray, self.origin, self.normal, PLANE_EPSILON)
            .map(|hit| hit + self.offset)
    }
}
