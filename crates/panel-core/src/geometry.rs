//! Small value types shared by every component: boxes, rays and placements.

use glam::{Mat4, Quat, Vec3};

/// Axis-aligned box in either world (3D) or sheet (2D) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn from_center_half(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Whether `inner` lies inside `self`, edges included, with `slack` tolerance.
    #[must_use]
    pub fn contains(&self, inner: &Aabb, slack: f32) -> bool {
        inner.min.cmpge(self.min - Vec3::splat(slack)).all()
            && inner.max.cmple(self.max + Vec3::splat(slack)).all()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Position, non-uniform scale and rotation about the view axis.
///
/// The same struct carries a mesh transform (world convention) and an
/// outline transform (sheet convention); which one is meant follows from the
/// view that owns it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub scale: Vec3,
    pub rotation: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: 0.0,
        }
    }
}

impl Placement {
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_rotation_z(self.rotation),
            self.position,
        )
    }
}

/// Intersect a ray with the plane through `plane_origin` with `plane_normal`.
///
/// Returns `None` for an edge-on plane or a hit behind the ray origin.
#[inline]
#[must_use]
pub fn intersect_ray_plane(
    ray: &Ray,
    plane_origin: Vec3,
    plane_normal: Vec3,
    eps: f32,
) -> Option<Vec3> {
    let denom = plane_normal.dot(ray.dir);
    if denom.abs() <= eps {
        return None;
    }
    let t = (plane_origin - ray.origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None;
    }
    Some(ray.at(t))
}

/// Slab test against a box; returns the entry distance along the ray.
#[must_use]
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let mut t_min = 0.0_f32;
    let mut t_max = f32::MAX;
    for axis in 0..3 {
        let o = ray.origin[axis];
        let d = ray.dir[axis];
        let (lo, hi) = (aabb.min[axis], aabb.max[axis]);
        if d.abs() < 1e-12 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (lo - o) * inv;
        let mut t1 = (hi - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}
