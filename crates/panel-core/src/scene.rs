//! The 3D-engine seam.
//!
//! The authored components only talk to the renderer through [`Scene`]:
//! add/remove entities, push transforms, toggle visibility and ask for
//! ordered ray hits. [`SceneGraph`] is the in-memory implementation the web
//! frontend draws from and the tests record against.

use crate::geometry::{ray_aabb, Aabb, Placement, Ray};
use crate::panel::PanelId;
use fnv::FnvHashMap;
use glam::{Vec2, Vec3};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// One ray hit, nearest first when returned from [`Scene::raycast`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub entity: EntityId,
    pub owner: Option<PanelId>,
    pub distance: f32,
    pub point: Vec3,
}

pub trait Scene {
    /// Box mesh of `size`, centered on its placement.
    fn add_mesh(&mut self, owner: PanelId, size: Vec3) -> EntityId;
    /// Flat outline in the local z = 0 plane; triangulated by the scene.
    fn add_outline(&mut self, owner: PanelId, polygon: &[Vec2]) -> EntityId;
    /// Wire box for the frame.
    fn add_frame(&mut self, size: Vec3) -> EntityId;
    /// Dimension line with arrow heads at both ends.
    fn add_dimension_line(&mut self, start: Vec3, end: Vec3) -> EntityId;
    fn set_line(&mut self, id: EntityId, start: Vec3, end: Vec3);
    fn set_placement(&mut self, id: EntityId, placement: &Placement);
    fn set_visible(&mut self, id: EntityId, visible: bool);
    fn remove(&mut self, id: EntityId);
    /// Hits against `targets` only, ordered by distance.
    fn raycast(&self, ray: &Ray, targets: &[EntityId]) -> Vec<Hit>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum EntityKind {
    Frame {
        size: Vec3,
    },
    Mesh {
        owner: PanelId,
        size: Vec3,
    },
    Outline {
        owner: PanelId,
        polygon: Vec<Vec2>,
        triangles: Vec<[usize; 3]>,
    },
    DimensionLine {
        start: Vec3,
        end: Vec3,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub placement: Placement,
    pub visible: bool,
}

impl Entity {
    #[must_use]
    pub fn owner(&self) -> Option<PanelId> {
        match &self.kind {
            EntityKind::Mesh { owner, .. } | EntityKind::Outline { owner, .. } => Some(*owner),
            _ => None,
        }
    }

    /// World-space wireframe segments for drawing.
    pub fn world_edges(&self, out: &mut Vec<[Vec3; 2]>) {
        let m = self.placement.matrix();
        match &self.kind {
            EntityKind::Frame { size } | EntityKind::Mesh { size, .. } => {
                let h = *size * 0.5;
                let corners: [Vec3; 8] = std::array::from_fn(|i| {
                    let sx = if i & 1 == 0 { -h.x } else { h.x };
                    let sy = if i & 2 == 0 { -h.y } else { h.y };
                    let sz = if i & 4 == 0 { -h.z } else { h.z };
                    m.transform_point3(Vec3::new(sx, sy, sz))
                });
                for (a, b) in BOX_EDGES {
                    out.push([corners[a], corners[b]]);
                }
            }
            EntityKind::Outline { polygon, .. } => {
                for (i, p) in polygon.iter().enumerate() {
                    let q = polygon[(i + 1) % polygon.len()];
                    out.push([
                        m.transform_point3(p.extend(0.0)),
                        m.transform_point3(q.extend(0.0)),
                    ]);
                }
            }
            EntityKind::DimensionLine { start, end } => out.push([*start, *end]),
        }
    }

    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let inv = self.placement.matrix().inverse();
        let local = Ray {
            origin: inv.transform_point3(ray.origin),
            dir: inv.transform_vector3(ray.dir),
        };
        match &self.kind {
            EntityKind::Mesh { size, .. } => {
                ray_aabb(&local, &Aabb::from_center_half(Vec3::ZERO, *size * 0.5))
            }
            EntityKind::Outline {
                polygon, triangles, ..
            } => {
                if local.dir.z.abs() < 1e-12 {
                    return None;
                }
                let t = -local.origin.z / local.dir.z;
                if t < 0.0 {
                    return None;
                }
                let p = local.at(t).truncate();
                triangles
                    .iter()
                    .any(|[a, b, c]| point_in_triangle(p, polygon[*a], polygon[*b], polygon[*c]))
                    .then_some(t)
            }
            _ => None,
        }
    }
}

// Corner index bits: x = 1, y = 2, z = 4.
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (p - b).perp_dot(a - b);
    let d2 = (p - c).perp_dot(b - c);
    let d3 = (p - a).perp_dot(c - a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Fan triangulation of a convex polygon.
#[must_use]
pub fn triangulate_convex(vertex_count: usize) -> Vec<[usize; 3]> {
    (1..vertex_count.saturating_sub(1))
        .map(|i| [0, i, i + 1])
        .collect()
}

/// In-memory scene: entity table plus a monotonically increasing id.
#[derive(Debug, Default)]
pub struct SceneGraph {
    entities: FnvHashMap<EntityId, Entity>,
    next_id: u32,
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        let mut ids: Vec<EntityId> = self.entities.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter()
            .filter_map(move |id| self.entities.get(&id).map(|e| (id, e)))
    }

    /// Count of live entities matching `pred`.
    pub fn count(&self, pred: impl Fn(&EntityKind) -> bool) -> usize {
        self.entities.values().filter(|e| pred(&e.kind)).count()
    }

    fn insert(&mut self, kind: EntityKind) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(
            id,
            Entity {
                kind,
                placement: Placement::default(),
                visible: true,
            },
        );
        id
    }
}

impl Scene for SceneGraph {
    fn add_mesh(&mut self, owner: PanelId, size: Vec3) -> EntityId {
        self.insert(EntityKind::Mesh { owner, size })
    }

    fn add_outline(&mut self, owner: PanelId, polygon: &[Vec2]) -> EntityId {
        self.insert(EntityKind::Outline {
            owner,
            polygon: polygon.to_vec(),
            triangles: triangulate_convex(polygon.len()),
        })
    }

    fn add_frame(&mut self, size: Vec3) -> EntityId {
        self.insert(EntityKind::Frame { size })
    }

    fn add_dimension_line(&mut self, start: Vec3, end: Vec3) -> EntityId {
        self.insert(EntityKind::DimensionLine { start, end })
    }

    fn set_line(&mut self, id: EntityId, start: Vec3, end: Vec3) {
        if let Some(Entity {
            kind: EntityKind::DimensionLine { start: s, end: e },
            ..
        }) = self.entities.get_mut(&id)
        {
            *s = start;
            *e = end;
        }
    }

    fn set_placement(&mut self, id: EntityId, placement: &Placement) {
        if let Some(e) = self.entities.get_mut(&id) {
            e.placement = *placement;
        }
    }

    fn set_visible(&mut self, id: EntityId, visible: bool) {
        if let Some(e) = self.entities.get_mut(&id) {
            e.visible = visible;
        }
    }

    fn remove(&mut self, id: EntityId) {
        self.entities.remove(&id);
    }

    fn raycast(&self, ray: &Ray, targets: &[EntityId]) -> Vec<Hit> {
        let mut hits: Vec<Hit> = targets
            .iter()
            .filter_map(|id| {
                let e = self.entities.get(id).filter(|e| e.visible)?;
                let t = e.intersect(ray)?;
                let point = ray.at(t);
                Some(Hit {
                    entity: *id,
                    owner: e.owner(),
                    distance: (point - ray.origin).length(),
                    point,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
