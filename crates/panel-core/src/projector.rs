//! Switching a panel between its mesh and its sheet outline.
//!
//! World `(x, y, z)` maps to sheet `(x, -y)`; rotation is negated because the
//! sheet's vertical axis is flipped, scale is copied. The world depth is kept
//! on the outline view so the inverse mapping restores it exactly.

use crate::constants::DEDUP_EPSILON;
use crate::error::{Error, Result};
use crate::geometry::Placement;
use crate::panel::{Panel, PanelView};
use crate::scene::Scene;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

/// World placement -> sheet placement.
#[must_use]
pub fn to_sheet(world: &Placement) -> Placement {
    Placement {
        position: Vec3::new(world.position.x, -world.position.y, 0.0),
        scale: world.scale,
        rotation: -world.rotation,
    }
}

/// Sheet placement -> world placement on the `plane_z` depth.
#[must_use]
pub fn to_world(sheet: &Placement, plane_z: f32) -> Placement {
    Placement {
        position: Vec3::new(sheet.position.x, -sheet.position.y, plane_z),
        scale: sheet.scale,
        rotation: -sheet.rotation,
    }
}

/// Flatten the box's vertices onto z = 0 and return the ordered, deduplicated
/// boundary (counter-clockwise convex hull). Fewer than 3 points means the
/// outline is degenerate.
#[must_use]
pub fn boundary_polygon(size: Vec3) -> SmallVec<[Vec2; 8]> {
    let h = size * 0.5;
    let mut pts: SmallVec<[Vec2; 8]> = SmallVec::new();
    for i in 0..8 {
        let v = Vec3::new(
            if i & 1 == 0 { -h.x } else { h.x },
            if i & 2 == 0 { -h.y } else { h.y },
            if i & 4 == 0 { -h.z } else { h.z },
        );
        let flat = v.truncate();
        if !pts.iter().any(|p| p.distance(flat) <= DEDUP_EPSILON) {
            pts.push(flat);
        }
    }
    convex_hull(pts)
}

// Monotone chain; collinear points are dropped.
fn convex_hull(mut pts: SmallVec<[Vec2; 8]>) -> SmallVec<[Vec2; 8]> {
    if pts.len() < 3 {
        return pts;
    }
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    let half_hull = |points: &mut dyn Iterator<Item = Vec2>| {
        let mut chain: SmallVec<[Vec2; 8]> = SmallVec::new();
        for p in points {
            while chain.len() >= 2 {
                let (o, a) = (chain[chain.len() - 2], chain[chain.len() - 1]);
                if (a - o).perp_dot(p - o) > DEDUP_EPSILON {
                    break;
                }
                chain.pop();
            }
            chain.push(p);
        }
        chain.pop();
        chain
    };
    let mut hull = half_hull(&mut pts.iter().copied());
    hull.extend(half_hull(&mut pts.iter().rev().copied()));
    hull
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ModeProjector;

impl ModeProjector {
    /// Replace the panel's mesh with a sheet outline carrying the mapped transform.
    ///
    /// A degenerate outline leaves the mesh untouched and returns
    /// [`Error::DegenerateGeometry`]; the caller decides how to hide it.
    pub fn project_to_sheet(&self, panel: &mut Panel, scene: &mut dyn Scene) -> Result<()> {
        let PanelView::Mesh { entity, placement } = &panel.view else {
            return Err(Error::MissingCounterpart(panel.id));
        };
        let polygon = boundary_polygon(panel.size());
        if polygon.len() < 3 {
            return Err(Error::DegenerateGeometry(panel.id));
        }
        let (mesh, world) = (*entity, *placement);
        let sheet = to_sheet(&world);
        let outline = scene.add_outline(panel.id, &polygon);
        scene.set_placement(outline, &sheet);
        scene.remove(mesh);
        panel.view = PanelView::Outline {
            entity: outline,
            placement: sheet,
            polygon,
            plane_z: world.position.z,
        };
        Ok(())
    }

    /// Rebuild the mesh from the (possibly edited) outline and drop the outline.
    pub fn project_to_world(&self, panel: &mut Panel, scene: &mut dyn Scene) -> Result<()> {
        let PanelView::Outline {
            entity,
            placement,
            plane_z,
            ..
        } = &panel.view
        else {
            return Err(Error::MissingCounterpart(panel.id));
        };
        let (outline, world) = (*entity, to_world(placement, *plane_z));
        let mesh = scene.add_mesh(panel.id, panel.size());
        scene.set_placement(mesh, &world);
        scene.set_visible(mesh, true);
        scene.remove(outline);
        panel.view = PanelView::Mesh {
            entity: mesh,
            placement: world,
        };
        Ok(())
    }
}
