//! Sphere collision against interior walls and floors.
//!
//! Walls push the sphere out horizontally only. Floors are checked when the
//! sphere fits between a floor and the ceiling above it, and move it up or
//! down by at most one slab per query.

use crate::config::InteriorConfig;
use crate::geometry::Cube;
use crate::interior::Interior;

/// Push `pos` out of `c` in XY if a sphere of `radius` there overlaps it.
/// Returns the contact normal.
pub fn sphere_push_out_xy(pos: &mut [f32; 3], radius: f32, c: &Cube) -> Option<[f32; 3]> {
    if pos[2] + radius <= c.z1() || pos[2] - radius >= c.z2() {
        return None;
    }
    let closest = [pos[0].clamp(c.min[0], c.max[0]), pos[1].clamp(c.min[1], c.max[1])];
    let (dx, dy) = (pos[0] - closest[0], pos[1] - closest[1]);
    let dist_sq = dx * dx + dy * dy;
    if dist_sq >= radius * radius {
        return None;
    }
    if dist_sq > 0.0 {
        let dist = dist_sq.sqrt();
        let n = [dx / dist, dy / dist];
        pos[0] = closest[0] + n[0] * radius;
        pos[1] = closest[1] + n[1] * radius;
        return Some([n[0], n[1], 0.0]);
    }
    // center inside the box: leave through the nearest face
    let exits = [
        (pos[0] - c.min[0], [-1.0, 0.0]),
        (c.max[0] - pos[0], [1.0, 0.0]),
        (pos[1] - c.min[1], [0.0, -1.0]),
        (c.max[1] - pos[1], [0.0, 1.0]),
    ];
    let (_, n) = exits
        .iter()
        .copied()
        .fold((f32::MAX, [0.0, 0.0]), |best, e| if e.0 < best.0 { e } else { best });
    if n[0] < 0.0 {
        pos[0] = c.min[0] - radius;
    } else if n[0] > 0.0 {
        pos[0] = c.max[0] + radius;
    } else if n[1] < 0.0 {
        pos[1] = c.min[1] - radius;
    } else {
        pos[1] = c.max[1] + radius;
    }
    Some([n[0], n[1], 0.0])
}

fn sphere_intersects(pos: &[f32; 3], radius: f32, c: &Cube) -> bool {
    let mut dist_sq = 0.0;
    for i in 0..3 {
        let v = pos[i].clamp(c.min[i], c.max[i]) - pos[i];
        dist_sq += v * v;
    }
    dist_sq < radius * radius
}

/// Collide a sphere with the interior, moving `pos` out of any contact.
/// Returns the normal of the last contact, if any.
pub fn sphere_collide_interior(
    interior: &Interior,
    pos: &mut [f32; 3],
    radius: f32,
    xy_only: bool,
    config: &InteriorConfig,
) -> Option<[f32; 3]> {
    let mut normal = None;

    for wall in interior.walls.iter().flatten() {
        if let Some(n) = sphere_push_out_xy(pos, radius, &wall.bounds) {
            normal = Some(n);
        }
    }
    let clearance = config.floor_spacing * (1.0 - config.floor_thick_fract);
    if !xy_only && 2.2 * radius < clearance {
        for slab in &interior.floors {
            let f = &slab.bounds;
            if !sphere_intersects(pos, radius, f) {
                continue;
            }
            if pos[2] < f.z1() {
                // below the slab: drop under the ceiling it sits on
                pos[2] = f.z1() - f.dz() - radius;
                normal = Some([0.0, 0.0, -1.0]);
            } else {
                pos[2] = f.z2() + radius;
                normal = Some([0.0, 0.0, 1.0]);
            }
            break;
        }
    }
    normal
}
