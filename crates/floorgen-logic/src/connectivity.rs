//! Extra doorways in long walls.
//!
//! Runs once after every part has its walls and vertical circulation. Long
//! wall segments get additional doorways so the floorplan is less of a
//! tree. Part-boundary walls have no doorway yet and are tried harder.

use crate::config::InteriorConfig;
use crate::error::InteriorResult;
use crate::geometry::{Axis, Cube};
use crate::interior::{Interior, Wall, WallKind};
use crate::partition::{cut_doorway, rand_side_pos};
use rand::Rng;

/// Upper bound on doorways cut into one wall segment.
pub const MAX_SPLITS_PER_WALL: u32 = 4;

/// Would a doorway `lo..hi` in `wall` (thin along `axis`) open into the end
/// of a perpendicular wall on the same story?
pub fn blocked_by_perp_wall(wall: &Cube, axis: Axis, lo: f32, hi: f32, perp: &[Wall], wall_thick: f32) -> bool {
    let along = axis.other();
    perp.iter()
        .filter(|p| p.kind != WallKind::Hallway && p.bounds.z1() == wall.z1())
        .any(|p| {
            let p = &p.bounds;
            let overlaps_gap = p.hi(along) >= lo - wall_thick && p.lo(along) <= hi + wall_thick;
            overlaps_gap && p.hi(axis) > wall.lo(axis) - wall_thick && p.lo(axis) < wall.hi(axis) + wall_thick
        })
}

/// Would cutting `lo..hi` out of `wall` leave both pieces between the same
/// two rooms as before, duplicating the doorway the wall already has?
pub fn borders_same_rooms(wall: &Cube, axis: Axis, lo: f32, hi: f32, rooms: &[Cube], wall_thick: f32) -> bool {
    let along = axis.other();
    let segments = [(wall.lo(along) - wall_thick, lo), (hi, wall.hi(along) + wall_thick)];

    segments.iter().any(|&(seg_lo, seg_hi)| {
        [false, true].iter().all(|&side| {
            let face = wall.bound(axis, side);
            rooms.iter().any(|r| {
                r.overlaps_z(wall)
                    && face >= r.lo(axis)
                    && face <= r.hi(axis)
                    && seg_lo > r.lo(along)
                    && seg_hi < r.hi(along)
            })
        })
    })
}

/// Try to add doorways to the walls of `interior`. Returns the number of
/// doorways added.
pub fn refine_connectivity(
    interior: &mut Interior,
    config: &InteriorConfig,
    rng: &mut impl Rng,
) -> InteriorResult<usize> {
    let doorway_width = config.doorway_width();
    let dhw = config.doorway_half_width();
    let wall_thick = config.wall_thick();
    let min_wall_len = config.min_wall_len();
    let rooms: Vec<Cube> = interior.rooms.iter().map(|r| r.bounds).collect();
    let mut added = 0;

    for axis in Axis::BOTH {
        let along = axis.other();
        let mut must_split: Vec<bool> = interior
            .walls(axis)
            .iter()
            .map(|w| w.kind == WallKind::PartBoundary)
            .collect();
        // new pieces are appended and scanned too
        let mut w = 0;
        while w < interior.walls[axis.index()].len() {
            let kind = interior.walls[axis.index()][w].kind;
            if kind == WallKind::Hallway {
                w += 1;
                continue;
            }
            let mut pref_split = must_split[w];

            for _ in 0..MAX_SPLITS_PER_WALL {
                let wall = interior.walls[axis.index()][w].bounds;
                let min_split_len = if pref_split { 0.75 } else { 1.5 } * min_wall_len;
                if wall.size(along) < min_split_len {
                    break;
                }
                let tries = if pref_split { 10 } else { 4 };
                let mut gap = None;

                for _ in 0..tries {
                    let Some(pos) = rand_side_pos(&wall, along, 0.2, 1.5 * doorway_width, rng) else {
                        break;
                    };
                    let (lo, hi) = (pos - dhw, pos + dhw);
                    if blocked_by_perp_wall(&wall, axis, lo, hi, interior.walls(along), wall_thick) {
                        continue;
                    }
                    if !pref_split && borders_same_rooms(&wall, axis, lo, hi, &rooms, wall_thick) {
                        continue;
                    }
                    let mut cand = wall;
                    cand.set_lo(along, lo);
                    cand.set_hi(along, hi);
                    if interior.is_blocked_by_stairs_or_elevator(&cand, doorway_width) {
                        continue;
                    }
                    gap = Some((lo, hi));
                    break;
                }
                let Some((lo, hi)) = gap else {
                    break;
                };
                let (low, high, door) = cut_doorway(&wall, axis, lo, hi)?;
                interior.walls[axis.index()][w].bounds = low;
                interior.walls[axis.index()].push(Wall { bounds: high, kind });
                must_split.push(false);
                interior.doors.push(door);
                added += 1;
                pref_split = false;
            }
            w += 1;
        }
    }
    if added > 0 {
        log::debug!("connectivity refiner added {} doorways", added);
    }
    Ok(added)
}
