//! Stairwell and elevator placement, plus stair step geometry.
//!
//! Cutouts are chosen once per part and reused on every story. Hallway
//! parts put both in the corridor; partitioned parts search their rooms
//! from a random starting index. Running out of candidates is not an error;
//! the part simply has no vertical circulation.

use crate::config::InteriorConfig;
use crate::geometry::{Axis, Cube};
use crate::interior::{is_doorway_within, Elevator, Landing, Room};
use rand::Rng;
use std::ops::Range;

/// Placement result for one part.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Circulation {
    pub stairs: Option<Cube>,
    pub stairs_dim: Option<Axis>,
    pub elevator: Option<Elevator>,
}

/// Everything placement needs to know about the part.
#[derive(Debug, Clone, Copy)]
pub struct PartContext<'a> {
    pub part: &'a Cube,
    /// Union of all parts of the building.
    pub bcube: &'a Cube,
    pub is_house: bool,
    pub first_part: bool,
}

/// Stairs and elevator in a hallway. The elevator sits off-center along the
/// hallway and the stairs shift the other way.
///
/// Both cutouts are centered across the hallway and need a walkway of one
/// doorway width in front of each hallway wall, so that no door in `doors`
/// opens onto them. A hallway too narrow for the stairs gets nothing and
/// the caller places circulation in the offices instead.
pub fn place_in_hallway(hall: &Cube, doors: &[Cube], config: &InteriorConfig, rng: &mut impl Rng) -> Circulation {
    let long_dim = hall.long_axis();
    let across = long_dim.other();
    let dw = config.doorway_width();
    let ewidth = config.elevator_width();
    let half = config.wall_half_thick();
    // both sides, with a sliver so the clearance test stays strict
    let walkways = 2.0 * (dw + config.wall_edge_spacing());
    // slightly narrower than the elevator
    let stairs_width = 0.9 * ewidth;
    if hall.size(across) < stairs_width + walkways {
        return Circulation::default();
    }
    let mut stairs = *hall;
    let mut elevator = None;

    if hall.size(across) >= ewidth + walkways {
        let shift = 0.125 * hall.size(long_dim) * if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
        let (dir, is_open) = (rng.gen_bool(0.5), rng.gen_bool(0.5));
        let mut shaft = *hall;
        for axis in Axis::BOTH {
            let center = hall.center(axis) + if axis == long_dim { shift } else { 0.0 };
            shaft.set_lo(axis, center - 0.5 * ewidth);
            shaft.set_hi(axis, center + 0.5 * ewidth);
        }
        if !is_doorway_within(doors, &shaft, dw, half) {
            elevator = Some(Elevator {
                bounds: shaft,
                dim: long_dim,
                dir,
                is_open,
            });
            stairs.translate(long_dim, -shift);
        }
    }
    let stairs_len = 4.0 * dw;
    for axis in Axis::BOTH {
        let target = if axis == long_dim { stairs_len } else { stairs_width };
        let shrink = 0.5 * (stairs.size(axis) - target);
        stairs.set_lo(axis, stairs.lo(axis) + shrink);
        stairs.set_hi(axis, stairs.hi(axis) - shrink);
    }
    if is_doorway_within(doors, &stairs, dw, half) {
        log::debug!("hallway stairs would crowd a doorway");
        return Circulation::default();
    }
    Circulation {
        stairs: Some(stairs),
        stairs_dim: Some(long_dim),
        elevator,
    }
}

/// Try the four corners of `room` for an elevator shaft.
///
/// Corners flush with a part face are skipped so the shaft never blocks a
/// window or a passage into another part.
pub fn place_elevator_in_room(
    room: &Cube,
    part: &Cube,
    doors: &[Cube],
    config: &InteriorConfig,
    rng: &mut impl Rng,
) -> Option<Elevator> {
    let ewidth = config.elevator_width();
    if room.dx().min(room.dy()) < 2.0 * ewidth {
        return None;
    }
    for y in [false, true] {
        for x in [false, true] {
            if room.bound(Axis::X, x) == part.bound(Axis::X, x) || room.bound(Axis::Y, y) == part.bound(Axis::Y, y) {
                continue;
            }
            let (dim_is_y, is_open) = (rng.gen_bool(0.5), rng.gen_bool(0.5));
            let mut shaft = *room;
            for (axis, dir) in [(Axis::X, x), (Axis::Y, y)] {
                let corner = room.bound(axis, dir);
                shaft.set_bound(axis, !dir, if dir { corner - ewidth } else { corner + ewidth });
            }
            // small gap to the room walls
            shaft.expand_xy(-0.01 * ewidth);
            if is_doorway_within(doors, &shaft, config.doorway_width(), config.wall_half_thick()) {
                continue;
            }
            return Some(Elevator {
                bounds: shaft,
                dim: Axis::from_bool(dim_is_y),
                dir: !(if dim_is_y { y } else { x }),
                is_open,
            });
        }
    }
    None
}

/// Fit a stairwell cutout into `room`, stepping along its long axis.
///
/// The cutout is centered, then pushed against one side wall when that
/// doesn't crowd a doorway. Faces that connect to another part are left
/// alone because a doorway may be cut there later.
pub fn place_stairs_in_room(
    room: &Cube,
    ctx: &PartContext,
    doors: &[Cube],
    config: &InteriorConfig,
    rng: &mut impl Rng,
) -> Option<(Cube, Axis)> {
    let dw = config.doorway_width();
    let mut cutout = room.expanded_xy(-config.floor_thickness());
    let (dx, dy) = (cutout.dx(), cutout.dy());
    let stairs_dim = if dx > 1.2 * dy {
        Axis::X
    } else if dy > 1.2 * dx {
        Axis::Y
    } else {
        Axis::from_bool(rng.gen_bool(0.5))
    };
    if cutout.size(stairs_dim) < 4.0 * dw || cutout.size(stairs_dim.other()) < 3.0 * dw {
        return None;
    }
    for axis in Axis::BOTH {
        let is_step_dim = axis == stairs_dim;
        let target = if is_step_dim { 4.0 } else { 1.2 } * dw;
        // leave space to walk around the opening
        let shrink = (cutout.size(axis) - target).max(2.0 * dw);
        cutout.set_lo(axis, cutout.lo(axis) + 0.5 * shrink);
        cutout.set_hi(axis, cutout.hi(axis) - 0.5 * shrink);

        if !is_step_dim {
            let first_dir = rng.gen_bool(0.5);
            for d in [false, true] {
                let dir = d ^ first_dir;
                let face = room.bound(axis, dir);
                if face == ctx.part.bound(axis, dir) && face != ctx.bcube.bound(axis, dir) {
                    continue;
                }
                let mut cand = cutout;
                cand.translate(axis, -0.95 * (cand.bound(axis, dir) - face));
                if !is_doorway_within(doors, &cand, dw, config.wall_half_thick()) {
                    cutout = cand;
                    break;
                }
            }
        }
    }
    cutout.is_strictly_normalized().then_some((cutout, stairs_dim))
}

/// Place vertical circulation for a partitioned part, updating room flags.
///
/// Only the first part of a house is eligible. Non-first parts of other
/// buildings get an elevator half of the time, in a different room from
/// the stairs.
pub fn place_in_rooms(
    rooms: &mut [Room],
    range: Range<usize>,
    ctx: &PartContext,
    doors: &[Cube],
    config: &InteriorConfig,
    rng: &mut impl Rng,
) -> Circulation {
    let mut out = Circulation::default();
    if ctx.is_house && !ctx.first_part {
        return out;
    }
    let num_rooms = range.len();
    if num_rooms == 0 {
        return out;
    }
    let add_elevator = !ctx.is_house && !ctx.first_part && rng.gen_bool(0.5);
    let start = rng.gen_range(0..num_rooms);
    let order: Vec<usize> = (0..num_rooms).map(|n| range.start + (start + n) % num_rooms).collect();

    if add_elevator {
        for &ix in &order {
            if let Some(elevator) = place_elevator_in_room(&rooms[ix].bounds, ctx.part, doors, config, rng) {
                rooms[ix].has_elevator = true;
                rooms[ix].no_geom = true;
                out.elevator = Some(elevator);
                break;
            }
        }
        if out.elevator.is_none() {
            log::debug!("no room fits an elevator");
        }
    }
    for &ix in &order {
        if rooms[ix].has_elevator {
            continue;
        }
        if let Some((stairs, dim)) = place_stairs_in_room(&rooms[ix].bounds, ctx, doors, config, rng) {
            rooms[ix].has_stairs = true;
            out.stairs = Some(stairs);
            out.stairs_dim = Some(dim);
            break;
        }
    }
    if out.stairs.is_none() {
        log::debug!("no room fits a stairwell");
    }
    out
}

/// Step boxes for every stair landing, rising from the floor below.
///
/// `dir` is the building-wide climbing direction along each landing's long
/// axis.
pub fn stair_steps(landings: &[Landing], config: &InteriorConfig, dir: bool) -> Vec<Cube> {
    let num_steps = config.num_stair_steps;
    let spacing = config.floor_spacing;
    let floor_thickness = config.floor_thickness();
    let stair_dz = spacing / (num_steps + 1) as f32;
    let stair_height = stair_dz + floor_thickness;
    let mut steps = Vec::with_capacity(landings.len() * num_steps as usize);

    for landing in landings.iter().filter(|l| !l.for_elevator) {
        let l = &landing.bounds;
        let dim = l.long_axis();
        let step_len = if dir { 1.0 } else { -1.0 } * l.size(dim) / num_steps as f32;
        let floor_z = l.z2() - spacing;
        let mut z = floor_z - floor_thickness;
        let mut pos = l.bound(dim, !dir);
        for _ in 0..num_steps {
            let mut step = *l;
            let (a, b) = (pos, pos + step_len);
            step.set_lo(dim, a.min(b));
            step.set_hi(dim, a.max(b));
            step.set_z(floor_z.max(z), z + stair_height);
            steps.push(step);
            z += stair_dz;
            pos += step_len;
        }
    }
    steps
}
