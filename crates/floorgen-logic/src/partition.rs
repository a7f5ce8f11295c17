//! Recursive space partitioning of a part footprint into rooms.
//!
//! A work list of candidate rectangles is split by walls, each wall getting
//! one doorway. A rectangle stops splitting when it is too small, when no
//! valid wall position turns up within a bounded number of tries, or when
//! its parent was short enough along the split axis.
//!
//! Each candidate carries the doorway intervals of the walls on its own
//! boundary, so later perpendicular walls never land inside a doorway.

use crate::building::{window_spacing, WindowLayout};
use crate::config::InteriorConfig;
use crate::error::InteriorResult;
use crate::geometry::{Axis, Cube};
use rand::Rng;

/// Attempts at a wall position before giving up on a split.
pub const WALL_POS_TRIES: u32 = 20;

/// A rectangle is split along its long axis once it is this much longer.
pub const SPLIT_ASPECT: f32 = 1.25;

/// Doorway intervals on the boundary of a candidate rectangle.
///
/// `lo[axis][side]..hi[axis][side]` is a forbidden range of positions along
/// `axis`, belonging to a doorway in the wall on boundary `side` of the
/// other axis. An empty range (`lo >= hi`) means no doorway.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DoorwayExclusions {
    lo: [[f32; 2]; 2],
    hi: [[f32; 2]; 2],
}

impl DoorwayExclusions {
    pub fn set(&mut self, axis: Axis, side: bool, lo: f32, hi: f32) {
        self.lo[axis.index()][side as usize] = lo;
        self.hi[axis.index()][side as usize] = hi;
    }

    /// Would a wall at `val` along `axis` cut through an inherited doorway?
    pub fn blocks(&self, val: f32, axis: Axis) -> bool {
        let a = axis.index();
        (0..2).any(|s| self.lo[a][s] < self.hi[a][s] && val > self.lo[a][s] && val < self.hi[a][s])
    }
}

/// A pending rectangle on the work list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCandidate {
    pub bounds: Cube,
    pub exclusions: DoorwayExclusions,
}

impl SplitCandidate {
    pub fn new(bounds: Cube) -> Self {
        Self {
            bounds,
            exclusions: DoorwayExclusions::default(),
        }
    }
}

/// Rooms, walls (indexed by split axis) and doors for one part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionOutput {
    pub rooms: Vec<Cube>,
    pub walls: [Vec<Cube>; 2],
    pub doors: Vec<Cube>,
}

/// Random position along `axis`, keeping `max(min_dist_abs, min_dist_param * size)`
/// clear of both ends. `None` if that leaves no room.
pub fn rand_side_pos(
    c: &Cube,
    axis: Axis,
    min_dist_param: f32,
    min_dist_abs: f32,
    rng: &mut impl Rng,
) -> Option<f32> {
    let (lo, hi) = (c.lo(axis), c.hi(axis));
    let gap = min_dist_abs.max(min_dist_param * (hi - lo));
    let (a, b) = (lo + gap, hi - gap);
    if a < b {
        Some(rng.gen_range(a..b))
    } else {
        None
    }
}

/// Pick the split axis: the long axis of an elongated rectangle, else random.
pub fn choose_split_axis(c: &Cube, min_wall_len: f32, rng: &mut impl Rng) -> Axis {
    let (sx, sy) = (c.dx(), c.dy());
    if sy > min_wall_len && sx > SPLIT_ASPECT * sy {
        Axis::X
    } else if sx > min_wall_len && sy > SPLIT_ASPECT * sx {
        Axis::Y
    } else {
        Axis::from_bool(rng.gen_bool(0.5))
    }
}

/// Does `val` fall on the glass of a window, given windows every `spacing`
/// units starting at the part edge? The border is shrunk a little for the
/// window frame.
pub fn is_val_inside_window(part: &Cube, axis: Axis, val: f32, spacing: f32, border: f32) -> bool {
    let border = 0.95 * border;
    let t = (val - part.lo(axis)) / spacing;
    let uv = t - t.floor();
    uv > border && uv < 1.0 - border
}

/// Wall slab through `bounds` at `wall_pos` along `axis`: thin in `axis`,
/// inset from the ends, and clear of the floor and ceiling slabs.
pub fn create_wall(bounds: &Cube, axis: Axis, wall_pos: f32, config: &InteriorConfig) -> Cube {
    let mut wall = *bounds;
    let fc = config.fc_thick();
    wall.set_z(bounds.z1() + fc, bounds.z2() - fc);
    wall.set_lo(axis, wall_pos - config.wall_half_thick());
    wall.set_hi(axis, wall_pos + config.wall_half_thick());
    let along = axis.other();
    let edge = config.wall_edge_spacing();
    wall.set_lo(along, bounds.lo(along) + edge);
    wall.set_hi(along, bounds.hi(along) - edge);
    wall
}

/// Cut the doorway `lo_pos..hi_pos` out of a wall thin in `axis`.
/// Returns the two wall pieces and the zero-thickness door cube.
pub fn cut_doorway(wall: &Cube, axis: Axis, lo_pos: f32, hi_pos: f32) -> InteriorResult<(Cube, Cube, Cube)> {
    let along = axis.other();
    let (low, high) = wall.remove_section(lo_pos, hi_pos, along)?;
    let mut door = low;
    let center = wall.center(axis);
    door.set_lo(axis, center);
    door.set_hi(axis, center);
    door.set_lo(along, lo_pos);
    door.set_hi(along, hi_pos);
    Ok((low, high, door))
}

/// Bounded search for a wall position in `cand` along `axis`.
///
/// Rejects positions inside a window (when the rectangle reaches the part
/// exterior on any side, which covers walls ending on a windowed face) and
/// positions inside an inherited doorway.
pub fn try_wall_pos(
    cand: &SplitCandidate,
    axis: Axis,
    part: &Cube,
    window_spacing: Option<f32>,
    config: &InteriorConfig,
    rng: &mut impl Rng,
) -> Option<f32> {
    let c = &cand.bounds;
    let on_edge = Axis::BOTH
        .iter()
        .any(|&a| c.lo(a) == part.lo(a) || c.hi(a) == part.hi(a));
    let min_gap = 1.5 * config.doorway_width() + config.wall_thick();

    for _ in 0..WALL_POS_TRIES {
        let pos = rand_side_pos(c, axis, 0.25, min_gap, rng)?;
        if on_edge {
            if let Some(spacing) = window_spacing {
                if is_val_inside_window(part, axis, pos, spacing, config.window_border()) {
                    continue;
                }
            }
        }
        if cand.exclusions.blocks(pos, axis) {
            continue;
        }
        return Some(pos);
    }
    None
}

/// Split a part footprint into rooms separated by walls with doorways.
pub fn partition(
    part: &Cube,
    config: &InteriorConfig,
    windows: &dyn WindowLayout,
    rng: &mut impl Rng,
) -> InteriorResult<PartitionOutput> {
    let mut out = PartitionOutput::default();
    let doorway_width = config.doorway_width();

    if part.dx().min(part.dy()) < 2.0 * doorway_width {
        out.rooms.push(*part);
        return Ok(out);
    }
    let spacing = [
        window_spacing(part, Axis::X, windows),
        window_spacing(part, Axis::Y, windows),
    ];
    let min_wall_len = config.min_wall_len();
    let mut to_split = vec![SplitCandidate::new(*part)];

    while let Some(cand) = to_split.pop() {
        let c = cand.bounds;
        if c.dx().min(c.dy()) < min_wall_len {
            out.rooms.push(c);
            continue;
        }
        let wall_dim = choose_split_axis(&c, min_wall_len, rng);
        let Some(wall_pos) = try_wall_pos(&cand, wall_dim, part, spacing[wall_dim.index()], config, rng)
        else {
            out.rooms.push(c);
            continue;
        };
        let along = wall_dim.other();
        let Some(doorway_pos) = rand_side_pos(&c, along, 0.25, doorway_width, rng) else {
            out.rooms.push(c);
            continue;
        };
        let wall = create_wall(&c, wall_dim, wall_pos, config);
        let lo_pos = doorway_pos - config.doorway_half_width();
        let hi_pos = doorway_pos + config.doorway_half_width();
        let (low, high, door) = cut_doorway(&wall, wall_dim, lo_pos, hi_pos)?;
        out.walls[wall_dim.index()].push(low);
        out.walls[wall_dim.index()].push(high);
        out.doors.push(door);

        let do_split = c.size(wall_dim) > config.split_recurse_len();

        for side in [false, true] {
            // side names the boundary of the child that becomes the new wall
            let mut sub = cand;
            sub.bounds.set_bound(wall_dim, side, wall.bound(wall_dim, !side));
            sub.exclusions.set(
                along,
                side,
                lo_pos - config.wall_half_thick(),
                hi_pos + config.wall_half_thick(),
            );
            if do_split {
                to_split.push(sub);
            } else {
                out.rooms.push(sub.bounds);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::UniformWindows;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn big_part() -> Cube {
        Cube::new(0.0, 40.0, 0.0, 30.0, 0.0, 12.0)
    }

    fn run(part: &Cube, seed: u64) -> PartitionOutput {
        let config = InteriorConfig::default();
        let windows = UniformWindows::with_pitch(4.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        partition(part, &config, &windows, &mut rng).unwrap()
    }

    #[test]
    fn test_small_rect_is_single_room() {
        let part = Cube::new(0.0, 7.0, 0.0, 7.5, 0.0, 4.0);
        let out = run(&part, 1);
        assert_eq!(out.rooms, vec![part]);
        assert!(out.walls[0].is_empty() && out.walls[1].is_empty());
        assert!(out.doors.is_empty());
    }

    #[test]
    fn test_sliver_part_is_single_room() {
        let part = Cube::new(0.0, 3.0, 0.0, 50.0, 0.0, 4.0);
        let out = run(&part, 2);
        assert_eq!(out.rooms.len(), 1);
    }

    #[test]
    fn test_rooms_inside_and_disjoint() {
        for seed in 0..20 {
            let part = big_part();
            let out = run(&part, seed);
            assert!(out.rooms.len() > 1, "seed {} produced no split", seed);
            for (i, a) in out.rooms.iter().enumerate() {
                assert!(part.contains_xy(a));
                assert!(!a.is_zero_area());
                for b in out.rooms.iter().skip(i + 1) {
                    assert!(!a.intersects_xy_no_adj(b), "seed {}: rooms overlap", seed);
                }
            }
        }
    }

    #[test]
    fn test_rooms_plus_wall_bands_tile_part() {
        let config = InteriorConfig::default();
        let wt = config.wall_thick();
        for seed in 0..20 {
            let part = big_part();
            let out = run(&part, seed);
            let rooms: f32 = out.rooms.iter().map(|r| r.area_xy()).sum();
            let pieces: f32 = out.walls.iter().flatten().map(|w| w.area_xy()).sum();
            let gaps: f32 = out
                .doors
                .iter()
                .map(|d| d.dx().max(d.dy()) * wt)
                .sum();
            let slivers = out.doors.len() as f32 * 2.0 * config.wall_edge_spacing() * wt;
            let total = rooms + pieces + gaps + slivers;
            assert!(
                (total - part.area_xy()).abs() < 0.01 * part.area_xy(),
                "seed {}: covered {} of {}",
                seed,
                total,
                part.area_xy()
            );
        }
    }

    #[test]
    fn test_doorway_strictly_inside_wall() {
        for seed in 0..20 {
            let out = run(&big_part(), seed);
            for axis in Axis::BOTH {
                let walls = &out.walls[axis.index()];
                assert_eq!(walls.len() % 2, 0);
                for pair in walls.chunks(2) {
                    let along = axis.other();
                    assert!(pair[0].size(along) > 0.0);
                    assert!(pair[1].size(along) > 0.0);
                    assert!(pair[0].hi(along) < pair[1].lo(along));
                }
            }
        }
    }

    #[test]
    fn test_no_wall_crosses_a_doorway() {
        for seed in 0..30 {
            let out = run(&big_part(), seed);
            for door in &out.doors {
                let probe = door.expanded_xy(1e-3);
                for wall in out.walls.iter().flatten() {
                    assert!(
                        !wall.intersects_xy_no_adj(&probe) || {
                            // the two halves of the door's own wall only touch its ends
                            let along = crate::interior::door_axis(door).other();
                            wall.hi(along) <= door.lo(along) + 2e-3
                                || wall.lo(along) >= door.hi(along) - 2e-3
                        },
                        "seed {}: wall {:?} crosses door {:?}",
                        seed,
                        wall,
                        door
                    );
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(run(&big_part(), 5), run(&big_part(), 5));
    }

    #[test]
    fn test_exclusions_block_inside_only() {
        let mut ex = DoorwayExclusions::default();
        assert!(!ex.blocks(1.0, Axis::X));
        ex.set(Axis::X, true, 2.0, 4.0);
        assert!(ex.blocks(3.0, Axis::X));
        assert!(!ex.blocks(2.0, Axis::X));
        assert!(!ex.blocks(3.0, Axis::Y));
    }

    #[test]
    fn test_window_check() {
        let part = Cube::new(0.0, 20.0, 0.0, 10.0, 0.0, 4.0);
        // pitch 4, border 0.25: glass spans 1..3 of each 4-unit cell
        assert!(is_val_inside_window(&part, Axis::X, 6.0, 4.0, 0.25));
        assert!(!is_val_inside_window(&part, Axis::X, 8.1, 4.0, 0.25));
    }

    #[test]
    fn test_wall_ending_on_windowed_face_avoids_glass() {
        let config = InteriorConfig::default();
        let part = Cube::new(0.0, 40.0, 0.0, 10.0, 0.0, 4.0);
        // inner in X, so only the wall's ends reach the exterior (y = 0, y = 10)
        let cand = SplitCandidate::new(Cube::new(8.0, 24.0, 0.0, 10.0, 0.0, 4.0));
        for seed in 0..16 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            if let Some(pos) = try_wall_pos(&cand, Axis::X, &part, Some(4.0), &config, &mut rng) {
                assert!(!is_val_inside_window(&part, Axis::X, pos, 4.0, config.window_border()));
            }
        }
    }

    #[test]
    fn test_try_wall_pos_exhausts_when_fully_excluded() {
        let config = InteriorConfig::default();
        let mut cand = SplitCandidate::new(Cube::new(0.0, 20.0, 0.0, 20.0, 0.0, 4.0));
        cand.exclusions.set(Axis::X, false, 0.0, 20.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let part = Cube::new(-10.0, 30.0, -10.0, 30.0, 0.0, 4.0);
        assert!(try_wall_pos(&cand, Axis::X, &part, None, &config, &mut rng).is_none());
        assert!(try_wall_pos(&cand, Axis::Y, &part, None, &config, &mut rng).is_some());
    }

    #[test]
    fn test_rand_side_pos_empty_range() {
        let c = Cube::new(0.0, 2.0, 0.0, 2.0, 0.0, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(rand_side_pos(&c, Axis::X, 0.25, 1.0, &mut rng).is_none());
        assert!(rand_side_pos(&c, Axis::X, 0.25, 0.2, &mut rng).is_some());
    }
}
