//! Corridor layout for elongated non-residential parts.
//!
//! Instead of random partitioning, the part gets a central hallway along
//! its long axis with a mirrored row of offices on each side. Offices are
//! one or two window pitches long and each opens onto the hallway through
//! a single centered doorway.

use crate::building::{BuildingKind, Part, WindowLayout};
use crate::config::InteriorConfig;
use crate::geometry::{Axis, Cube};

/// Sizing of a hallway layout, derived from the part and its windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HallwayPlan {
    /// Axis the hallway runs along.
    pub hall_dim: Axis,
    pub num_rooms: u32,
    /// Office length along `hall_dim`; the last office may be shorter.
    pub room_len: f32,
    /// Centerlines of the two hallway walls along the other axis.
    pub hall_wall_pos: [f32; 2],
}

impl HallwayPlan {
    pub fn hall_width(&self) -> f32 {
        self.hall_wall_pos[1] - self.hall_wall_pos[0]
    }
}

/// Walls, doors and rooms of one hallway layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HallwayLayout {
    /// Offices, both rows interleaved.
    pub offices: Vec<Cube>,
    pub walls: [Vec<Cube>; 2],
    pub doors: Vec<Cube>,
    pub hall: Cube,
}

/// Size a hallway layout for `part`, or `None` if the part is too narrow
/// or its windows don't leave room for two rows of offices and a corridor.
pub fn plan_hallway(part: &Cube, config: &InteriorConfig, windows: &dyn WindowLayout) -> Option<HallwayPlan> {
    let min_dim = Axis::from_bool(part.dy() < part.dx());
    let hall_dim = min_dim.other();
    let width = part.size(min_dim);
    if width <= 4.0 * config.min_wall_len() {
        return None;
    }
    let num_windows = windows.windows_on_side(part.lo(hall_dim), part.hi(hall_dim));
    let num_windows_od = windows.windows_on_side(part.lo(min_dim), part.hi(min_dim));
    if num_windows == 0 || num_windows_od < 2 {
        return None;
    }
    let windows_per_room = if num_windows > 5 { 2 } else { 1 };
    let num_rooms = num_windows.div_ceil(windows_per_room);
    let length = part.size(hall_dim);
    let room_len = windows_per_room as f32 * length / num_windows as f32;
    let last_len = length - (num_rooms - 1) as f32 * room_len;

    // one window in the hall for odd counts, wider to leave space for stairs
    let hall_windows = if num_windows_od % 2 == 1 { 1.4 } else { 1.8 };
    let hall_width = hall_windows * width / num_windows_od as f32;
    let room_width = 0.5 * (width - hall_width);

    let min_room_len = config.doorway_width() + 2.0 * config.wall_thick();
    if room_len.min(last_len) <= min_room_len
        || room_width < 2.0 * config.doorway_width()
        || hall_width <= config.doorway_width() + config.wall_thick()
    {
        return None;
    }
    Some(HallwayPlan {
        hall_dim,
        num_rooms,
        room_len,
        hall_wall_pos: [part.lo(min_dim) + room_width, part.hi(min_dim) - room_width],
    })
}

/// Hallway layout for part `ix`, if that part qualifies: non-residential,
/// not stacked on a lower part or under a higher one at the same base, and
/// wide enough per [`plan_hallway`].
pub fn hallway_plan_for(
    parts: &[Part],
    ix: usize,
    kind: BuildingKind,
    config: &InteriorConfig,
    windows: &dyn WindowLayout,
) -> Option<HallwayPlan> {
    if kind == BuildingKind::House {
        return None;
    }
    let z1 = parts[ix].bounds.z1();
    let below_ok = ix == 0 || parts[ix - 1].bounds.z1() < z1;
    let above_ok = ix + 1 == parts.len() || parts[ix + 1].bounds.z1() > z1;
    if !(below_ok && above_ok) {
        return None;
    }
    plan_hallway(&parts[ix].bounds, config, windows)
}

/// Lay out offices, walls and doors for a planned hallway.
pub fn layout_hallway(part: &Cube, plan: &HallwayPlan, config: &InteriorConfig) -> HallwayLayout {
    let hall_dim = plan.hall_dim;
    let min_dim = hall_dim.other();
    let half = config.wall_half_thick();
    let edge = config.wall_edge_spacing();
    let dhw = config.doorway_half_width();
    let n = plan.num_rooms as usize;
    let (lo, hi) = (part.lo(hall_dim), part.hi(hall_dim));

    // office boundaries along the hallway, clamped for a short last office
    let bounds: Vec<f32> = (0..=n)
        .map(|i| if i == n { hi } else { lo + i as f32 * plan.room_len })
        .collect();

    let mut wall_proto = *part;
    wall_proto.set_z(part.z1() + config.fc_thick(), part.z2() - config.fc_thick());

    let mut out = HallwayLayout::default();

    for side in [false, true] {
        let hall_pos = plan.hall_wall_pos[side as usize];
        // face of the hallway wall toward this row
        let row_face = if side { hall_pos + half } else { hall_pos - half };
        let mut gaps = Vec::with_capacity(n);

        for i in 0..n {
            let mut room = *part;
            room.set_bound(min_dim, !side, row_face);
            room.set_lo(hall_dim, if i > 0 { bounds[i] + half } else { bounds[i] });
            room.set_hi(hall_dim, if i + 1 < n { bounds[i + 1] - half } else { bounds[i + 1] });
            out.offices.push(room);

            let center = 0.5 * (bounds[i] + bounds[i + 1]);
            let mut door = wall_proto;
            door.set_lo(min_dim, hall_pos);
            door.set_hi(min_dim, hall_pos);
            door.set_lo(hall_dim, center - dhw);
            door.set_hi(hall_dim, center + dhw);
            out.doors.push(door);
            gaps.push((center - dhw, center + dhw));
        }
        // walls between offices, ending at the hallway wall
        for &b in &bounds[1..n] {
            let mut wall = wall_proto;
            wall.set_lo(hall_dim, b - half);
            wall.set_hi(hall_dim, b + half);
            wall.set_bound(min_dim, side, part.bound(min_dim, side) + if side { -edge } else { edge });
            wall.set_bound(min_dim, !side, row_face);
            out.walls[hall_dim.index()].push(wall);
        }
        // hallway wall: the full length minus the doorway gaps
        let mut start = lo + edge;
        for (gap_lo, gap_hi) in gaps.into_iter().chain(std::iter::once((hi - edge, hi - edge))) {
            if gap_lo > start {
                let mut wall = wall_proto;
                wall.set_lo(min_dim, hall_pos - half);
                wall.set_hi(min_dim, hall_pos + half);
                wall.set_lo(hall_dim, start);
                wall.set_hi(hall_dim, gap_lo);
                out.walls[min_dim.index()].push(wall);
            }
            start = gap_hi;
        }
    }
    out.hall = *part;
    out.hall.set_lo(min_dim, plan.hall_wall_pos[0] + half);
    out.hall.set_hi(min_dim, plan.hall_wall_pos[1] - half);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::UniformWindows;

    fn office_block() -> Cube {
        Cube::new(0.0, 48.0, 0.0, 36.0, 0.0, 20.0)
    }

    fn plan(part: &Cube) -> Option<HallwayPlan> {
        plan_hallway(part, &InteriorConfig::default(), &UniformWindows::with_pitch(4.0))
    }

    #[test]
    fn test_plan_office_block() {
        let p = plan(&office_block()).unwrap();
        assert_eq!(p.hall_dim, Axis::X);
        assert_eq!(p.num_rooms, 6); // 12 windows, 2 per room
        assert!((p.room_len - 8.0).abs() < 1e-4);
        // 9 windows across (odd): 1.4 * 36 / 9
        assert!((p.hall_width() - 5.6).abs() < 1e-4);
    }

    #[test]
    fn test_plan_rejects_narrow_part() {
        assert!(plan(&Cube::new(0.0, 20.0, 0.0, 14.0, 0.0, 30.0)).is_none());
    }

    #[test]
    fn test_house_never_uses_hallway() {
        let config = InteriorConfig::default();
        let parts = vec![Part::new(office_block(), 5)];
        let w = UniformWindows::with_pitch(4.0);
        assert!(hallway_plan_for(&parts, 0, BuildingKind::House, &config, &w).is_none());
        assert!(hallway_plan_for(&parts, 0, BuildingKind::Other, &config, &w).is_some());
    }

    #[test]
    fn test_stacked_part_skips_hallway() {
        let config = InteriorConfig::default();
        let w = UniformWindows::with_pitch(4.0);
        let mut upper = office_block();
        upper.set_z(0.0, 40.0);
        // two parts starting at the same height: the first is not the top of its run
        let parts = vec![Part::new(office_block(), 5), Part::new(upper, 10)];
        assert!(hallway_plan_for(&parts, 0, BuildingKind::Other, &config, &w).is_none());
    }

    #[test]
    fn test_layout_rooms_disjoint_and_doors_on_hall() {
        let part = office_block();
        let p = plan(&part).unwrap();
        let layout = layout_hallway(&part, &p, &InteriorConfig::default());
        assert_eq!(layout.offices.len(), 12);
        assert_eq!(layout.doors.len(), 12);

        let mut all = layout.offices.clone();
        all.push(layout.hall);
        for (i, a) in all.iter().enumerate() {
            assert!(part.contains_xy(a));
            for b in all.iter().skip(i + 1) {
                assert!(!a.intersects_xy_no_adj(b));
            }
        }
        for door in &layout.doors {
            let y = door.lo(Axis::Y);
            assert!(y == p.hall_wall_pos[0] || y == p.hall_wall_pos[1]);
            assert!((door.dx() - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_hall_walls_leave_door_gaps() {
        let part = office_block();
        let p = plan(&part).unwrap();
        let layout = layout_hallway(&part, &p, &InteriorConfig::default());
        let hall_walls = &layout.walls[Axis::Y.index()];
        // 6 doors per side leave 7 pieces per side
        assert_eq!(hall_walls.len(), 14);
        for door in &layout.doors {
            for w in hall_walls {
                assert!(
                    w.hi(Axis::X) <= door.lo(Axis::X) + 1e-4 || w.lo(Axis::X) >= door.hi(Axis::X) - 1e-4,
                    "hall wall {:?} blocks door {:?}",
                    w,
                    door
                );
            }
        }
        // 5 walls between offices per side
        assert_eq!(layout.walls[Axis::X.index()].len(), 10);
    }

    #[test]
    fn test_short_last_office() {
        let part = Cube::new(0.0, 36.0, 0.0, 28.0, 0.0, 12.0);
        let config = InteriorConfig::default();
        let w = UniformWindows::with_pitch(4.0);
        let p = plan_hallway(&part, &config, &w);
        // 28 across is too narrow for two rows and a corridor
        assert!(p.is_none());

        // 36 long: 9 windows, 2 per room, last office holds one window
        let part = Cube::new(0.0, 36.0, 0.0, 34.0, 0.0, 12.0);
        let p = plan_hallway(&part, &config, &w).unwrap();
        assert_eq!(p.hall_dim, Axis::X);
        let layout = layout_hallway(&part, &p, &config);
        let last = layout.offices[layout.offices.len() / 2 - 1];
        assert!(last.dx() < p.room_len);
        assert_eq!(last.hi(Axis::X), part.hi(Axis::X));
    }
}
