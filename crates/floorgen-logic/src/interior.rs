//! Output model: the finished interior of one building.
//!
//! Everything is in the building's local, unrotated frame. Rooms, walls and
//! doors span every story of their part (the floorplan is shared by all
//! floors); slabs and landings are per story transition.

use crate::geometry::{Axis, Cube};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Exterior side bits, one per {-X, +X, -Y, +Y}.
pub mod ext_sides {
    pub const X_LO: u8 = 1 << 0;
    pub const X_HI: u8 = 1 << 1;
    pub const Y_LO: u8 = 1 << 2;
    pub const Y_HI: u8 = 1 << 3;
}

/// A terminal rectangle of the floorplan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub bounds: Cube,
    /// Index of the owning part.
    pub part: usize,
    pub is_hallway: bool,
    pub is_office: bool,
    pub has_stairs: bool,
    pub has_elevator: bool,
    /// No further room content (hallways, elevator rooms).
    pub no_geom: bool,
    /// Faces shared with the part's exterior, see [`ext_sides`].
    pub ext_sides: u8,
    /// Bit `f % 64` of word `f / 64` set when story `f` has its ceiling
    /// light on. Grows with the highest lit story.
    pub lit_by_floor: Vec<u64>,
}

impl Room {
    /// New room, computing which faces lie on the part exterior.
    pub fn new(bounds: Cube, part_ix: usize, part: &Cube) -> Self {
        let mut ext = 0u8;
        for (bit, (axis, dir)) in [
            (Axis::X, false),
            (Axis::X, true),
            (Axis::Y, false),
            (Axis::Y, true),
        ]
        .into_iter()
        .enumerate()
        {
            if bounds.bound(axis, dir) == part.bound(axis, dir) {
                ext |= 1 << bit;
            }
        }
        Self {
            bounds,
            part: part_ix,
            is_hallway: false,
            is_office: false,
            has_stairs: false,
            has_elevator: false,
            no_geom: false,
            ext_sides: ext,
            lit_by_floor: Vec::new(),
        }
    }

    /// Window exposure per unit floor area: exterior perimeter over area.
    pub fn light_amount(&self) -> f32 {
        let mut ext_perim = 0.0;
        for bit in 0..4 {
            if self.ext_sides & (1 << bit) != 0 {
                // -X/+X faces run along Y and vice versa
                let along = if bit < 2 { Axis::Y } else { Axis::X };
                ext_perim += self.bounds.size(along);
            }
        }
        ext_perim / self.bounds.area_xy()
    }

    pub fn is_lit_on_floor(&self, floor: u32) -> bool {
        self.lit_by_floor
            .get(floor as usize / 64)
            .is_some_and(|word| word & (1u64 << (floor % 64)) != 0)
    }

    pub fn set_lit_on_floor(&mut self, floor: u32) {
        let word = floor as usize / 64;
        if self.lit_by_floor.len() <= word {
            self.lit_by_floor.resize(word + 1, 0);
        }
        self.lit_by_floor[word] |= 1u64 << (floor % 64);
    }
}

/// What produced a wall segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallKind {
    /// Recursive space partition (and extra doorways cut into those).
    Partition,
    /// Hallway layout walls; never re-split.
    Hallway,
    /// Separator along a boundary shared with another part.
    PartBoundary,
}

/// A wall segment: thin along the axis it splits, floor-to-ceiling in Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub bounds: Cube,
    pub kind: WallKind,
}

/// Elevator shaft with its door orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Elevator {
    pub bounds: Cube,
    /// Axis the doors face along.
    pub dim: Axis,
    /// Doors face the high side of `dim`.
    pub dir: bool,
    pub is_open: bool,
}

/// Per-story cutout record for a stairwell or elevator shaft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landing {
    pub bounds: Cube,
    pub for_elevator: bool,
    pub part: usize,
    /// Story transition index, starting at 1 (between stories 0 and 1).
    pub floor: u32,
}

/// A floor or ceiling slab piece.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slab {
    pub bounds: Cube,
    pub part: usize,
    /// Story boundary index: 0 is the ground floor, `num_floors` the roof.
    pub level: u32,
}

/// Ceiling light fixture for one room on one story.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CeilingLight {
    pub bounds: Cube,
    pub room: usize,
    pub floor: u32,
    pub is_lit: bool,
    pub top_of_stairs: bool,
}

/// Per-part bookkeeping, indices into the [`Interior`] collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartInterior {
    pub num_floors: u32,
    pub use_hallway: bool,
    pub rooms: Range<usize>,
    pub stairs: Option<Cube>,
    pub stairs_dim: Option<Axis>,
    pub elevator: Option<Cube>,
    pub floors: Range<usize>,
    pub ceilings: Range<usize>,
}

/// Finished interior of one building.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interior {
    pub rooms: Vec<Room>,
    /// Walls indexed by the axis they split (X walls are thin in X).
    pub walls: [Vec<Wall>; 2],
    /// Doorway gaps, zero thickness along the wall's split axis.
    pub doors: Vec<Cube>,
    pub stairwells: Vec<Cube>,
    pub elevators: Vec<Elevator>,
    pub landings: Vec<Landing>,
    pub floors: Vec<Slab>,
    pub ceilings: Vec<Slab>,
    pub roof_ceilings: Vec<Slab>,
    pub stair_steps: Vec<Cube>,
    pub lights: Vec<CeilingLight>,
    pub parts: Vec<PartInterior>,
}

impl Interior {
    pub fn walls(&self, axis: Axis) -> &[Wall] {
        &self.walls[axis.index()]
    }

    /// Is `c` within `dmin` of any doorway (XY only)? With `dmin == 0` the
    /// door's own width is used so a door has room to swing.
    pub fn is_cube_close_to_doorway(&self, c: &Cube, dmin: f32) -> bool {
        is_cube_close_to_doorway(&self.doors, c, dmin)
    }

    /// Does `c` come within `dmin` (in XY) of a stairwell or elevator shaft
    /// that shares its height range?
    pub fn is_blocked_by_stairs_or_elevator(&self, c: &Cube, dmin: f32) -> bool {
        self.stairwells
            .iter()
            .chain(self.elevators.iter().map(|e| &e.bounds))
            .any(|s| s.overlaps_z(c) && s.intersects_xy_within(c, dmin))
    }

    /// Can an object with footprint `c` go in `room`, keeping `dmin` clear
    /// of the room walls, doorways and vertical circulation?
    pub fn is_valid_placement_for_room(&self, c: &Cube, room: &Cube, dmin: f32) -> bool {
        let place_area = if dmin != 0.0 {
            room.expanded_xy(-dmin)
        } else {
            *room
        };
        place_area.contains_xy(c)
            && !self.is_cube_close_to_doorway(c, dmin)
            && !self.is_blocked_by_stairs_or_elevator(c, dmin)
    }

    /// Rooms belonging to one part.
    pub fn part_rooms(&self, part: usize) -> &[Room] {
        self.parts
            .get(part)
            .map(|p| &self.rooms[p.rooms.clone()])
            .unwrap_or(&[])
    }

    pub fn num_walls(&self) -> usize {
        self.walls[0].len() + self.walls[1].len()
    }
}

/// Axis a door cube is thin along (the split axis of its wall).
pub fn door_axis(door: &Cube) -> Axis {
    Axis::from_bool(door.dy() < door.dx())
}

/// A door cube grown to the thickness of the wall it was cut from.
pub fn door_slab(door: &Cube, wall_half_thick: f32) -> Cube {
    let dim = door_axis(door);
    let mut c = *door;
    c.set_lo(dim, door.lo(dim) - wall_half_thick);
    c.set_hi(dim, door.hi(dim) + wall_half_thick);
    c
}

/// Does any doorway, as a wall-thick slab sharing `c`'s height range, come
/// within `dmin` of `c` in XY? Same envelope as
/// [`Interior::is_blocked_by_stairs_or_elevator`], seen from the cutout.
pub fn is_doorway_within(doors: &[Cube], c: &Cube, dmin: f32, wall_half_thick: f32) -> bool {
    doors.iter().any(|door| {
        let slab = door_slab(door, wall_half_thick);
        slab.overlaps_z(c) && slab.intersects_xy_within(c, dmin)
    })
}

/// Shared doorway-proximity test, usable before an [`Interior`] exists.
pub fn is_cube_close_to_doorway(doors: &[Cube], c: &Cube, dmin: f32) -> bool {
    doors.iter().any(|door| {
        let dim = door_axis(door);
        let along = dim.other();
        if c.lo(along) > door.hi(along) || c.hi(along) < door.lo(along) {
            return false;
        }
        let min_dist = if dmin == 0.0 { door.size(along) } else { dmin };
        c.lo(dim) < door.hi(dim) + min_dist && c.hi(dim) > door.lo(dim) - min_dist
    })
}
