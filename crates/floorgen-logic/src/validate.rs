//! Structural validation for generated interiors.
//!
//! Pure functions over a [`Building`] and its [`Interior`] that return
//! validation errors. Used by the integration tests and the harness; they
//! report problems rather than abort.

use crate::building::Building;
use crate::config::InteriorConfig;
use crate::geometry::{Axis, Cube};
use crate::interior::{self, door_axis, Interior};
use std::collections::VecDeque;

/// A structural validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

const EPS: f32 = 1e-4;

/// Grid resolution per axis for the tiling check.
pub const TILING_SAMPLES: usize = 48;

fn error(category: &'static str, message: String) -> ValidationError {
    ValidationError {
        category,
        severity: Severity::Error,
        message,
    }
}

/// Door cube grown to the full wall thickness.
fn door_slab(door: &Cube, config: &InteriorConfig) -> Cube {
    interior::door_slab(door, config.wall_half_thick())
}

// ── A. Room geometry ────────────────────────────────────────────────────

/// Check that no room has zero or negative footprint.
pub fn check_room_dimensions(interior: &Interior) -> Vec<ValidationError> {
    interior
        .rooms
        .iter()
        .enumerate()
        .filter(|(_, r)| r.bounds.is_zero_area())
        .map(|(i, r)| {
            error(
                "room_geometry",
                format!(
                    "Room #{} has non-positive footprint: {}×{}",
                    i,
                    r.bounds.dx(),
                    r.bounds.dy()
                ),
            )
        })
        .collect()
}

/// Check that every room lies inside its owning part.
pub fn check_rooms_within_parts(building: &Building, interior: &Interior) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, r) in interior.rooms.iter().enumerate() {
        match building.parts.get(r.part) {
            Some(p) if p.bounds.contains_xy(&r.bounds) => {}
            Some(_) => errors.push(error(
                "room_geometry",
                format!("Room #{} extends outside part {}", i, r.part),
            )),
            None => errors.push(error(
                "room_geometry",
                format!("Room #{} references missing part {}", i, r.part),
            )),
        }
    }
    errors
}

// ── B. Tiling ───────────────────────────────────────────────────────────

/// Check that rooms never overlap on the same story range.
pub fn check_room_overlaps(interior: &Interior) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let rooms = &interior.rooms;
    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            let (a, b) = (&rooms[i].bounds, &rooms[j].bounds);
            if a.overlaps_z(b) && a.intersects_xy_no_adj(b) {
                errors.push(error(
                    "tiling",
                    format!("Rooms #{} and #{} overlap", i, j),
                ));
            }
        }
    }
    errors
}

/// Check that each part footprint is covered by its rooms, walls and
/// doorways, by sampling a grid of points.
pub fn check_part_tiling(building: &Building, interior: &Interior, config: &InteriorConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let wall_pad = config.wall_edge_spacing() + EPS;
    let walls: Vec<Cube> = interior
        .walls
        .iter()
        .flatten()
        .map(|w| w.bounds.expanded_xy(wall_pad))
        .collect();
    let doors: Vec<Cube> = interior
        .doors
        .iter()
        .map(|d| door_slab(d, config).expanded_xy(EPS))
        .collect();

    for (pi, part) in building.parts.iter().enumerate() {
        let p = &part.bounds;
        let rooms: Vec<&Cube> = interior.part_rooms(pi).iter().map(|r| &r.bounds).collect();
        let mut uncovered = 0;
        let mut example = (0.0, 0.0);

        for ix in 0..TILING_SAMPLES {
            for iy in 0..TILING_SAMPLES {
                let x = p.lo(Axis::X) + (ix as f32 + 0.5) / TILING_SAMPLES as f32 * p.dx();
                let y = p.lo(Axis::Y) + (iy as f32 + 0.5) / TILING_SAMPLES as f32 * p.dy();
                let covered = rooms.iter().any(|r| r.contains_point_xy(x, y))
                    || walls.iter().any(|w| w.contains_point_xy(x, y))
                    || doors.iter().any(|d| d.contains_point_xy(x, y));
                if !covered {
                    uncovered += 1;
                    example = (x, y);
                }
            }
        }
        if uncovered > 0 {
            errors.push(error(
                "tiling",
                format!(
                    "Part {}: {} sample points not covered (e.g. ({:.2}, {:.2}))",
                    pi, uncovered, example.0, example.1
                ),
            ));
        }
    }
    errors
}

// ── C. Doorways ─────────────────────────────────────────────────────────

/// Check that every doorway sits strictly inside a wall: a wall piece of
/// positive length ends at each side of the gap.
pub fn check_doorway_containment(interior: &Interior) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, door) in interior.doors.iter().enumerate() {
        let dim = door_axis(door);
        let along = dim.other();
        let center = door.lo(dim);
        let pieces: Vec<&Cube> = interior
            .walls(dim)
            .iter()
            .map(|w| &w.bounds)
            .filter(|w| (w.center(dim) - center).abs() < EPS && w.overlaps_z(door))
            .collect();
        let low = pieces
            .iter()
            .any(|w| (w.hi(along) - door.lo(along)).abs() < EPS && w.size(along) > 0.0);
        let high = pieces
            .iter()
            .any(|w| (w.lo(along) - door.hi(along)).abs() < EPS && w.size(along) > 0.0);
        if !(low && high) {
            errors.push(error(
                "doorway",
                format!(
                    "Door #{} at {:?}={:.2} is not bounded by wall pieces on both sides",
                    i, dim, center
                ),
            ));
        }
    }
    errors
}

/// Check that every doorway keeps one doorway width of clearance to the
/// stairwells and elevator shafts at its height.
pub fn check_doorways_clear_of_circulation(interior: &Interior, config: &InteriorConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, door) in interior.doors.iter().enumerate() {
        let slab = door_slab(door, config);
        if interior.is_blocked_by_stairs_or_elevator(&slab, config.doorway_width()) {
            errors.push(error(
                "doorway",
                format!(
                    "Door #{} is within {:.2} of a stairwell or elevator",
                    i,
                    config.doorway_width()
                ),
            ));
        }
    }
    errors
}

// ── D. Connectivity ─────────────────────────────────────────────────────

/// Check that the rooms of each part are reachable from each other
/// through doorways (BFS).
pub fn check_part_connectivity(interior: &Interior, config: &InteriorConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let links: Vec<Cube> = interior
        .doors
        .iter()
        .map(|d| door_slab(d, config).expanded_xy(EPS))
        .collect();

    for (pi, part) in interior.parts.iter().enumerate() {
        let range = part.rooms.clone();
        if range.len() <= 1 {
            continue;
        }
        // adjacency over local room indices
        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); range.len()];
        for link in &links {
            let touching: Vec<usize> = range
                .clone()
                .filter(|&r| {
                    let room = &interior.rooms[r].bounds;
                    room.overlaps_z(link) && room.intersects_xy_no_adj(link)
                })
                .map(|r| r - range.start)
                .collect();
            for &a in &touching {
                for &b in &touching {
                    if a != b {
                        adj[a].push(b);
                    }
                }
            }
        }
        let mut visited = vec![false; range.len()];
        let mut queue = VecDeque::new();
        visited[0] = true;
        queue.push_back(0);
        while let Some(current) = queue.pop_front() {
            for &next in &adj[current] {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        let unreached: Vec<usize> = (0..range.len()).filter(|&r| !visited[r]).collect();
        if !unreached.is_empty() {
            errors.push(error(
                "connectivity",
                format!(
                    "Part {}: {} of {} rooms unreachable (e.g. room #{})",
                    pi,
                    unreached.len(),
                    range.len(),
                    range.start + unreached[0]
                ),
            ));
        }
    }
    errors
}

// ── E. Floors and vertical circulation ──────────────────────────────────

/// Check that each part has exactly one more floor slab than ceiling
/// slabs, and a single roof ceiling.
pub fn check_slab_parity(interior: &Interior) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (pi, part) in interior.parts.iter().enumerate() {
        if part.floors.len() != part.ceilings.len() + 1 {
            errors.push(error(
                "slabs",
                format!(
                    "Part {}: {} floors vs {} ceilings",
                    pi,
                    part.floors.len(),
                    part.ceilings.len()
                ),
            ));
        }
        let roofs = interior.roof_ceilings.iter().filter(|s| s.part == pi).count();
        if roofs != 1 {
            errors.push(error(
                "slabs",
                format!("Part {}: {} roof ceilings", pi, roofs),
            ));
        }
    }
    errors
}

/// Check that every landing of a part matches the part's cutout, one per
/// story transition, and that no slab above the ground floor covers a
/// cutout.
pub fn check_cutout_consistency(interior: &Interior) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let same_xy = |a: &Cube, b: &Cube| Axis::BOTH.iter().all(|&ax| a.lo(ax) == b.lo(ax) && a.hi(ax) == b.hi(ax));

    for (pi, part) in interior.parts.iter().enumerate() {
        for (for_elevator, cutout) in [(false, part.stairs), (true, part.elevator)] {
            let landings: Vec<&Cube> = interior
                .landings
                .iter()
                .filter(|l| l.part == pi && l.for_elevator == for_elevator)
                .map(|l| &l.bounds)
                .collect();
            let what = if for_elevator { "elevator" } else { "stairs" };
            let Some(cutout) = cutout else {
                if !landings.is_empty() {
                    errors.push(error(
                        "cutout",
                        format!("Part {}: {} landings without {}", pi, landings.len(), what),
                    ));
                }
                continue;
            };
            if landings.len() + 1 != part.num_floors as usize {
                errors.push(error(
                    "cutout",
                    format!(
                        "Part {}: {} {} landings for {} stories",
                        pi,
                        landings.len(),
                        what,
                        part.num_floors
                    ),
                ));
            }
            if landings.iter().any(|&l| !same_xy(l, &cutout)) {
                errors.push(error(
                    "cutout",
                    format!("Part {}: {} footprint differs between stories", pi, what),
                ));
            }
            let covered = part
                .floors
                .clone()
                .map(|i| &interior.floors[i])
                .chain(part.ceilings.clone().map(|i| &interior.ceilings[i]))
                .filter(|s| s.level > 0)
                .any(|s| s.bounds.intersects_xy_no_adj(&cutout));
            if covered {
                errors.push(error(
                    "cutout",
                    format!("Part {}: a slab covers the {} opening", pi, what),
                ));
            }
        }
    }
    errors
}

/// Check that multi-story parts eligible for vertical circulation have a
/// stairwell. A missing stairwell is tolerated, so this is a warning.
pub fn check_stairwells(building: &Building, interior: &Interior) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (pi, part) in interior.parts.iter().enumerate() {
        let eligible = !building.is_house() || pi == 0;
        if eligible && part.num_floors > 1 && part.stairs.is_none() {
            errors.push(ValidationError {
                category: "circulation",
                severity: Severity::Warning,
                message: format!(
                    "Part {}: {} stories but no stairwell",
                    pi, part.num_floors
                ),
            });
        }
    }
    errors
}

// ── Master validation ───────────────────────────────────────────────────

/// Run all structural validations and return combined results.
pub fn validate_interior(
    building: &Building,
    interior: &Interior,
    config: &InteriorConfig,
) -> Vec<ValidationError> {
    let mut all = Vec::new();
    all.extend(check_room_dimensions(interior));
    all.extend(check_rooms_within_parts(building, interior));
    all.extend(check_room_overlaps(interior));
    all.extend(check_part_tiling(building, interior, config));
    all.extend(check_doorway_containment(interior));
    all.extend(check_doorways_clear_of_circulation(interior, config));
    all.extend(check_part_connectivity(interior, config));
    all.extend(check_slab_parity(interior));
    all.extend(check_cutout_consistency(interior));
    all.extend(check_stairwells(building, interior));
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::{BuildingKind, Part, UniformWindows};
    use crate::interior::{PartInterior, Room, Slab, Wall, WallKind};

    fn part() -> Cube {
        Cube::new(0.0, 10.0, 0.0, 4.0, 0.0, 4.4)
    }

    fn building() -> Building {
        Building {
            seed: 1,
            kind: BuildingKind::Other,
            parts: vec![Part::new(part(), 1)],
            windows: UniformWindows::with_pitch(4.0),
        }
    }

    /// Two rooms split by a wall at x = 5 with one doorway.
    fn two_rooms() -> Interior {
        let p = part();
        let mut interior = Interior::default();
        interior.rooms.push(Room::new(Cube::new(0.0, 4.9, 0.0, 4.0, 0.0, 4.4), 0, &p));
        interior.rooms.push(Room::new(Cube::new(5.1, 10.0, 0.0, 4.0, 0.0, 4.4), 0, &p));
        for (y1, y2) in [(0.01, 1.0), (3.0, 3.99)] {
            interior.walls[0].push(Wall {
                bounds: Cube::new(4.9, 5.1, y1, y2, 0.2, 4.2),
                kind: WallKind::Partition,
            });
        }
        interior.doors.push(Cube::new(5.0, 5.0, 1.0, 3.0, 0.2, 4.2));
        let mut ground = p;
        ground.set_z(0.0, 0.2);
        interior.floors.push(Slab {
            bounds: ground,
            part: 0,
            level: 0,
        });
        let mut roof = p;
        roof.set_z(3.8, 4.0);
        interior.roof_ceilings.push(Slab {
            bounds: roof,
            part: 0,
            level: 1,
        });
        interior.parts.push(PartInterior {
            num_floors: 1,
            use_hallway: false,
            rooms: 0..2,
            stairs: None,
            stairs_dim: None,
            elevator: None,
            floors: 0..1,
            ceilings: 0..0,
        });
        interior
    }

    #[test]
    fn test_valid_interior_no_errors() {
        let errs = validate_interior(&building(), &two_rooms(), &InteriorConfig::default());
        assert!(errs.is_empty(), "{:?}", errs);
    }

    #[test]
    fn test_overlapping_rooms() {
        let mut interior = two_rooms();
        interior.rooms[1].bounds.set_lo(Axis::X, 4.0);
        let errs = check_room_overlaps(&interior);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].category, "tiling");
    }

    #[test]
    fn test_gap_in_tiling() {
        let mut interior = two_rooms();
        interior.rooms[1].bounds.set_lo(Axis::X, 7.0);
        let errs = check_part_tiling(&building(), &interior, &InteriorConfig::default());
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn test_missing_door_breaks_connectivity() {
        let mut interior = two_rooms();
        interior.doors.clear();
        let errs = check_part_connectivity(&interior, &InteriorConfig::default());
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("unreachable"));
    }

    #[test]
    fn test_door_without_wall_piece() {
        let mut interior = two_rooms();
        interior.walls[0].pop();
        let errs = check_doorway_containment(&interior);
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn test_door_into_stairwell() {
        let mut interior = two_rooms();
        interior.stairwells.push(Cube::new(5.0, 8.0, 1.5, 2.5, 0.0, 4.4));
        let errs = check_doorways_clear_of_circulation(&interior, &InteriorConfig::default());
        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn test_stairwell_crowding_door() {
        let config = InteriorConfig::default();
        let mut interior = two_rooms();
        // not touching the door slab at x = 5.1, but within a doorway width
        interior.stairwells.push(Cube::new(6.0, 9.0, 1.0, 3.0, 0.0, 4.4));
        assert_eq!(check_doorways_clear_of_circulation(&interior, &config).len(), 1);
        // a full doorway width plus a margin away
        interior.stairwells[0].set_lo(Axis::X, 7.2);
        assert!(check_doorways_clear_of_circulation(&interior, &config).is_empty());
        // another story
        interior.stairwells[0] = Cube::new(6.0, 9.0, 1.0, 3.0, 4.4, 8.8);
        assert!(check_doorways_clear_of_circulation(&interior, &config).is_empty());
    }

    #[test]
    fn test_slab_parity_and_missing_roof() {
        let mut interior = two_rooms();
        interior.roof_ceilings.clear();
        interior.parts[0].floors = 0..0;
        let errs = check_slab_parity(&interior);
        assert_eq!(errs.len(), 2);
    }

    #[test]
    fn test_missing_stairs_is_warning() {
        let mut interior = two_rooms();
        interior.parts[0].num_floors = 3;
        let errs = check_stairwells(&building(), &interior);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].severity, Severity::Warning);
    }
}
