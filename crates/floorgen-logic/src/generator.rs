//! Interior generation pipeline.
//!
//! Per part: floorplan (hallway layout, or partitioning plus part-boundary
//! walls), then stairs and elevator, then slabs. Once all parts are done,
//! extra doorways are cut, then stair steps and ceiling lights are added.
//!
//! ```
//! use floorgen_logic::building::{Building, BuildingKind, Part, UniformWindows};
//! use floorgen_logic::config::InteriorConfig;
//! use floorgen_logic::geometry::Cube;
//! use floorgen_logic::generator::generate_interior;
//!
//! let config = InteriorConfig::default();
//! let part = Part::from_bounds(Cube::new(0.0, 20.0, 0.0, 14.0, 0.0, 30.0), &config).unwrap();
//! let building = Building {
//!     seed: 42,
//!     kind: BuildingKind::Other,
//!     parts: vec![part],
//!     windows: UniformWindows::with_pitch(4.0),
//! };
//! let interior = generate_interior(&building, &config).unwrap();
//! assert_eq!(interior.parts[0].num_floors, 7);
//! assert_eq!(interior.roof_ceilings.len(), 1);
//! ```

use crate::building::Building;
use crate::circulation::{place_in_hallway, place_in_rooms, stair_steps, Circulation, PartContext};
use crate::config::{validate_config, InteriorConfig};
use crate::connectivity::refine_connectivity;
use crate::error::{InteriorError, InteriorResult};
use crate::geometry::Cube;
use crate::hallway::{hallway_plan_for, layout_hallway};
use crate::interior::{Interior, PartInterior, Room, Wall, WallKind};
use crate::lighting::add_ceiling_lights;
use crate::partition::partition;
use crate::slabs::extrude_part;
use crate::stitch::stitch_walls;
use rand::Rng;

/// Generate the interior of one building.
///
/// Deterministic: the same building and config always produce the same
/// interior.
pub fn generate_interior(building: &Building, config: &InteriorConfig) -> InteriorResult<Interior> {
    let config_errors = validate_config(config);
    if !config_errors.is_empty() {
        let msg = config_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(InteriorError::InvalidConfig(msg));
    }
    building.check_parts(config)?;
    let bcube = building.bcube().ok_or(InteriorError::NoParts {
        building: building.seed,
    })?;
    let mut rng = building.rng();
    let mut interior = Interior::default();

    for (ix, part) in building.parts.iter().enumerate() {
        let p = &part.bounds;
        let rooms_start = interior.rooms.len();
        let plan = hallway_plan_for(&building.parts, ix, building.kind, config, &building.windows);
        let mut hall_ix = None;

        if let Some(plan) = &plan {
            let layout = layout_hallway(p, plan, config);
            for office in layout.offices {
                let mut room = Room::new(office, ix, p);
                room.is_office = true;
                interior.rooms.push(room);
            }
            let mut hall = Room::new(layout.hall, ix, p);
            hall.is_hallway = true;
            hall.no_geom = true;
            hall_ix = Some(interior.rooms.len());
            interior.rooms.push(hall);
            push_walls(&mut interior, layout.walls, WallKind::Hallway);
            interior.doors.extend(layout.doors);
        } else {
            let out = partition(p, config, &building.windows, &mut rng)?;
            interior.rooms.extend(out.rooms.into_iter().map(|r| Room::new(r, ix, p)));
            push_walls(&mut interior, out.walls, WallKind::Partition);
            interior.doors.extend(out.doors);
            for sw in stitch_walls(&building.parts, ix, config) {
                interior.walls[sw.axis.index()].push(Wall {
                    bounds: sw.bounds,
                    kind: WallKind::PartBoundary,
                });
            }
        }
        let rooms = rooms_start..interior.rooms.len();

        let ctx = PartContext {
            part: p,
            bcube: &bcube,
            is_house: building.is_house(),
            first_part: ix == 0,
        };
        let circ = if part.num_floors <= 1 {
            Circulation::default()
        } else if let Some(h) = hall_ix {
            let c = place_in_hallway(&interior.rooms[h].bounds, &interior.doors, config, &mut rng);
            if c.stairs.is_some() {
                interior.rooms[h].has_stairs = true;
                interior.rooms[h].has_elevator = c.elevator.is_some();
                c
            } else {
                // corridor too narrow to keep its doors clear
                place_in_rooms(&mut interior.rooms, rooms.start..h, &ctx, &interior.doors, config, &mut rng)
            }
        } else {
            place_in_rooms(&mut interior.rooms, rooms.clone(), &ctx, &interior.doors, config, &mut rng)
        };
        if let Some(e) = circ.elevator {
            interior.elevators.push(e);
        }
        let (floors, ceilings) = extrude_part(
            &mut interior,
            p,
            ix,
            part.num_floors,
            circ.stairs.as_ref(),
            circ.elevator.as_ref().map(|e| &e.bounds),
            config,
        );
        log::debug!(
            "building {} part {}: {} rooms, hallway {}, stairs {}, elevator {}",
            building.seed,
            ix,
            rooms.len(),
            plan.is_some(),
            circ.stairs.is_some(),
            circ.elevator.is_some()
        );
        interior.parts.push(PartInterior {
            num_floors: part.num_floors,
            use_hallway: plan.is_some(),
            rooms,
            stairs: circ.stairs,
            stairs_dim: circ.stairs_dim,
            elevator: circ.elevator.map(|e| e.bounds),
            floors,
            ceilings,
        });
    }

    refine_connectivity(&mut interior, config, &mut rng)?;
    let step_dir = rng.gen_bool(0.5);
    interior.stair_steps = stair_steps(&interior.landings, config, step_dir);
    add_ceiling_lights(&mut interior, config, &mut rng);

    log::info!(
        "building {}: {} parts, {} rooms, {} walls, {} doors, {} stairwells, {} elevators",
        building.seed,
        building.parts.len(),
        interior.rooms.len(),
        interior.num_walls(),
        interior.doors.len(),
        interior.stairwells.len(),
        interior.elevators.len()
    );
    Ok(interior)
}

fn push_walls(interior: &mut Interior, walls: [Vec<Cube>; 2], kind: WallKind) {
    for (axis_walls, out) in walls.into_iter().zip(interior.walls.iter_mut()) {
        out.extend(axis_walls.into_iter().map(|bounds| Wall { bounds, kind }));
    }
}

/// Generate interiors for many buildings. Results are in input order.
///
/// With the `parallel` feature, buildings are generated on the rayon pool.
/// Each building only reads its own input, so the output does not depend
/// on thread count.
pub fn generate_interiors(buildings: &[Building], config: &InteriorConfig) -> Vec<InteriorResult<Interior>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
        buildings
            .par_iter()
            .map(|b| generate_interior(b, config))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        buildings
            .iter()
            .map(|b| generate_interior(b, config))
            .collect()
    }
}
