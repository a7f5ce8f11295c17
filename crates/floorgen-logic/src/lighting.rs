//! Ceiling lights, one set per room per story.

use crate::config::InteriorConfig;
use crate::geometry::Cube;
use crate::interior::{CeilingLight, Interior};
use rand::Rng;

/// Light fixture footprint centered in `room`, stretched along the room's
/// long axis. Z is left for the caller.
pub fn light_footprint(room: &Cube, size: f32) -> Cube {
    let long = room.long_axis();
    let mut light = *room;
    for axis in [long, long.other()] {
        let sz = if axis == long { 2.2 } else { 1.0 } * size;
        let center = room.center(axis);
        light.set_lo(axis, center - sz);
        light.set_hi(axis, center + sz);
    }
    light
}

/// Place ceiling lights for every room and story, and set each room's
/// per-story lit bits.
///
/// A light that would hang over a stairwell or elevator is only placed on
/// the top story. Hallways get two lights along their length, three when
/// they hold both stairs and an elevator, and are always lit.
pub fn add_ceiling_lights(interior: &mut Interior, config: &InteriorConfig, rng: &mut impl Rng) {
    let spacing = config.floor_spacing;
    let fc = config.fc_thick();
    let floor_thickness = config.floor_thickness();
    let mut lights = Vec::new();

    for room_ix in 0..interior.rooms.len() {
        let room = &interior.rooms[room_ix];
        let num_floors = interior.parts.get(room.part).map_or(0, |p| p.num_floors);
        let long = room.bounds.long_axis();
        let kind_scale = if room.is_hallway {
            2.0
        } else if room.is_office {
            1.5
        } else {
            1.0
        };
        let mut light = light_footprint(&room.bounds, kind_scale * floor_thickness);
        let blocked = !room.is_hallway && interior.is_blocked_by_stairs_or_elevator(&light, fc);

        let offsets: Vec<f32> = if room.is_hallway {
            let both = room.has_stairs && room.has_elevator;
            let offset = if both { 0.3 } else { 0.2 } * room.bounds.size(long);
            let mut v = vec![offset, -offset];
            if both {
                v.push(0.0);
            }
            v
        } else {
            vec![0.0]
        };
        let is_hallway = room.is_hallway;
        let mut lit_floors = Vec::new();

        for f in 0..num_floors {
            let top_of_stairs = blocked && f + 1 == num_floors;
            if blocked && !top_of_stairs {
                continue;
            }
            let z2 = room.bounds.z1() + (f + 1) as f32 * spacing - fc;
            light.set_z(z2 - 0.5 * fc, z2);
            let mask = if top_of_stairs { 3 } else { 1 };
            let is_lit = is_hallway || (rng.gen::<u32>() & mask) != 0;

            for &delta in &offsets {
                let mut c = light;
                c.translate(long, delta);
                lights.push(CeilingLight {
                    bounds: c,
                    room: room_ix,
                    floor: f,
                    is_lit,
                    top_of_stairs,
                });
            }
            if is_lit {
                lit_floors.push(f);
            }
        }
        let room = &mut interior.rooms[room_ix];
        room.lit_by_floor.clear();
        for f in lit_floors {
            room.set_lit_on_floor(f);
        }
    }
    interior.lights = lights;
}
