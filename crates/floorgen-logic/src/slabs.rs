//! Floor and ceiling slabs for every story of a part.
//!
//! Each story boundary inside the part gets a ceiling slab below it and a
//! floor slab above it, both with the stairwell and elevator footprints cut
//! out. The ground floor and the roof ceiling are solid.

use crate::config::InteriorConfig;
use crate::geometry::{subtract_from_all, Cube};
use crate::interior::{Interior, Landing, Slab};
use std::ops::Range;

/// Footprint pieces left after removing `cutouts` from `part`.
pub fn slab_pieces(part: &Cube, cutouts: &[Cube]) -> Vec<Cube> {
    cutouts
        .iter()
        .fold(vec![*part], |rects, cut| subtract_from_all(&rects, cut))
}

/// Emit slabs and landings for one part into `interior`.
///
/// Returns the index ranges of the part's floors and ceilings.
pub fn extrude_part(
    interior: &mut Interior,
    part: &Cube,
    part_ix: usize,
    num_floors: u32,
    stairs: Option<&Cube>,
    elevator: Option<&Cube>,
    config: &InteriorConfig,
) -> (Range<usize>, Range<usize>) {
    let fc = config.fc_thick();
    let spacing = config.floor_spacing;
    let floors_start = interior.floors.len();
    let ceilings_start = interior.ceilings.len();

    let mut ground = *part;
    ground.set_z(part.z1(), part.z1() + fc);
    interior.floors.push(Slab {
        bounds: ground,
        part: part_ix,
        level: 0,
    });

    // elevator first, it is the larger cutout
    let cutouts: Vec<Cube> = elevator.into_iter().chain(stairs).copied().collect();
    let pieces = slab_pieces(part, &cutouts);

    for f in 1..num_floors {
        let z = part.z1() + f as f32 * spacing;
        let (zc, zf) = (z - fc, z + fc);

        if let Some(s) = stairs {
            if f == 1 {
                interior.stairwells.push(*s);
            }
            let mut landing = *s;
            landing.set_z(zc, zf);
            interior.landings.push(Landing {
                bounds: landing,
                for_elevator: false,
                part: part_ix,
                floor: f,
            });
        }
        if let Some(e) = elevator {
            let mut landing = *e;
            landing.set_z(zc, zf);
            interior.landings.push(Landing {
                bounds: landing,
                for_elevator: true,
                part: part_ix,
                floor: f,
            });
        }
        for piece in &pieces {
            let mut c = *piece;
            c.set_z(zc, z);
            interior.ceilings.push(Slab {
                bounds: c,
                part: part_ix,
                level: f,
            });
            c.set_z(z, zf);
            interior.floors.push(Slab {
                bounds: c,
                part: part_ix,
                level: f,
            });
        }
    }

    let z = part.z1() + num_floors as f32 * spacing;
    let mut roof = *part;
    roof.set_z(z - fc, z);
    interior.roof_ceilings.push(Slab {
        bounds: roof,
        part: part_ix,
        level: num_floors,
    });

    (
        floors_start..interior.floors.len(),
        ceilings_start..interior.ceilings.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Axis;

    fn tower() -> Cube {
        Cube::new(0.0, 20.0, 0.0, 14.0, 0.0, 30.0)
    }

    #[test]
    fn test_tower_slab_counts() {
        let config = InteriorConfig::default();
        let stairs = Cube::new(2.0, 9.2, 3.0, 5.4, 0.0, 30.0);
        let mut interior = Interior::default();
        let (floors, ceilings) = extrude_part(&mut interior, &tower(), 0, 7, Some(&stairs), None, &config);

        // ground floor at full size, 6 transitions cut into 4 pieces each
        assert_eq!(floors.len(), 1 + 6 * 4);
        assert_eq!(ceilings.len(), 6 * 4);
        assert_eq!(floors.len() - ceilings.len(), 1);
        assert_eq!(interior.floors[0].bounds.area_xy(), 280.0);
        assert_eq!(interior.roof_ceilings.len(), 1);
        assert_eq!(interior.landings.len(), 6);
        assert_eq!(interior.stairwells, vec![stairs]);

        let roof = interior.roof_ceilings[0].bounds;
        assert!((roof.z2() - 28.0).abs() < 1e-4);
    }

    #[test]
    fn test_cutout_never_covered() {
        let config = InteriorConfig::default();
        let stairs = Cube::new(2.0, 9.2, 3.0, 5.4, 0.0, 30.0);
        let elevator = Cube::new(10.0, 13.0, 3.0, 6.0, 0.0, 30.0);
        let mut interior = Interior::default();
        extrude_part(&mut interior, &tower(), 0, 3, Some(&stairs), Some(&elevator), &config);

        for slab in interior.floors.iter().skip(1).chain(&interior.ceilings) {
            assert!(!slab.bounds.intersects_xy_no_adj(&stairs));
            assert!(!slab.bounds.intersects_xy_no_adj(&elevator));
        }
        let per_level: f32 = interior
            .floors
            .iter()
            .filter(|s| s.level == 1)
            .map(|s| s.bounds.area_xy())
            .sum();
        let expected = 280.0 - stairs.area_xy() - elevator.area_xy();
        assert!((per_level - expected).abs() < 1e-3);
        assert_eq!(interior.landings.len(), 4);
    }

    #[test]
    fn test_flush_cutout_drops_zero_area_piece() {
        let part = tower();
        let cut = Cube::new(0.0, 4.0, 0.0, 14.0, 0.0, 30.0);
        let pieces = slab_pieces(&part, &[cut]);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].lo(Axis::X), 4.0);
    }

    #[test]
    fn test_single_story_has_no_transitions() {
        let config = InteriorConfig::default();
        let part = Cube::new(0.0, 10.0, 0.0, 10.0, 0.0, 4.4);
        let mut interior = Interior::default();
        let (floors, ceilings) = extrude_part(&mut interior, &part, 0, 1, None, None, &config);
        assert_eq!(floors.len(), 1);
        assert!(ceilings.is_empty());
        assert!(interior.landings.is_empty());
        assert!(interior.stairwells.is_empty());
    }
}
