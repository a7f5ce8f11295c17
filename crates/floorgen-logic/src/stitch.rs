//! Separating walls along faces shared by adjacent parts.
//!
//! Rooms of two touching parts would otherwise open straight into each
//! other. These walls get no doorway here; the connectivity refiner is
//! required to cut one later.

use crate::building::Part;
use crate::config::InteriorConfig;
use crate::geometry::{Axis, Cube};

/// A wall on the boundary between two parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StitchWall {
    /// Axis the wall is thin along.
    pub axis: Axis,
    pub bounds: Cube,
    /// The part on the other side.
    pub neighbor: usize,
}

/// Walls for every face of part `ix` shared with another part.
///
/// A face qualifies when the other part touches it, overlaps it in Z, and
/// spans at least the full face. When both parts have the same extent along
/// the face, only one side gets the wall: the part with the higher top, or
/// the lower index on a tie.
pub fn stitch_walls(parts: &[Part], ix: usize, config: &InteriorConfig) -> Vec<StitchWall> {
    let p = &parts[ix].bounds;
    let fc = config.fc_thick();
    let edge = config.wall_edge_spacing();
    let wall_thick = config.wall_thick();
    let mut out = Vec::new();

    for (j, other) in parts.iter().enumerate() {
        if j == ix {
            continue;
        }
        let p2 = &other.bounds;
        if !p.overlaps_z(p2) {
            continue;
        }
        // `dim` runs along the shared face, `face` is perpendicular to it
        for dim in Axis::BOTH {
            let face = dim.other();
            for dir in [false, true] {
                let val = p.bound(face, dir);
                if p2.bound(face, !dir) != val {
                    continue;
                }
                if p2.lo(dim) > p.lo(dim) || p2.hi(dim) < p.hi(dim) {
                    continue;
                }
                if p2.lo(dim) == p.lo(dim) && p2.hi(dim) == p.hi(dim) {
                    let p_wins = p.z2() > p2.z2() || (p.z2() == p2.z2() && ix < j);
                    if !p_wins {
                        continue;
                    }
                }
                let mut wall = *p;
                wall.set_z(p.z1().max(p2.z1()) + fc, p.z2().min(p2.z2()) - fc);
                wall.set_lo(dim, p.lo(dim) + edge);
                wall.set_hi(dim, p.hi(dim) - edge);
                wall.set_bound(face, dir, val);
                wall.set_bound(face, !dir, if dir { val - wall_thick } else { val + wall_thick });
                out.push(StitchWall {
                    axis: face,
                    bounds: wall,
                    neighbor: j,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(x1: f32, x2: f32, y1: f32, y2: f32, z2: f32) -> Part {
        Part::new(Cube::new(x1, x2, y1, y2, 0.0, z2), 1)
    }

    #[test]
    fn test_l_shape_gets_one_wall() {
        // short wing against the long side of the main block
        let parts = vec![part(0.0, 30.0, 0.0, 12.0, 12.0), part(0.0, 12.0, 12.0, 30.0, 12.0)];
        let config = InteriorConfig::default();
        assert!(stitch_walls(&parts, 0, &config).is_empty());
        let walls = stitch_walls(&parts, 1, &config);
        assert_eq!(walls.len(), 1);
        let w = walls[0];
        assert_eq!(w.axis, Axis::Y);
        assert_eq!(w.neighbor, 0);
        // inside part 1, starting at the shared face
        assert_eq!(w.bounds.lo(Axis::Y), 12.0);
        assert!((w.bounds.hi(Axis::Y) - 12.0 - config.wall_thick()).abs() < 1e-5);
        assert!(w.bounds.lo(Axis::X) > 0.0 && w.bounds.hi(Axis::X) < 12.0);
    }

    #[test]
    fn test_matching_faces_deduplicated() {
        let parts = vec![part(0.0, 10.0, 0.0, 10.0, 8.0), part(10.0, 20.0, 0.0, 10.0, 12.0)];
        let config = InteriorConfig::default();
        // the taller part owns the wall
        assert!(stitch_walls(&parts, 0, &config).is_empty());
        let walls = stitch_walls(&parts, 1, &config);
        assert_eq!(walls.len(), 1);
        // shared height only
        assert!(walls[0].bounds.z2() < 8.0);

        let same = vec![part(0.0, 10.0, 0.0, 10.0, 8.0), part(10.0, 20.0, 0.0, 10.0, 8.0)];
        let total = stitch_walls(&same, 0, &config).len() + stitch_walls(&same, 1, &config).len();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_stacked_parts_not_stitched() {
        let lower = Part::new(Cube::new(0.0, 10.0, 0.0, 10.0, 0.0, 8.0), 2);
        let upper = Part::new(Cube::new(10.0, 20.0, 0.0, 10.0, 8.0, 16.0), 2);
        let walls = stitch_walls(&[lower, upper], 0, &InteriorConfig::default());
        assert!(walls.is_empty());
    }
}
