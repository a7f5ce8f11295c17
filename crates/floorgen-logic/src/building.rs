//! Input model handed over by the exterior-shape stage.
//!
//! A building is an ordered list of footprint parts, a residential flag,
//! a stable seed and a window layout. Story counts are computed up front
//! from the part height and floor spacing.

use crate::config::InteriorConfig;
use crate::error::{InteriorError, InteriorResult};
use crate::geometry::{Axis, Cube};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Building classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    /// Single-family house: one stairwell, never a hallway layout.
    House,
    /// Offices, apartments and every other multi-story structure.
    Other,
}

/// One convex footprint volume with its story count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub bounds: Cube,
    pub num_floors: u32,
}

impl Part {
    pub fn new(bounds: Cube, num_floors: u32) -> Self {
        Self { bounds, num_floors }
    }

    /// Build a single part, deriving its story count from its height.
    /// Errors name it as part 0; see [`parts_from_bounds`] for a list.
    pub fn from_bounds(bounds: Cube, config: &InteriorConfig) -> InteriorResult<Self> {
        Self::from_bounds_at(0, bounds, config)
    }

    fn from_bounds_at(ix: usize, bounds: Cube, config: &InteriorConfig) -> InteriorResult<Self> {
        let num_floors = calc_num_floors(&bounds, ix, config)?;
        Ok(Self { bounds, num_floors })
    }
}

/// Parts for a list of footprints, in order. Errors carry the index of
/// the failing part.
pub fn parts_from_bounds(bounds: &[Cube], config: &InteriorConfig) -> InteriorResult<Vec<Part>> {
    bounds
        .iter()
        .enumerate()
        .map(|(ix, b)| Part::from_bounds_at(ix, *b, config))
        .collect()
}

/// Window pitch query: how many windows fit along an exterior span.
///
/// Only used to keep interior walls off window centerlines and to size
/// hallway-layout rooms.
pub trait WindowLayout {
    fn windows_on_side(&self, lo: f32, hi: f32) -> u32;
}

/// Windows on a regular world-space grid, `density` windows per unit length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformWindows {
    pub density: f32,
}

impl UniformWindows {
    /// Windows repeating every `pitch` units.
    pub fn with_pitch(pitch: f32) -> Self {
        Self {
            density: 1.0 / pitch,
        }
    }
}

impl WindowLayout for UniformWindows {
    fn windows_on_side(&self, lo: f32, hi: f32) -> u32 {
        if hi <= lo || self.density <= 0.0 {
            return 0;
        }
        let t0 = (lo * self.density).round();
        let t1 = (hi * self.density).round();
        (t1 - t0).max(0.0) as u32
    }
}

/// A finished exterior, ready for interior generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Stable identifier; also the RNG seed.
    pub seed: u64,
    pub kind: BuildingKind,
    pub parts: Vec<Part>,
    pub windows: UniformWindows,
}

impl Building {
    pub fn is_house(&self) -> bool {
        self.kind == BuildingKind::House
    }

    /// Union of all part boxes. `None` when there are no parts.
    pub fn bcube(&self) -> Option<Cube> {
        let mut parts = self.parts.iter();
        let first = parts.next()?.bounds;
        Some(parts.fold(first, |acc, p| acc.union(&p.bounds)))
    }

    /// Deterministic random stream for this building.
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }

    /// Check every part for positive extent and a usable story count.
    pub fn check_parts(&self, config: &InteriorConfig) -> InteriorResult<()> {
        if self.parts.is_empty() {
            return Err(InteriorError::NoParts {
                building: self.seed,
            });
        }
        for (i, p) in self.parts.iter().enumerate() {
            if !p.bounds.is_strictly_normalized() {
                return Err(InteriorError::DegeneratePart {
                    part: i,
                    min: p.bounds.min,
                    max: p.bounds.max,
                });
            }
            if p.num_floors == 0 {
                return Err(InteriorError::ZeroStories {
                    part: i,
                    height: p.bounds.dz(),
                    spacing: config.floor_spacing,
                });
            }
            if p.num_floors > config.max_stories {
                return Err(InteriorError::TooManyStories {
                    part: i,
                    stories: p.num_floors,
                    limit: config.max_stories,
                });
            }
        }
        Ok(())
    }
}

/// Whole stories that fit in a part: `round((height - floor_thickness) / spacing)`.
/// `part` is only used to label errors.
pub fn calc_num_floors(bounds: &Cube, part: usize, config: &InteriorConfig) -> InteriorResult<u32> {
    let z_span = bounds.dz() - config.floor_thickness();
    if z_span <= 0.0 {
        return Err(InteriorError::ZeroStories {
            part,
            height: bounds.dz(),
            spacing: config.floor_spacing,
        });
    }
    let num_floors = (z_span / config.floor_spacing).round() as u32;
    if num_floors > config.max_stories {
        return Err(InteriorError::TooManyStories {
            part,
            stories: num_floors,
            limit: config.max_stories,
        });
    }
    Ok(num_floors)
}

/// Window pitch along `axis` of `part`, or `None` if no windows fit.
pub fn window_spacing(part: &Cube, axis: Axis, windows: &dyn WindowLayout) -> Option<f32> {
    let n = windows.windows_on_side(part.lo(axis), part.hi(axis));
    (n > 0).then(|| part.size(axis) / n as f32)
}
