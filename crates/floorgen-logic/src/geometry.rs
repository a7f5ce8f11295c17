//! Axis-aligned box primitives used by every generation stage.
//!
//! A [`Cube`] stores per-axis min/max bounds. Most of the interior
//! algorithms only care about X and Y (the footprint), so the horizontal
//! axes get their own [`Axis`] enum and the Z range has dedicated helpers.

use crate::error::{InteriorError, InteriorResult};
use serde::{Deserialize, Serialize};

/// A horizontal axis. Walls are indexed by the axis they split along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Both horizontal axes, X first.
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }

    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// `false` → X, `true` → Y.
    pub fn from_bool(is_y: bool) -> Axis {
        if is_y {
            Axis::Y
        } else {
            Axis::X
        }
    }
}

/// Axis-aligned box with per-axis min/max.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cube {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Cube {
    pub fn new(x1: f32, x2: f32, y1: f32, y2: f32, z1: f32, z2: f32) -> Self {
        Self {
            min: [x1, y1, z1],
            max: [x2, y2, z2],
        }
    }

    pub fn lo(&self, axis: Axis) -> f32 {
        self.min[axis.index()]
    }
    pub fn hi(&self, axis: Axis) -> f32 {
        self.max[axis.index()]
    }
    pub fn set_lo(&mut self, axis: Axis, v: f32) {
        self.min[axis.index()] = v;
    }
    pub fn set_hi(&mut self, axis: Axis, v: f32) {
        self.max[axis.index()] = v;
    }

    /// Bound on one side: `dir == false` is the low side.
    pub fn bound(&self, axis: Axis, dir: bool) -> f32 {
        if dir {
            self.hi(axis)
        } else {
            self.lo(axis)
        }
    }

    pub fn set_bound(&mut self, axis: Axis, dir: bool, v: f32) {
        if dir {
            self.set_hi(axis, v)
        } else {
            self.set_lo(axis, v)
        }
    }

    pub fn z1(&self) -> f32 {
        self.min[2]
    }
    pub fn z2(&self) -> f32 {
        self.max[2]
    }
    pub fn set_z(&mut self, z1: f32, z2: f32) {
        self.min[2] = z1;
        self.max[2] = z2;
    }

    pub fn size(&self, axis: Axis) -> f32 {
        self.hi(axis) - self.lo(axis)
    }
    pub fn dx(&self) -> f32 {
        self.size(Axis::X)
    }
    pub fn dy(&self) -> f32 {
        self.size(Axis::Y)
    }
    pub fn dz(&self) -> f32 {
        self.max[2] - self.min[2]
    }

    pub fn center(&self, axis: Axis) -> f32 {
        0.5 * (self.lo(axis) + self.hi(axis))
    }

    pub fn area_xy(&self) -> f32 {
        self.dx() * self.dy()
    }

    /// The axis with the larger extent (Y wins only when strictly larger).
    pub fn long_axis(&self) -> Axis {
        Axis::from_bool(self.dy() > self.dx())
    }

    /// Strictly positive extent on all three axes.
    pub fn is_strictly_normalized(&self) -> bool {
        (0..3).all(|i| self.min[i] < self.max[i])
    }

    /// No footprint area (ignores Z).
    pub fn is_zero_area(&self) -> bool {
        self.dx() <= 0.0 || self.dy() <= 0.0
    }

    pub fn contains_xy(&self, other: &Cube) -> bool {
        Axis::BOTH
            .iter()
            .all(|&a| other.lo(a) >= self.lo(a) && other.hi(a) <= self.hi(a))
    }

    pub fn contains_point_xy(&self, x: f32, y: f32) -> bool {
        x >= self.min[0] && x <= self.max[0] && y >= self.min[1] && y <= self.max[1]
    }

    /// Footprints overlap with positive area (touching edges don't count).
    pub fn intersects_xy_no_adj(&self, other: &Cube) -> bool {
        Axis::BOTH
            .iter()
            .all(|&a| self.lo(a) < other.hi(a) && self.hi(a) > other.lo(a))
    }

    /// Footprints come within `dmin` of each other.
    pub fn intersects_xy_within(&self, other: &Cube, dmin: f32) -> bool {
        Axis::BOTH
            .iter()
            .all(|&a| self.lo(a) < other.hi(a) + dmin && self.hi(a) > other.lo(a) - dmin)
    }

    pub fn overlaps_z(&self, other: &Cube) -> bool {
        self.z1() < other.z2() && self.z2() > other.z1()
    }

    /// Grow (or shrink, for negative `amount`) the footprint on all four sides.
    pub fn expand_xy(&mut self, amount: f32) {
        for a in Axis::BOTH {
            self.set_lo(a, self.lo(a) - amount);
            self.set_hi(a, self.hi(a) + amount);
        }
    }

    pub fn expanded_xy(mut self, amount: f32) -> Cube {
        self.expand_xy(amount);
        self
    }

    /// Move the box along one axis.
    pub fn translate(&mut self, axis: Axis, delta: f32) {
        self.set_lo(axis, self.lo(axis) + delta);
        self.set_hi(axis, self.hi(axis) + delta);
    }

    pub fn union(&self, other: &Cube) -> Cube {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] = out.min[i].min(other.min[i]);
            out.max[i] = out.max[i].max(other.max[i]);
        }
        out
    }

    /// Footprint intersection, keeping `self`'s Z range.
    pub fn intersection_xy(&self, other: &Cube) -> Option<Cube> {
        if !self.intersects_xy_no_adj(other) {
            return None;
        }
        let mut out = *self;
        for a in Axis::BOTH {
            out.set_lo(a, self.lo(a).max(other.lo(a)));
            out.set_hi(a, self.hi(a).min(other.hi(a)));
        }
        Some(out)
    }

    /// Cut the open interval `(v1, v2)` out of the box along `axis`,
    /// returning the low and high remainders.
    ///
    /// Both values must lie strictly inside the box so that both pieces keep
    /// positive length.
    pub fn remove_section(&self, v1: f32, v2: f32, axis: Axis) -> InteriorResult<(Cube, Cube)> {
        if !(v1 > self.lo(axis) && v1 < v2 && v2 < self.hi(axis)) {
            return Err(InteriorError::InvalidSection {
                axis,
                lo: v1,
                hi: v2,
                min: self.lo(axis),
                max: self.hi(axis),
            });
        }
        let mut low = *self;
        let mut high = *self;
        low.set_hi(axis, v1);
        high.set_lo(axis, v2);
        Ok((low, high))
    }

    /// Subtract `r` from the footprint, producing up to four rectangles:
    /// the full-width bands below and above `r` in Y, then the bands left
    /// and right of `r` in X. Z is ignored and copied from `self`.
    ///
    /// `r` is clipped to `self` first; pieces may have zero area when `r`
    /// touches an edge, callers drop those.
    pub fn subtract_xy(&self, r: &Cube) -> [Cube; 4] {
        let r = self.intersection_xy(r).unwrap_or(Cube {
            min: [self.min[0], self.min[1], self.min[2]],
            max: [self.min[0], self.min[1], self.max[2]],
        });
        let mut out = [*self; 4];
        out[0].max[1] = r.min[1];
        out[1].min[1] = r.max[1];
        out[2].min[1] = r.min[1];
        out[2].max[1] = r.max[1];
        out[2].max[0] = r.min[0];
        out[3].min[1] = r.min[1];
        out[3].max[1] = r.max[1];
        out[3].min[0] = r.max[0];
        out
    }
}

/// Subtract `cut` from every rectangle in `rects` that it overlaps,
/// keeping non-overlapping rectangles as they are and dropping
/// zero-area remainders.
pub fn subtract_from_all(rects: &[Cube], cut: &Cube) -> Vec<Cube> {
    let mut out = Vec::with_capacity(rects.len() + 3);
    for r in rects {
        if r.intersects_xy_no_adj(cut) {
            out.extend(r.subtract_xy(cut).into_iter().filter(|c| !c.is_zero_area()));
        } else if !r.is_zero_area() {
            out.push(*r);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Cube {
        Cube::new(0.0, 10.0, 0.0, 6.0, 0.0, 3.0)
    }

    #[test]
    fn test_axis_other_and_index() {
        assert_eq!(Axis::X.other(), Axis::Y);
        assert_eq!(Axis::Y.other(), Axis::X);
        assert_eq!(Axis::X.index(), 0);
        assert_eq!(Axis::from_bool(true), Axis::Y);
    }

    #[test]
    fn test_remove_section_splits_in_two() {
        let (lo, hi) = unit().remove_section(4.0, 5.0, Axis::X).unwrap();
        assert_eq!(lo.hi(Axis::X), 4.0);
        assert_eq!(hi.lo(Axis::X), 5.0);
        assert_eq!(lo.lo(Axis::X), 0.0);
        assert_eq!(hi.hi(Axis::X), 10.0);
    }

    #[test]
    fn test_remove_section_rejects_edge_touching_gap() {
        assert!(unit().remove_section(0.0, 1.0, Axis::X).is_err());
        assert!(unit().remove_section(5.0, 10.0, Axis::X).is_err());
        assert!(unit().remove_section(5.0, 4.0, Axis::X).is_err());
    }

    #[test]
    fn test_subtract_xy_area_conserved() {
        let c = unit();
        let r = Cube::new(2.0, 4.0, 1.0, 3.0, 0.0, 3.0);
        let pieces = c.subtract_xy(&r);
        let total: f32 = pieces.iter().map(|p| p.area_xy()).sum();
        assert!((total + r.area_xy() - c.area_xy()).abs() < 1e-4);
        for (i, a) in pieces.iter().enumerate() {
            assert!(!a.intersects_xy_no_adj(&r), "piece {} overlaps cut", i);
            for b in pieces.iter().skip(i + 1) {
                assert!(!a.intersects_xy_no_adj(b));
            }
        }
    }

    #[test]
    fn test_subtract_flush_cut_gives_zero_area_piece() {
        let c = unit();
        let r = Cube::new(0.0, 2.0, 0.0, 2.0, 0.0, 3.0);
        let pieces = c.subtract_xy(&r);
        assert!(pieces[0].is_zero_area());
        assert!(pieces[2].is_zero_area());
        let kept = subtract_from_all(&[c], &r);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_subtract_from_all_handles_straddling_cut() {
        let halves = [
            Cube::new(0.0, 10.0, 0.0, 3.0, 0.0, 1.0),
            Cube::new(0.0, 10.0, 3.0, 6.0, 0.0, 1.0),
        ];
        let cut = Cube::new(4.0, 6.0, 2.0, 4.0, 0.0, 1.0);
        let out = subtract_from_all(&halves, &cut);
        let total: f32 = out.iter().map(|p| p.area_xy()).sum();
        assert!((total - (60.0 - 4.0)).abs() < 1e-4);
        assert!(out.iter().all(|p| !p.intersects_xy_no_adj(&cut)));
    }

    #[test]
    fn test_intersects_within_distance() {
        let a = Cube::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
        let b = Cube::new(1.5, 2.0, 0.0, 1.0, 0.0, 1.0);
        assert!(!a.intersects_xy_no_adj(&b));
        assert!(a.intersects_xy_within(&b, 0.6));
        assert!(!a.intersects_xy_within(&b, 0.4));
    }

    #[test]
    fn test_long_axis_prefers_x_on_tie() {
        assert_eq!(Cube::new(0.0, 4.0, 0.0, 4.0, 0.0, 1.0).long_axis(), Axis::X);
        assert_eq!(Cube::new(0.0, 4.0, 0.0, 5.0, 0.0, 1.0).long_axis(), Axis::Y);
    }
}
