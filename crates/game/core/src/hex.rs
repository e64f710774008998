//! Cube-coordinate hex geometry.
//!
//! All gameplay positions use three-axis cube coordinates with the invariant
//! `x + y + z = 0`. This module is pure math: adjacency, rotation, mirroring,
//! Cartesian projection, and line-of-sight intersection. Gameplay distance is
//! always the board's weighted path search; the Cartesian projection exists
//! only for rendering and the intersection filter, never for range checks.

use std::fmt;
use std::ops::{Add, Sub};

/// One of the three cube-coordinate axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// A hex-grid position in cube coordinates.
///
/// Immutable value type; freely copied. The constructor enforces the
/// `x + y + z = 0` invariant, so every constructed value is a valid hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoordinate {
    x: i32,
    y: i32,
    z: i32,
}

/// Cells (and straddled cell pairs) a straight segment between two
/// coordinates passes through. Endpoints are never included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineIntersections {
    /// Cells whose interior the segment crosses.
    pub cells: Vec<HexCoordinate>,
    /// For edge-aligned steps, the two cells the segment runs exactly between.
    pub edge_pairs: Vec<(HexCoordinate, HexCoordinate)>,
}

/// Canonical "up" neighbor offset. The other five neighbors are produced by
/// rotating this offset clockwise in 60-degree steps.
const UP: [i32; 3] = [0, 1, -1];

/// sqrt(3) / 2, the apothem of a unit-circumradius hexagon.
const APOTHEM: f64 = 0.866_025_403_784_438_6;

impl HexCoordinate {
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    /// Creates a coordinate from all three components.
    ///
    /// # Panics
    ///
    /// Panics if `x + y + z != 0`; that is authored-data or logic corruption,
    /// never a runtime condition.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        assert_eq!(x + y + z, 0, "cube coordinate must satisfy x + y + z = 0");
        Self { x, y, z }
    }

    /// Creates a coordinate from the x and z axes, deriving y.
    pub const fn axial(x: i32, z: i32) -> Self {
        Self { x, y: -x - z, z }
    }

    pub const fn x(self) -> i32 {
        self.x
    }

    pub const fn y(self) -> i32 {
        self.y
    }

    pub const fn z(self) -> i32 {
        self.z
    }

    /// The component along one axis.
    pub const fn component(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    fn comps(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    fn from_comps(c: [i32; 3]) -> Self {
        debug_assert_eq!(c[0] + c[1] + c[2], 0);
        Self {
            x: c[0],
            y: c[1],
            z: c[2],
        }
    }

    /// The six neighbors, clockwise starting from the canonical up offset.
    pub fn adjacent(self) -> [HexCoordinate; 6] {
        let mut offset = Self::from_comps(UP);
        let mut out = [self; 6];
        for slot in &mut out {
            *slot = self + offset;
            offset = offset.rotated_once();
        }
        out
    }

    /// One clockwise 60-degree rotation about the origin: the cube-axis
    /// permutation (x, y, z) -> (-z, -x, -y).
    fn rotated_once(self) -> Self {
        Self {
            x: -self.z,
            y: -self.x,
            z: -self.y,
        }
    }

    /// Rotates about `around` by `steps` sixty-degree increments, clockwise.
    ///
    /// Negative step counts are normalized onto `0..6`; six steps return to
    /// the start.
    pub fn rotate(self, around: HexCoordinate, steps: i32) -> Self {
        let steps = steps.rem_euclid(6);
        if steps == 0 {
            return self;
        }
        let rotated = around + (self - around).rotated_once();
        rotated.rotate(around, steps - 1)
    }

    /// Mirrors across one axis by swapping the other two components.
    pub fn mirror(self, axis: Axis) -> Self {
        match axis {
            Axis::X => Self::from_comps([self.x, self.z, self.y]),
            Axis::Y => Self::from_comps([self.z, self.y, self.x]),
            Axis::Z => Self::from_comps([self.y, self.x, self.z]),
        }
    }

    /// Projects onto the render plane using unit basis vectors at 0, 120,
    /// and 240 degrees for the x, y, and z axes respectively.
    ///
    /// Adjacent cell centers end up sqrt(3) apart, so each cell is a
    /// unit-circumradius hexagon with vertices at multiples of 60 degrees.
    pub fn to_cartesian(self) -> [f64; 2] {
        const COS_120: f64 = -0.5;
        const SIN_120: f64 = APOTHEM;
        let (x, y, z) = (self.x as f64, self.y as f64, self.z as f64);
        [x + COS_120 * (y + z), SIN_120 * (y - z)]
    }

    /// Hex distance: half the sum of absolute per-axis differences.
    pub fn radius_to(self, other: HexCoordinate) -> u32 {
        let d = other - self;
        ((d.x.abs() + d.y.abs() + d.z.abs()) / 2) as u32
    }

    /// Computes which cells a straight segment from `self` to `to` passes
    /// through, for line-of-sight collision checks.
    ///
    /// Three cases, in priority order:
    /// 1. the difference is zero on one axis: unit steps along the other two,
    ///    every intermediate cell returned, no edge pairs;
    /// 2. the two non-dominant differences are equal: the segment runs exactly
    ///    along cell edges, alternating straddled pairs (returned as
    ///    `edge_pairs`) with exact cell centers;
    /// 3. general: candidate cells on a geodesic between the endpoints are
    ///    filtered by an exact segment-vs-hexagon straddle test in the
    ///    Cartesian projection.
    ///
    /// The returned cell set is symmetric in the two endpoints, which are
    /// themselves always excluded. This is a geometric primitive with no
    /// game-rule meaning; blocking policy lives with the caller.
    pub fn line_intersections(self, to: HexCoordinate) -> LineIntersections {
        let mut out = LineIntersections::default();
        if self == to {
            return out;
        }
        let d = (to - self).comps();

        // Case 1: exact single-axis straight line.
        if d.iter().any(|&v| v == 0) {
            let step = Self::from_comps([d[0].signum(), d[1].signum(), d[2].signum()]);
            let mut cursor = self + step;
            while cursor != to {
                out.cells.push(cursor);
                cursor = cursor + step;
            }
            return out;
        }

        // Case 2: exact edge-aligned line. The dominant axis moves two units
        // for every one unit of the other two, so the segment alternates
        // between cell centers and shared edges.
        let abs = [d[0].abs(), d[1].abs(), d[2].abs()];
        let dom = if abs[0] >= abs[1] && abs[0] >= abs[2] {
            0
        } else if abs[1] >= abs[2] {
            1
        } else {
            2
        };
        let (o1, o2) = match dom {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        };
        if d[o1] == d[o2] {
            let m = d[o1].unsigned_abs() as i32;
            let step = [d[0] / m, d[1] / m, d[2] / m];
            for k in 1..(2 * m) {
                if k % 2 == 0 {
                    let t = k / 2;
                    out.cells.push(Self::from_comps([
                        self.x + t * step[0],
                        self.y + t * step[1],
                        self.z + t * step[2],
                    ]));
                } else {
                    // Doubled coordinates: dominant axis is whole, the other
                    // two sit exactly on the half-grid between two cells.
                    let q = [
                        2 * self.comps()[0] + k * step[0],
                        2 * self.comps()[1] + k * step[1],
                        2 * self.comps()[2] + k * step[2],
                    ];
                    let dom_v = q[dom] / 2;
                    let lo = q[o1].div_euclid(2);
                    let pair = (
                        Self::with_axes(dom, dom_v, o1, lo),
                        Self::with_axes(dom, dom_v, o1, lo + 1),
                    );
                    out.edge_pairs.push(pair);
                }
            }
            return out;
        }

        // Case 3: general. Every cell the segment crosses lies on a geodesic
        // between the endpoints, so the diamond of cells with
        // radius(a, c) + radius(c, b) == radius(a, b) is a complete candidate
        // set; the Cartesian filter keeps exactly the straddling cells.
        let total = self.radius_to(to);
        let r = total as i32;
        let a_pt = self.to_cartesian();
        let b_pt = to.to_cartesian();
        for dx in -r..=r {
            let lo = (-r).max(-dx - r);
            let hi = r.min(-dx + r);
            for dy in lo..=hi {
                let candidate = Self::from_comps([self.x + dx, self.y + dy, self.z - dx - dy]);
                if candidate == self || candidate == to {
                    continue;
                }
                if self.radius_to(candidate) + candidate.radius_to(to) != total {
                    continue;
                }
                if segment_crosses_hex(a_pt, b_pt, candidate.to_cartesian()) {
                    out.cells.push(candidate);
                }
            }
        }
        out
    }

    /// Builds a coordinate from a fixed component on one axis index and a
    /// fixed component on another, deriving the third.
    fn with_axes(i: usize, vi: i32, j: usize, vj: i32) -> Self {
        let mut c = [0i32; 3];
        c[i] = vi;
        c[j] = vj;
        let k = 3 - i - j;
        c[k] = -vi - vj;
        Self::from_comps(c)
    }
}

/// True if the open segment strictly enters the interior of the
/// unit-circumradius hexagon centered at `center`.
///
/// Cyrus-Beck clipping against the six edge half-planes; corner touches and
/// edge tangencies clip to a zero-length interval and are rejected.
fn segment_crosses_hex(a: [f64; 2], b: [f64; 2], center: [f64; 2]) -> bool {
    const EPS: f64 = 1e-9;
    let dir = [b[0] - a[0], b[1] - a[1]];
    let rel = [a[0] - center[0], a[1] - center[1]];
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for k in 0..6 {
        // Outward edge normals point at the six neighbor directions,
        // 90 degrees and then clockwise.
        let angle = (90.0 - 60.0 * k as f64).to_radians();
        let n = [angle.cos(), angle.sin()];
        let offset = rel[0] * n[0] + rel[1] * n[1] - APOTHEM;
        let denom = dir[0] * n[0] + dir[1] * n[1];
        if denom.abs() < 1e-12 {
            if offset > 0.0 {
                return false;
            }
            continue;
        }
        let t = -offset / denom;
        if denom > 0.0 {
            t1 = t1.min(t);
        } else {
            t0 = t0.max(t);
        }
    }
    t1 - t0 > EPS
}

impl Add for HexCoordinate {
    type Output = HexCoordinate;

    fn add(self, rhs: HexCoordinate) -> HexCoordinate {
        HexCoordinate {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for HexCoordinate {
    type Output = HexCoordinate;

    fn sub(self, rhs: HexCoordinate) -> HexCoordinate {
        HexCoordinate {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl fmt::Debug for HexCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl fmt::Display for HexCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn hex(x: i32, y: i32, z: i32) -> HexCoordinate {
        HexCoordinate::new(x, y, z)
    }

    #[test]
    fn adjacent_is_the_unit_ring() {
        let around = hex(2, -1, -1);
        let ring: BTreeSet<_> = around.adjacent().into_iter().collect();
        assert_eq!(ring.len(), 6);
        for n in &ring {
            assert_eq!(around.radius_to(*n), 1);
        }
        // First neighbor is the canonical up offset, second is one clockwise
        // step from it.
        assert_eq!(around.adjacent()[0], hex(2, 0, -2));
        assert_eq!(around.adjacent()[1], hex(3, -1, -2));
    }

    #[test]
    fn rotate_six_steps_is_identity() {
        let around = hex(1, -3, 2);
        for c in [hex(0, 0, 0), hex(4, -1, -3), hex(-2, 5, -3)] {
            assert_eq!(c.rotate(around, 6), c);
            assert_eq!(c.rotate(around, 0), c);
        }
    }

    #[test]
    fn rotate_negative_steps_normalize() {
        let around = HexCoordinate::ORIGIN;
        let c = hex(3, -1, -2);
        assert_eq!(c.rotate(around, -1), c.rotate(around, 5));
        assert_eq!(c.rotate(around, -7), c.rotate(around, 5));
        assert_eq!(c.rotate(around, 7), c.rotate(around, 1));
    }

    #[test]
    fn rotate_single_step_is_clockwise_permutation() {
        assert_eq!(hex(0, 1, -1).rotate(HexCoordinate::ORIGIN, 1), hex(1, 0, -1));
    }

    #[test]
    fn mirror_is_self_inverse() {
        let c = hex(4, -1, -3);
        for axis in Axis::ALL {
            assert_eq!(c.mirror(axis).mirror(axis), c);
            assert_eq!(c.mirror(axis).component(axis), c.component(axis));
        }
    }

    #[test]
    fn radius_matches_manual_counts() {
        assert_eq!(HexCoordinate::ORIGIN.radius_to(hex(0, 1, -1)), 1);
        assert_eq!(HexCoordinate::ORIGIN.radius_to(hex(2, -1, -1)), 2);
        assert_eq!(hex(1, 1, -2).radius_to(hex(-1, 1, 0)), 2);
    }

    #[test]
    fn cartesian_neighbors_are_equidistant() {
        let center = hex(1, 0, -1).to_cartesian();
        for n in hex(1, 0, -1).adjacent() {
            let p = n.to_cartesian();
            let dist = ((p[0] - center[0]).powi(2) + (p[1] - center[1]).powi(2)).sqrt();
            assert!((dist - 3.0f64.sqrt()).abs() < 1e-9);
        }
    }

    #[test]
    fn straight_line_walks_one_axis() {
        let line = HexCoordinate::ORIGIN.line_intersections(hex(3, 0, -3));
        assert_eq!(line.cells, vec![hex(1, 0, -1), hex(2, 0, -2)]);
        assert!(line.edge_pairs.is_empty());
    }

    #[test]
    fn edge_aligned_line_alternates_pairs_and_centers() {
        let line = HexCoordinate::ORIGIN.line_intersections(hex(4, -2, -2));
        assert_eq!(line.cells, vec![hex(2, -1, -1)]);
        assert_eq!(
            line.edge_pairs,
            vec![
                (hex(1, -1, 0), hex(1, 0, -1)),
                (hex(3, -2, -1), hex(3, -1, -2)),
            ]
        );
    }

    #[test]
    fn shortest_edge_aligned_line_is_a_single_pair() {
        let line = HexCoordinate::ORIGIN.line_intersections(hex(2, -1, -1));
        assert!(line.cells.is_empty());
        assert_eq!(line.edge_pairs, vec![(hex(1, -1, 0), hex(1, 0, -1))]);
    }

    #[test]
    fn general_line_selects_straddled_cells() {
        let line = HexCoordinate::ORIGIN.line_intersections(hex(3, -1, -2));
        let cells: BTreeSet<_> = line.cells.into_iter().collect();
        let expected: BTreeSet<_> = [hex(1, 0, -1), hex(2, -1, -1)].into_iter().collect();
        assert_eq!(cells, expected);
        assert!(line.edge_pairs.is_empty());
    }

    #[test]
    fn line_cell_set_is_symmetric() {
        let pairs = [
            (HexCoordinate::ORIGIN, hex(3, -1, -2)),
            (hex(-2, 1, 1), hex(3, 0, -3)),
            (hex(0, 2, -2), hex(4, -3, -1)),
        ];
        for (a, b) in pairs {
            let forward: BTreeSet<_> = a.line_intersections(b).cells.into_iter().collect();
            let backward: BTreeSet<_> = b.line_intersections(a).cells.into_iter().collect();
            assert_eq!(forward, backward, "{a} <-> {b}");
        }
    }

    #[test]
    fn endpoints_are_always_excluded() {
        for b in [hex(3, 0, -3), hex(4, -2, -2), hex(3, -1, -2)] {
            let line = HexCoordinate::ORIGIN.line_intersections(b);
            assert!(!line.cells.contains(&HexCoordinate::ORIGIN));
            assert!(!line.cells.contains(&b));
        }
        assert_eq!(
            HexCoordinate::ORIGIN.line_intersections(HexCoordinate::ORIGIN),
            LineIntersections::default()
        );
    }
}
