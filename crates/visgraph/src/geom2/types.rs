//! Basic 2D types and tolerances used by the predicates.
//!
//! - `GeomCfg`: centralizes epsilons for collinearity and point equality.
//! - `Segment`: closed segment between two points; direction only matters for
//!   polygon boundaries.
//! - `Orientation`, `Intersection`, `Containment`: predicate outcomes.

use nalgebra::Vector2;

/// A point in the plane. Compared by value through `points_equal`.
pub type Point = Vector2<f64>;

/// Geometry configuration (tolerances).
///
/// Contract
/// - `eps_collinear`: a triple is collinear iff `|(q-p) x (r-p)| <= eps_collinear`.
/// - `eps_point`: two points are equal iff both coordinates differ by less than `eps_point`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    pub eps_collinear: f64,
    pub eps_point: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_collinear: 1e-9,
            eps_point: 1e-9,
        }
    }
}

/// Turn direction of an ordered triple `(p, q, r)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear,
}

/// How two closed segments meet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intersection {
    /// Disjoint.
    None,
    /// Single contact point that involves an endpoint of at least one segment.
    Touch,
    /// Interiors cross at a single point.
    Proper,
    /// Collinear with a shared piece of positive length.
    Overlap,
}

/// Location of a point relative to a closed polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Containment {
    Outside,
    Boundary,
    Inside,
}

/// Closed segment `[a, b]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }
    #[inline]
    pub fn length(&self) -> f64 {
        (self.b - self.a).norm()
    }
    #[inline]
    pub fn midpoint(&self) -> Point {
        (self.a + self.b) * 0.5
    }
    /// `a + t (b - a)`; `t` in `[0, 1]` stays on the segment.
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        self.a + (self.b - self.a) * t
    }
}
