//! Geometry kernel: points, segments and the predicates visibility is built on.
//!
//! Purpose
//! - Provide orientation, segment intersection and point-in-polygon tests with
//!   an explicit, documented tolerance (`GeomCfg`) so results are reproducible.
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>`.
//! - Collinearity uses an absolute threshold on the cross product
//!   (`eps_collinear`, default `1e-9`); point equality is per-coordinate
//!   (`eps_point`, default `1e-9`).
//! - Contacts are classified (`Intersection`) rather than reduced to a bool;
//!   the visibility builder needs to tell a graze from a crossing.

mod hull;
mod predicates;
mod types;

pub use hull::{convex_hull, signed_area};
pub use predicates::{
    classify_intersection, cross, distance, orientation, point_in_polygon, point_on_segment,
    points_equal, segments_intersect,
};
pub use types::{Containment, GeomCfg, Intersection, Orientation, Point, Segment};
