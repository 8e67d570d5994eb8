//! Visibility graph over obstacle vertices and the start/end points.
//!
//! Purpose
//! - Connect every pair of map vertices whose straight segment does not pass
//!   through an obstacle; weight edges by Euclidean length.
//!
//! Rules
//! - Coincident map points become one vertex (first tag wins, later tags alias).
//! - Consecutive polygon vertices are always connected (the boundary itself
//!   is traversable).
//! - Touching an obstacle at a vertex or at a shared endpoint is visible;
//!   crossing an edge, running along an edge that is not incident to the
//!   segment, or passing through a polygon interior is not.
//! - Isolated vertices are allowed; disconnection surfaces in the tree stage.

mod build;
mod types;

pub use build::{build_graph, is_visible};
pub use types::{Edge, Vertex, VertexId, VisibilityCfg, VisibilityGraph};

#[cfg(test)]
mod tests;
