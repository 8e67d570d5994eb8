//! Minimum spanning tree of the visibility graph and the queries run on it.
//!
//! Purpose
//! - Reduce the visibility graph to a minimum spanning tree (Prim, rooted at
//!   the start vertex) and answer two queries on it: the tree vertex nearest
//!   to a point, and the unique tree path between two vertices.
//!
//! Notes
//! - A disconnected graph yields a tree of the root's component only; queries
//!   involving vertices outside it fail with `QueryError::NoPath`.
//! - Paths are shortest by edge count within the tree, not Euclidean-shortest
//!   in the visibility graph.

mod bfs;
mod nearest;
mod prim;
mod types;

pub use prim::{minimum_spanning_tree, prim_from};
pub use types::{Path, QueryError, SpanningTree, TreeEdge};
