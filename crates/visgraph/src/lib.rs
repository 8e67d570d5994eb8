//! Visibility-graph path planning over polygonal obstacle maps.
//!
//! Pipeline
//! - `map`: parse the text map into start, end and polygons.
//! - `visibility`: connect mutually visible vertices, weighted by distance.
//! - `tree`: reduce to a minimum spanning tree (Prim), then answer
//!   nearest-vertex and tree-path (BFS) queries.
//! - `plan`: the three stages chained for a pair of query points.
//!
//! All stages are pure and single-threaded; outputs are plain data meant to be
//! read by renderers or exporters, never fed back.

pub mod geom2;
pub mod map;
pub mod plan;
pub mod tree;
pub mod visibility;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;
pub use plan::{plan, plan_with_defaults};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::{distance, GeomCfg, Point, Segment};
    pub use crate::map::rand::{draw_map, MapCfg, ReplayToken, VertexCount};
    pub use crate::map::{Map, MapError, Polygon, VertexTag};
    pub use crate::plan::{plan, plan_with_defaults, resolve};
    pub use crate::tree::{minimum_spanning_tree, Path, QueryError, SpanningTree, TreeEdge};
    pub use crate::visibility::{build_graph, VertexId, VisibilityCfg, VisibilityGraph};
}
