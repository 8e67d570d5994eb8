//! Data types for the spanning tree and its queries.

use std::fmt;

use crate::geom2::{distance, Point};
use crate::visibility::{VertexId, VisibilityGraph};

/// Tree edge oriented away from the root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeEdge {
    pub parent: VertexId,
    pub child: VertexId,
    pub weight: f64,
}

/// Spanning tree (of the root's component) over a borrowed visibility graph.
///
/// Invariants
/// - `order` lists tree vertices in the order Prim attached them; `order[0]` is the root.
/// - `edges.len() == order.len() - 1` for a non-empty tree.
/// - `parent[v]` is `Some` exactly for attached non-root vertices.
#[derive(Clone, Debug)]
pub struct SpanningTree<'g> {
    pub(super) graph: &'g VisibilityGraph,
    pub(super) order: Vec<VertexId>,
    pub(super) in_tree: Vec<bool>,
    pub(super) parent: Vec<Option<VertexId>>,
    pub(super) edges: Vec<TreeEdge>,
    pub(super) adj: Vec<Vec<VertexId>>,
}

impl<'g> SpanningTree<'g> {
    pub(super) fn empty(graph: &'g VisibilityGraph) -> Self {
        let n = graph.vertex_count();
        Self {
            graph,
            order: Vec::new(),
            in_tree: vec![false; n],
            parent: vec![None; n],
            edges: Vec::new(),
            adj: vec![Vec::new(); n],
        }
    }

    #[inline]
    pub fn graph(&self) -> &'g VisibilityGraph {
        self.graph
    }
    #[inline]
    pub fn root(&self) -> Option<VertexId> {
        self.order.first().copied()
    }
    /// Tree vertices in attachment order.
    #[inline]
    pub fn vertices(&self) -> &[VertexId] {
        &self.order
    }
    #[inline]
    pub fn edges(&self) -> &[TreeEdge] {
        &self.edges
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.in_tree.get(v.0).copied().unwrap_or(false)
    }
    #[inline]
    pub fn parent(&self, v: VertexId) -> Option<VertexId> {
        self.parent.get(v.0).copied().flatten()
    }
    /// Tree neighbours of `v`; empty for vertices outside the tree.
    pub fn neighbors(&self, v: VertexId) -> &[VertexId] {
        self.adj.get(v.0).map(Vec::as_slice).unwrap_or(&[])
    }
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }
}

/// Vertex sequence from source to target, both inclusive.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub vertices: Vec<VertexId>,
    pub points: Vec<Point>,
}

impl Path {
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
    /// Number of edges traversed.
    #[inline]
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
    /// Euclidean length along the path.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| distance(w[0], w[1])).sum()
    }
    #[inline]
    pub fn source(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }
    #[inline]
    pub fn target(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }
}

/// Query failures on a spanning tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// Nearest-vertex query on a tree without vertices.
    EmptyTree,
    /// `from` or `to` is not attached to the tree (other component or foreign id).
    NoPath { from: VertexId, to: VertexId },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTree => write!(f, "empty tree: no vertex to query"),
            Self::NoPath { from, to } => write!(f, "no path from vertex {from} to vertex {to}"),
        }
    }
}

impl std::error::Error for QueryError {}
