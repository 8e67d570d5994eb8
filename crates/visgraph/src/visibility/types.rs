//! Data types for the visibility graph.

use std::collections::HashMap;
use std::fmt;

use crate::geom2::{points_equal, GeomCfg, Point};
use crate::map::VertexTag;

/// Index of a vertex inside one `VisibilityGraph`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Graph vertex: a point plus the tag of its first occurrence in the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub tag: VertexTag,
    pub point: Point,
}

/// Undirected weighted edge; `weight` is the Euclidean length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub a: VertexId,
    pub b: VertexId,
    pub weight: f64,
}

impl Edge {
    /// The endpoint that is not `v` (`a` when `v` is neither).
    #[inline]
    pub fn other(&self, v: VertexId) -> VertexId {
        if self.a == v {
            self.b
        } else {
            self.a
        }
    }
}

/// Builder configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisibilityCfg {
    pub geom: GeomCfg,
    /// Test non-consecutive vertices of the same polygon like any other pair.
    /// Off by default: a polygon's own vertices only see their boundary neighbours.
    pub same_polygon_diagonals: bool,
}

/// Undirected visibility graph; adjacency lists hold edge indices in
/// insertion order.
#[derive(Clone, Debug, Default)]
pub struct VisibilityGraph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    adj: Vec<Vec<usize>>,
    by_tag: HashMap<VertexTag, VertexId>,
}

impl VisibilityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, tag: VertexTag, point: Point) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex { tag, point });
        self.adj.push(Vec::new());
        self.by_tag.entry(tag).or_insert(id);
        id
    }

    /// Make `tag` resolve to an existing vertex (coincident map points).
    pub(crate) fn alias(&mut self, tag: VertexTag, id: VertexId) {
        self.by_tag.entry(tag).or_insert(id);
    }

    /// Insert `{a, b}` weighted by distance. Self-loops are ignored and an
    /// existing edge is returned unchanged.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Option<usize> {
        if a == b || a.0 >= self.vertices.len() || b.0 >= self.vertices.len() {
            return None;
        }
        if let Some(existing) = self.edge_index(a, b) {
            return Some(existing);
        }
        let weight = crate::geom2::distance(self.point(a), self.point(b));
        let idx = self.edges.len();
        self.edges.push(Edge { a, b, weight });
        self.adj[a.0].push(idx);
        self.adj[b.0].push(idx);
        Some(idx)
    }

    fn edge_index(&self, a: VertexId, b: VertexId) -> Option<usize> {
        self.adj
            .get(a.0)?
            .iter()
            .copied()
            .find(|&e| self.edges[e].other(a) == b)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        v.0 < self.vertices.len()
    }
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
    pub fn ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId)
    }
    /// Panics on an id from another graph.
    #[inline]
    pub fn vertex(&self, v: VertexId) -> &Vertex {
        &self.vertices[v.0]
    }
    #[inline]
    pub fn point(&self, v: VertexId) -> Point {
        self.vertices[v.0].point
    }
    #[inline]
    pub fn tag(&self, v: VertexId) -> VertexTag {
        self.vertices[v.0].tag
    }

    /// Neighbours of `v` with edge weights, in edge insertion order.
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.adj
            .get(v.0)
            .into_iter()
            .flatten()
            .map(move |&e| (self.edges[e].other(v), self.edges[e].weight))
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.adj.get(v.0).map_or(0, Vec::len)
    }

    pub fn has_edge(&self, a: VertexId, b: VertexId) -> bool {
        self.edge_index(a, b).is_some()
    }

    pub fn edge_weight(&self, a: VertexId, b: VertexId) -> Option<f64> {
        self.edge_index(a, b).map(|e| self.edges[e].weight)
    }

    /// First vertex at `p` (per-coordinate tolerance `cfg.eps_point`).
    pub fn find(&self, p: Point, cfg: GeomCfg) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|v| points_equal(v.point, p, cfg))
            .map(VertexId)
    }

    /// Vertex carrying `tag`, including tags merged into a coincident vertex.
    pub fn find_tag(&self, tag: VertexTag) -> Option<VertexId> {
        self.by_tag.get(&tag).copied()
    }

    #[inline]
    pub fn start(&self) -> Option<VertexId> {
        self.find_tag(VertexTag::Start)
    }
    #[inline]
    pub fn end(&self) -> Option<VertexId> {
        self.find_tag(VertexTag::End)
    }

    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }
}
