//! Map model: start/end points and polygonal obstacles.
//!
//! Purpose
//! - Hold the parsed input the rest of the pipeline consumes read-only.
//! - Provide the flattened, tagged vertex list (start, end, then every polygon
//!   vertex in file order) that the visibility builder iterates over.
//!
//! Text format (one item per line, blank lines ignored)
//! - line 1: start `x, y`; line 2: end `x, y`;
//! - then per polygon: a vertex count `n >= 3`, followed by `n` vertex lines
//!   in boundary order.

mod parse;
pub mod rand;

pub use parse::MapError;

use std::fmt;

use crate::geom2::{point_in_polygon, Containment, GeomCfg, Point, Segment};

/// Where a graph vertex came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexTag {
    Start,
    End,
    Polygon { polygon: usize, index: usize },
}

impl fmt::Display for VertexTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexTag::Start => write!(f, "start"),
            VertexTag::End => write!(f, "end"),
            VertexTag::Polygon { polygon, index } => write!(f, "p{polygon}v{index}"),
        }
    }
}

/// A point together with its source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TaggedVertex {
    pub tag: VertexTag,
    pub point: Point,
}

/// Simple polygon given by its boundary ring (closing edge implied).
///
/// Invariant: at least three vertices. Simplicity is assumed, not checked.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// `None` for fewer than three vertices.
    pub fn new(vertices: Vec<Point>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        Some(Self { vertices })
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Boundary edges `(v_k, v_{k+1})`, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |k| Segment::new(self.vertices[k], self.vertices[(k + 1) % n]))
    }

    pub fn contains(&self, p: Point, cfg: GeomCfg) -> Containment {
        point_in_polygon(p, &self.vertices, cfg)
    }
}

/// Parsed map; immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Map {
    pub start: Point,
    pub end: Point,
    pub polygons: Vec<Polygon>,
}

impl Map {
    pub fn new(start: Point, end: Point, polygons: Vec<Polygon>) -> Self {
        Self {
            start,
            end,
            polygons,
        }
    }

    /// Start, end, then all polygon vertices in order.
    pub fn vertices(&self) -> Vec<TaggedVertex> {
        let mut out = Vec::with_capacity(2 + self.polygon_vertex_count());
        out.push(TaggedVertex {
            tag: VertexTag::Start,
            point: self.start,
        });
        out.push(TaggedVertex {
            tag: VertexTag::End,
            point: self.end,
        });
        for (polygon, poly) in self.polygons.iter().enumerate() {
            for (index, &point) in poly.vertices().iter().enumerate() {
                out.push(TaggedVertex {
                    tag: VertexTag::Polygon { polygon, index },
                    point,
                });
            }
        }
        out
    }

    pub fn polygon_vertex_count(&self) -> usize {
        self.polygons.iter().map(Polygon::len).sum()
    }
}

/// Writes the text format accepted by `str::parse::<Map>()`.
impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}, {}", self.start.x, self.start.y)?;
        writeln!(f, "{}, {}", self.end.x, self.end.y)?;
        for (k, poly) in self.polygons.iter().enumerate() {
            if k > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", poly.len())?;
            for v in poly.vertices() {
                writeln!(f, "{}, {}", v.x, v.y)?;
            }
        }
        Ok(())
    }
}
