//! Graph construction: vertex merge, boundary edges, pairwise visibility.

use tracing::debug;

use crate::geom2::{
    classify_intersection, point_on_segment, points_equal, Containment, GeomCfg, Intersection,
    Point, Segment,
};
use crate::map::{Map, Polygon, VertexTag};

use super::types::{VertexId, VisibilityCfg, VisibilityGraph};

/// Build the visibility graph of `map`.
///
/// Vertices are the map's flattened vertex list with coincident points merged.
/// Boundary edges of every polygon are always present; every other unordered
/// pair is connected iff `is_visible` holds (same-polygon pairs only when
/// `cfg.same_polygon_diagonals` is set). O(V² · E).
pub fn build_graph(map: &Map, cfg: VisibilityCfg) -> VisibilityGraph {
    let geom = cfg.geom;
    let mut graph = VisibilityGraph::new();
    // Polygons each graph vertex belongs to.
    let mut owners: Vec<Vec<usize>> = Vec::new();
    // Graph vertex for polygon k, position i.
    let mut slot: Vec<Vec<VertexId>> = map
        .polygons
        .iter()
        .map(|p| Vec::with_capacity(p.len()))
        .collect();

    for tv in map.vertices() {
        let id = match graph.find(tv.point, geom) {
            Some(id) => {
                graph.alias(tv.tag, id);
                id
            }
            None => {
                owners.push(Vec::new());
                graph.add_vertex(tv.tag, tv.point)
            }
        };
        if let VertexTag::Polygon { polygon, .. } = tv.tag {
            if !owners[id.0].contains(&polygon) {
                owners[id.0].push(polygon);
            }
            slot[polygon].push(id);
        }
    }

    for ids in &slot {
        let n = ids.len();
        for i in 0..n {
            graph.add_edge(ids[i], ids[(i + 1) % n]);
        }
    }
    let boundary_edges = graph.edge_count();

    let n = graph.vertex_count();
    let mut tested = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (VertexId(i), VertexId(j));
            if graph.has_edge(a, b) {
                continue;
            }
            if !cfg.same_polygon_diagonals && owners[i].iter().any(|k| owners[j].contains(k)) {
                continue;
            }
            tested += 1;
            if is_visible(graph.point(a), graph.point(b), &map.polygons, geom) {
                graph.add_edge(a, b);
            }
        }
    }
    debug!(
        vertices = n,
        boundary_edges,
        candidate_pairs = tested,
        edges = graph.edge_count(),
        "visibility graph built"
    );
    graph
}

/// Whether the open segment `p`–`q` stays out of every obstacle.
///
/// Blocking contacts:
/// - a proper crossing with, or collinear overlap of, an edge that does not
///   have `p` or `q` as an endpoint;
/// - any stretch of the segment strictly inside a polygon. The segment is cut
///   at every polygon vertex it passes through and each piece's midpoint is
///   classified; between cuts the segment meets no boundary, so the midpoint
///   decides the whole piece.
///
/// Grazing a vertex or touching an edge at a single point does not block.
/// Coincident `p` and `q` are never visible.
pub fn is_visible(p: Point, q: Point, polygons: &[Polygon], cfg: GeomCfg) -> bool {
    if points_equal(p, q, cfg) {
        return false;
    }
    let cand = Segment::new(p, q);
    let dir = q - p;
    let len2 = dir.norm_squared();
    let mut cuts: Vec<f64> = vec![0.0, 1.0];
    for poly in polygons {
        for edge in poly.edges() {
            let shared = [edge.a, edge.b]
                .iter()
                .any(|&e| points_equal(e, p, cfg) || points_equal(e, q, cfg));
            if shared {
                continue;
            }
            match classify_intersection(&cand, &edge, cfg) {
                Intersection::Proper | Intersection::Overlap => return false,
                Intersection::Touch | Intersection::None => {}
            }
        }
        for &v in poly.vertices() {
            if point_on_segment(v, &cand, cfg) {
                cuts.push(((v - p).dot(&dir) / len2).clamp(0.0, 1.0));
            }
        }
    }
    cuts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let len = len2.sqrt();
    cuts.windows(2)
        .filter(|w| (w[1] - w[0]) * len > cfg.eps_point)
        .all(|w| {
            let mid = cand.point_at(0.5 * (w[0] + w[1]));
            polygons
                .iter()
                .all(|poly| poly.contains(mid, cfg) != Containment::Inside)
        })
}
