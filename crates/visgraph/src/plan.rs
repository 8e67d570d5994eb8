//! End-to-end pipeline: map → visibility graph → spanning tree → path.

use tracing::debug;

use crate::geom2::Point;
use crate::map::Map;
use crate::tree::{minimum_spanning_tree, Path, QueryError, SpanningTree};
use crate::visibility::{build_graph, VertexId, VisibilityCfg, VisibilityGraph};

/// Resolve a query point to a vertex: an exactly coincident graph vertex if
/// there is one (even outside the tree), else the nearest tree vertex.
pub fn resolve(
    graph: &VisibilityGraph,
    tree: &SpanningTree<'_>,
    p: Point,
    cfg: VisibilityCfg,
) -> Result<VertexId, QueryError> {
    match graph.find(p, cfg.geom) {
        Some(v) => Ok(v),
        None => tree.nearest(p).map(|(v, _)| v),
    }
}

/// Tree path between the vertices resolved for `from` and `to`.
///
/// A query point sitting on a vertex that the tree does not reach fails with
/// `NoPath` instead of silently snapping to another component.
pub fn plan(map: &Map, from: Point, to: Point, cfg: VisibilityCfg) -> Result<Path, QueryError> {
    let graph = build_graph(map, cfg);
    let tree = minimum_spanning_tree(&graph);
    let a = resolve(&graph, &tree, from, cfg)?;
    let b = resolve(&graph, &tree, to, cfg)?;
    let path = tree.path(a, b)?;
    debug!(from = a.0, to = b.0, hops = path.hops(), "path planned");
    Ok(path)
}

/// `plan` from the map's start to its end with default tolerances.
pub fn plan_with_defaults(map: &Map) -> Result<Path, QueryError> {
    plan(map, map.start, map.end, VisibilityCfg::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Polygon;
    use nalgebra::vector;

    fn square_map(start: Point) -> Map {
        let sq = Polygon::new(vec![
            vector![0.0, 0.0],
            vector![10.0, 0.0],
            vector![10.0, 10.0],
            vector![0.0, 10.0],
        ])
        .unwrap();
        Map::new(start, vector![15.0, 5.0], vec![sq])
    }

    #[test]
    fn default_plan_walks_around_the_square() {
        let path = plan_with_defaults(&square_map(vector![-5.0, 5.0])).unwrap();
        assert_eq!(path.points.len(), 4);
        assert_eq!(path.points[0], vector![-5.0, 5.0]);
        assert_eq!(path.points[3], vector![15.0, 5.0]);
    }

    #[test]
    fn free_query_points_snap_to_nearest_tree_vertex() {
        let map = square_map(vector![-5.0, 5.0]);
        let path = plan(
            &map,
            vector![0.5, 10.5],
            vector![11.0, -1.0],
            VisibilityCfg::default(),
        )
        .unwrap();
        assert_eq!(path.points.first(), Some(&vector![0.0, 10.0]));
        assert_eq!(path.points.last(), Some(&vector![10.0, 0.0]));
    }

    #[test]
    fn unreachable_end_is_no_path() {
        let err = plan_with_defaults(&square_map(vector![5.0, 5.0])).unwrap_err();
        assert!(matches!(err, QueryError::NoPath { .. }));
    }
}
