use super::*;
use crate::geom2::{Containment, GeomCfg, Point};
use crate::map::rand::{draw_map, MapCfg, ReplayToken, VertexCount};
use crate::map::{Map, Polygon, VertexTag};
use nalgebra::vector;
use proptest::prelude::*;

fn poly(pts: &[(f64, f64)]) -> Polygon {
    Polygon::new(pts.iter().map(|&(x, y)| vector![x, y]).collect()).unwrap()
}

fn square_map() -> Map {
    Map::new(
        vector![-5.0, 5.0],
        vector![15.0, 5.0],
        vec![poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])],
    )
}

fn id_at(g: &VisibilityGraph, x: f64, y: f64) -> VertexId {
    g.find(vector![x, y], GeomCfg::default()).expect("vertex")
}

#[test]
fn square_obstacle_blocks_direct_line() {
    let map = square_map();
    let g = build_graph(&map, VisibilityCfg::default());
    assert_eq!(g.vertex_count(), 6);
    let (s, e) = (g.start().unwrap(), g.end().unwrap());
    assert!(!g.has_edge(s, e));
    assert!(g.has_edge(s, id_at(&g, 0.0, 0.0)));
    assert!(g.has_edge(s, id_at(&g, 0.0, 10.0)));
    assert!(!g.has_edge(s, id_at(&g, 10.0, 0.0)));
    assert!(!g.has_edge(s, id_at(&g, 10.0, 10.0)));
    assert!(g.has_edge(e, id_at(&g, 10.0, 0.0)));
    assert!(g.has_edge(e, id_at(&g, 10.0, 10.0)));
    assert!(!g.has_edge(e, id_at(&g, 0.0, 0.0)));
    // Boundary edges, no diagonals.
    assert!(g.has_edge(id_at(&g, 0.0, 0.0), id_at(&g, 10.0, 0.0)));
    assert!(g.has_edge(id_at(&g, 0.0, 10.0), id_at(&g, 0.0, 0.0)));
    assert!(!g.has_edge(id_at(&g, 0.0, 0.0), id_at(&g, 10.0, 10.0)));
    assert_eq!(g.edge_count(), 4 + 4);
    let w = g.edge_weight(s, id_at(&g, 0.0, 0.0)).unwrap();
    assert!((w - 50f64.sqrt()).abs() < 1e-12);
}

#[test]
fn diagonal_through_interior_blocked_even_when_enabled() {
    let cfg = VisibilityCfg {
        same_polygon_diagonals: true,
        ..VisibilityCfg::default()
    };
    let g = build_graph(&square_map(), cfg);
    assert!(!g.has_edge(id_at(&g, 0.0, 0.0), id_at(&g, 10.0, 10.0)));
    assert!(!g.has_edge(id_at(&g, 10.0, 0.0), id_at(&g, 0.0, 10.0)));
}

#[test]
fn exterior_diagonal_of_concave_polygon_needs_opt_in() {
    let u = poly(&[
        (0.0, 0.0),
        (6.0, 0.0),
        (6.0, 6.0),
        (4.0, 6.0),
        (4.0, 2.0),
        (2.0, 2.0),
        (2.0, 6.0),
        (0.0, 6.0),
    ]);
    let map = Map::new(vector![-3.0, 3.0], vector![9.0, 3.0], vec![u]);
    let g = build_graph(&map, VisibilityCfg::default());
    let (a, b) = (id_at(&g, 4.0, 6.0), id_at(&g, 2.0, 6.0));
    assert!(!g.has_edge(a, b));
    let g = build_graph(
        &map,
        VisibilityCfg {
            same_polygon_diagonals: true,
            ..VisibilityCfg::default()
        },
    );
    assert!(g.has_edge(a, b));
    // Across the solid base stays blocked.
    assert!(!g.has_edge(id_at(&g, 0.0, 0.0), id_at(&g, 6.0, 6.0)));
}

#[test]
fn two_triangles_keep_clear_line_and_block_interiors() {
    let map = Map::new(
        vector![0.0, 0.0],
        vector![20.0, 0.0],
        vec![
            poly(&[(5.0, 2.0), (8.0, 2.0), (6.5, 6.0)]),
            poly(&[(12.0, -6.0), (15.0, -6.0), (13.5, -1.0)]),
        ],
    );
    let g = build_graph(&map, VisibilityCfg::default());
    assert!(g.has_edge(g.start().unwrap(), g.end().unwrap()));
    let cfg = GeomCfg::default();
    for e in g.edges() {
        let mid = (g.point(e.a) + g.point(e.b)) * 0.5;
        for p in &map.polygons {
            assert_ne!(p.contains(mid, cfg), Containment::Inside);
        }
    }
    // Straight down from the apex runs through the triangle and out its base.
    assert!(!is_visible(
        vector![6.5, 6.0],
        vector![6.5, -3.0],
        &map.polygons,
        cfg
    ));
}

#[test]
fn grazing_a_vertex_is_visible() {
    let tri = poly(&[(4.0, -2.0), (6.0, -2.0), (5.0, 0.0)]);
    let cfg = GeomCfg::default();
    assert!(is_visible(
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        std::slice::from_ref(&tri),
        cfg
    ));
}

#[test]
fn passing_through_two_corners_is_blocked() {
    let sq = poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
    let cfg = GeomCfg::default();
    assert!(!is_visible(
        vector![-5.0, -5.0],
        vector![15.0, 15.0],
        std::slice::from_ref(&sq),
        cfg
    ));
}

#[test]
fn running_along_a_foreign_edge_is_blocked() {
    let sq = poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
    let cfg = GeomCfg::default();
    assert!(!is_visible(
        vector![-5.0, 0.0],
        vector![15.0, 0.0],
        std::slice::from_ref(&sq),
        cfg
    ));
    // Coincident endpoints are never visible.
    assert!(!is_visible(
        vector![1.0, 1.0],
        vector![1.0, 1.0],
        &[],
        cfg
    ));
}

#[test]
fn start_inside_obstacle_is_isolated() {
    let map = Map::new(
        vector![5.0, 5.0],
        vector![20.0, 5.0],
        vec![poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])],
    );
    let g = build_graph(&map, VisibilityCfg::default());
    assert_eq!(g.degree(g.start().unwrap()), 0);
    assert!(g.degree(g.end().unwrap()) > 0);
}

#[test]
fn coincident_points_share_a_vertex() {
    let map = Map::new(
        vector![0.0, 0.0],
        vector![20.0, 0.0],
        vec![poly(&[(0.0, 0.0), (4.0, -1.0), (4.0, -4.0)])],
    );
    let g = build_graph(&map, VisibilityCfg::default());
    assert_eq!(g.vertex_count(), 4);
    let s = g.start().unwrap();
    assert_eq!(g.tag(s), VertexTag::Start);
    assert_eq!(g.find_tag(VertexTag::Polygon { polygon: 0, index: 0 }), Some(s));
    // Boundary edges survive the merge.
    assert!(g.has_edge(s, id_at(&g, 4.0, -1.0)));
    assert!(g.has_edge(s, id_at(&g, 4.0, -4.0)));
}

#[test]
fn graph_api_basics() {
    let mut g = VisibilityGraph::new();
    let a = g.add_vertex(VertexTag::Start, vector![0.0, 0.0]);
    let b = g.add_vertex(VertexTag::End, vector![3.0, 4.0]);
    assert_eq!(g.add_edge(a, a), None);
    let e = g.add_edge(a, b).unwrap();
    assert_eq!(g.add_edge(b, a), Some(e));
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.neighbors(a).collect::<Vec<_>>(), vec![(b, 5.0)]);
    assert_eq!(g.neighbors(b).collect::<Vec<_>>(), vec![(a, 5.0)]);
    assert_eq!(g.total_weight(), 5.0);
    assert_eq!(g.neighbors(VertexId(9)).count(), 0);
    assert_eq!(g.add_edge(a, VertexId(9)), None);
}

fn small_map(seed: u64, index: u64, obstacles: usize) -> Map {
    draw_map(
        MapCfg {
            obstacles,
            vertex_count: VertexCount::Uniform { min: 3, max: 6 },
            ..MapCfg::default()
        },
        ReplayToken { seed, index },
    )
}

fn inside_any(map: &Map, p: Point) -> bool {
    map.polygons
        .iter()
        .any(|poly| poly.contains(p, GeomCfg::default()) == Containment::Inside)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn boundary_edges_always_present(seed in any::<u64>(), index in 0u64..1000, k in 1usize..6) {
        let map = small_map(seed, index, k);
        let g = build_graph(&map, VisibilityCfg::default());
        for (pk, poly) in map.polygons.iter().enumerate() {
            let n = poly.len();
            for i in 0..n {
                let a = g.find_tag(VertexTag::Polygon { polygon: pk, index: i }).unwrap();
                let b = g.find_tag(VertexTag::Polygon { polygon: pk, index: (i + 1) % n }).unwrap();
                prop_assert!(g.has_edge(a, b));
            }
        }
    }

    #[test]
    fn edges_avoid_interiors_and_are_symmetric(seed in any::<u64>(), index in 0u64..1000, k in 1usize..6) {
        let map = small_map(seed, index, k);
        let g = build_graph(&map, VisibilityCfg::default());
        for e in g.edges() {
            let s = crate::geom2::Segment::new(g.point(e.a), g.point(e.b));
            for t in [0.25, 0.5, 0.75] {
                prop_assert!(!inside_any(&map, s.point_at(t)));
            }
            prop_assert_eq!(g.edge_weight(e.b, e.a), Some(e.weight));
        }
    }
}
