//! Walk around a single square obstacle and print each stage.
//!
//! Usage:
//!   cargo run -p visgraph --example square_obstacle

use visgraph::prelude::*;

const MAP: &str = "\
-5, 5
15, 5

4
0, 0
10, 0
10, 10
0, 10
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let map: Map = MAP.parse()?;
    let graph = build_graph(&map, VisibilityCfg::default());
    println!(
        "graph: V={}, E={}",
        graph.vertex_count(),
        graph.edge_count()
    );
    if let Some(s) = graph.start() {
        for (v, w) in graph.neighbors(s) {
            println!("  start -> {} {:?} (w={w:.3})", graph.tag(v), graph.point(v));
        }
    }
    let tree = minimum_spanning_tree(&graph);
    println!("tree: V={}, weight={:.3}", tree.len(), tree.total_weight());
    let path = plan_with_defaults(&map)?;
    for p in &path.points {
        println!("  ({}, {})", p.x, p.y);
    }
    Ok(())
}
