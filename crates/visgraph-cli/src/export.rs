//! Tabular exports of a run: one CSV per stage, headers always present.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path as FsPath, PathBuf};
use visgraph::map::VertexTag;
use visgraph::tree::{Path, SpanningTree};
use visgraph::visibility::VisibilityGraph;

pub const VERTICES_CSV: &str = "vertices.csv";
pub const GRAPH_EDGES_CSV: &str = "graph_edges.csv";
pub const TREE_EDGES_CSV: &str = "tree_edges.csv";
pub const PATH_CSV: &str = "path.csv";

/// Vertex table: id, tag, polygon/index (null for start and end), coordinates,
/// and whether the tree reaches the vertex.
pub fn vertices_frame(graph: &VisibilityGraph, tree: &SpanningTree<'_>) -> PolarsResult<DataFrame> {
    let n = graph.vertex_count();
    let mut id = Vec::with_capacity(n);
    let mut tag = Vec::with_capacity(n);
    let mut polygon: Vec<Option<u64>> = Vec::with_capacity(n);
    let mut index: Vec<Option<u64>> = Vec::with_capacity(n);
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    let mut in_tree = Vec::with_capacity(n);
    for v in graph.ids() {
        let vertex = graph.vertex(v);
        id.push(v.0 as u64);
        tag.push(vertex.tag.to_string());
        match vertex.tag {
            VertexTag::Polygon { polygon: k, index: i } => {
                polygon.push(Some(k as u64));
                index.push(Some(i as u64));
            }
            VertexTag::Start | VertexTag::End => {
                polygon.push(None);
                index.push(None);
            }
        }
        x.push(vertex.point.x);
        y.push(vertex.point.y);
        in_tree.push(tree.contains(v));
    }
    df!(
        "id" => id,
        "tag" => tag,
        "polygon" => polygon,
        "index" => index,
        "x" => x,
        "y" => y,
        "in_tree" => in_tree
    )
}

pub fn graph_edges_frame(graph: &VisibilityGraph) -> PolarsResult<DataFrame> {
    let edges = graph.edges();
    df!(
        "a" => edges.iter().map(|e| e.a.0 as u64).collect::<Vec<_>>(),
        "b" => edges.iter().map(|e| e.b.0 as u64).collect::<Vec<_>>(),
        "weight" => edges.iter().map(|e| e.weight).collect::<Vec<_>>()
    )
}

/// Tree edges in attachment order.
pub fn tree_edges_frame(tree: &SpanningTree<'_>) -> PolarsResult<DataFrame> {
    let edges = tree.edges();
    df!(
        "parent" => edges.iter().map(|e| e.parent.0 as u64).collect::<Vec<_>>(),
        "child" => edges.iter().map(|e| e.child.0 as u64).collect::<Vec<_>>(),
        "weight" => edges.iter().map(|e| e.weight).collect::<Vec<_>>()
    )
}

/// Path steps; zero rows when there is no path.
pub fn path_frame(path: Option<&Path>) -> PolarsResult<DataFrame> {
    let (vertices, points) = match path {
        Some(p) => (p.vertices.as_slice(), p.points.as_slice()),
        None => (&[][..], &[][..]),
    };
    df!(
        "step" => (0..vertices.len() as u64).collect::<Vec<_>>(),
        "id" => vertices.iter().map(|v| v.0 as u64).collect::<Vec<_>>(),
        "x" => points.iter().map(|p| p.x).collect::<Vec<_>>(),
        "y" => points.iter().map(|p| p.y).collect::<Vec<_>>()
    )
}

pub fn write_csv(df: &mut DataFrame, path: &FsPath) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Write all four tables under `dir`; returns the written paths.
pub fn write_tables(
    dir: &FsPath,
    graph: &VisibilityGraph,
    tree: &SpanningTree<'_>,
    path: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let tables = [
        (VERTICES_CSV, vertices_frame(graph, tree)?),
        (GRAPH_EDGES_CSV, graph_edges_frame(graph)?),
        (TREE_EDGES_CSV, tree_edges_frame(tree)?),
        (PATH_CSV, path_frame(path)?),
    ];
    let mut written = Vec::with_capacity(tables.len());
    for (name, mut df) in tables {
        let target = dir.join(name);
        write_csv(&mut df, &target)?;
        tracing::debug!(file = name, rows = df.height(), "table_written");
        written.push(target);
    }
    Ok(written)
}
