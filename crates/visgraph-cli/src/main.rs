mod export;
mod provenance;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use visgraph::prelude::*;

use provenance::{write_sidecar, Provenance};

#[derive(Parser)]
#[command(name = "visgraph")]
#[command(about = "Visibility-graph planning over polygon maps")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build graph, tree and path for a map file; write tables under --out
    Run(RunArgs),
    /// Write a random map file
    Generate(GenerateArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(clap::Args, Debug, Clone)]
struct RunArgs {
    #[arg(long)]
    map: PathBuf,
    #[arg(long)]
    out: PathBuf,
    /// Query origin as `x,y`; defaults to the map's start
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    from: Option<Point>,
    /// Query target as `x,y`; defaults to the map's end
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    to: Option<Point>,
    /// Refuse maps with more vertices than this (start and end included)
    #[arg(long, default_value_t = 2000)]
    max_vertices: usize,
    /// Test non-adjacent vertices of one polygon like any other pair
    #[arg(long)]
    allow_diagonals: bool,
}

#[derive(clap::Args, Debug, Clone)]
struct GenerateArgs {
    #[arg(long)]
    out: PathBuf,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 0)]
    index: u64,
    #[arg(long, default_value_t = 4)]
    obstacles: usize,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run(args) => run(&args).map(|_| ()),
        Action::Generate(args) => generate(&args),
        Action::Report => report(),
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let coord = |t: &str| {
        t.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("bad coordinate `{}`", t.trim()))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

#[derive(Debug, Serialize)]
struct Summary {
    map: String,
    vertices: usize,
    graph_edges: usize,
    graph_weight: f64,
    tree_vertices: usize,
    tree_edges: usize,
    tree_weight: f64,
    from: [f64; 2],
    to: [f64; 2],
    from_vertex: Option<usize>,
    to_vertex: Option<usize>,
    path: Option<PathSummary>,
    outputs: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PathSummary {
    vertices: Vec<usize>,
    hops: usize,
    length: f64,
}

fn run(args: &RunArgs) -> Result<Summary> {
    tracing::info!(map = %args.map.display(), out = %args.out.display(), "run");
    let text = fs::read_to_string(&args.map)
        .with_context(|| format!("reading map {}", args.map.display()))?;
    let map: Map = text
        .parse()
        .with_context(|| format!("parsing map {}", args.map.display()))?;
    let total = map.polygon_vertex_count() + 2;
    tracing::info!(polygons = map.polygons.len(), vertices = total, "map_loaded");
    if total > args.max_vertices {
        bail!(
            "map has {total} vertices, above --max-vertices {}",
            args.max_vertices
        );
    }

    let cfg = VisibilityCfg {
        same_polygon_diagonals: args.allow_diagonals,
        ..VisibilityCfg::default()
    };
    let graph = build_graph(&map, cfg);
    tracing::info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "visibility_graph"
    );
    let tree = minimum_spanning_tree(&graph);
    tracing::info!(
        vertices = tree.len(),
        edges = tree.edges().len(),
        weight = tree.total_weight(),
        "spanning_tree"
    );

    let from = args.from.unwrap_or(map.start);
    let to = args.to.unwrap_or(map.end);
    let ends = resolve(&graph, &tree, from, cfg)
        .and_then(|a| resolve(&graph, &tree, to, cfg).map(|b| (a, b)));
    let resolved = ends.as_ref().ok().copied();
    let path = match ends.and_then(|(a, b)| tree.path(a, b)) {
        Ok(path) => {
            tracing::info!(hops = path.hops(), length = path.length(), "path");
            Some(path)
        }
        Err(err) => {
            tracing::warn!(%err, "no_path");
            None
        }
    };

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output dir {}", args.out.display()))?;
    let written = export::write_tables(&args.out, &graph, &tree, path.as_ref())?;

    let summary_path = args.out.join("summary.json");
    let summary = Summary {
        map: args.map.to_string_lossy().into_owned(),
        vertices: graph.vertex_count(),
        graph_edges: graph.edge_count(),
        graph_weight: graph.total_weight(),
        tree_vertices: tree.len(),
        tree_edges: tree.edges().len(),
        tree_weight: tree.total_weight(),
        from: [from.x, from.y],
        to: [to.x, to.y],
        from_vertex: resolved.map(|(a, _)| a.0),
        to_vertex: resolved.map(|(_, b)| b.0),
        path: path.as_ref().map(|p| PathSummary {
            vertices: p.vertices.iter().map(|v| v.0).collect(),
            hops: p.hops(),
            length: p.length(),
        }),
        outputs: written
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect(),
    };
    fs::write(&summary_path, serde_json::to_vec_pretty(&summary)?)
        .with_context(|| format!("writing {}", summary_path.display()))?;

    let record = Provenance::new(json!({
        "from": [from.x, from.y],
        "to": [to.x, to.y],
        "max_vertices": args.max_vertices,
        "allow_diagonals": args.allow_diagonals,
        "eps_collinear": cfg.geom.eps_collinear,
        "eps_point": cfg.geom.eps_point,
    }))
    .with_input(&args.map);
    write_sidecar(&summary_path, record)?;
    Ok(summary)
}

fn generate(args: &GenerateArgs) -> Result<()> {
    let cfg = MapCfg {
        obstacles: args.obstacles,
        ..MapCfg::default()
    };
    let map = draw_map(
        cfg,
        ReplayToken {
            seed: args.seed,
            index: args.index,
        },
    );
    tracing::info!(
        seed = args.seed,
        index = args.index,
        polygons = map.polygons.len(),
        vertices = map.polygon_vertex_count() + 2,
        "generate"
    );
    ensure_parent(&args.out)?;
    fs::write(&args.out, map.to_string())
        .with_context(|| format!("writing {}", args.out.display()))?;
    let record = Provenance::new(json!({
        "seed": args.seed,
        "index": args.index,
        "obstacles": args.obstacles,
        "field": cfg.field,
    }));
    write_sidecar(&args.out, record)?;
    Ok(())
}

fn report() -> Result<()> {
    let record = Provenance::new(json!({}));
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating dir {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    const SQUARE: &str = "-5, 5\n15, 5\n\n4\n0, 0\n10, 0\n10, 10\n0, 10\n";

    fn run_args(map: PathBuf, out: PathBuf) -> RunArgs {
        RunArgs {
            map,
            out,
            from: None,
            to: None,
            max_vertices: 2000,
            allow_diagonals: false,
        }
    }

    #[test]
    fn points_parse_with_spaces_and_signs() {
        assert_eq!(parse_point("-5, 2.5").unwrap(), Point::new(-5.0, 2.5));
        assert!(parse_point("1;2").is_err());
        assert!(parse_point("1,inf").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cmd::command().debug_assert();
        let cmd = Cmd::try_parse_from([
            "visgraph", "run", "--map", "m.txt", "--out", "o", "--from", "-1,2",
        ])
        .unwrap();
        match cmd.action {
            Action::Run(args) => assert_eq!(args.from, Some(Point::new(-1.0, 2.0))),
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn run_writes_tables_summary_and_sidecar() {
        let dir = tempdir().unwrap();
        let map_path = dir.path().join("square.txt");
        fs::write(&map_path, SQUARE).unwrap();
        let out = dir.path().join("out");
        let summary = run(&run_args(map_path.clone(), out.clone())).unwrap();

        assert_eq!(summary.vertices, 6);
        assert_eq!(summary.tree_edges, 5);
        assert_eq!(summary.from_vertex, Some(0));
        assert_eq!(summary.to_vertex, Some(1));
        let path = summary.path.expect("path");
        assert_eq!(path.hops, 3);
        assert_eq!(path.vertices.first(), Some(&0));
        assert_eq!(path.vertices.last(), Some(&1));
        for name in [
            export::VERTICES_CSV,
            export::GRAPH_EDGES_CSV,
            export::TREE_EDGES_CSV,
            export::PATH_CSV,
            "summary.json",
            "summary.provenance.json",
        ] {
            assert!(out.join(name).exists(), "{name} missing");
        }
        let path_csv = fs::read_to_string(out.join(export::PATH_CSV)).unwrap();
        assert_eq!(path_csv.lines().count(), 5);
        assert!(path_csv.starts_with("step,id,x,y"));
        let prov: Value =
            serde_json::from_slice(&fs::read(out.join("summary.provenance.json")).unwrap())
                .unwrap();
        assert_eq!(prov["inputs"][0], map_path.to_string_lossy().as_ref());
    }

    #[test]
    fn unreachable_end_reports_null_path() {
        let dir = tempdir().unwrap();
        let map_path = dir.path().join("boxed.txt");
        fs::write(&map_path, "5, 5\n20, 5\n4\n0, 0\n10, 0\n10, 10\n0, 10\n").unwrap();
        let out = dir.path().join("out");
        let summary = run(&run_args(map_path, out.clone())).unwrap();
        assert!(summary.path.is_none());
        assert_eq!(summary.from_vertex, Some(0));
        assert_eq!(summary.to_vertex, Some(1));
        let doc: Value = serde_json::from_slice(&fs::read(out.join("summary.json")).unwrap()).unwrap();
        assert!(doc["path"].is_null());
        let path_csv = fs::read_to_string(out.join(export::PATH_CSV)).unwrap();
        assert_eq!(path_csv.lines().count(), 1);
    }

    #[test]
    fn vertex_limit_is_enforced() {
        let dir = tempdir().unwrap();
        let map_path = dir.path().join("square.txt");
        fs::write(&map_path, SQUARE).unwrap();
        let mut args = run_args(map_path, dir.path().join("out"));
        args.max_vertices = 5;
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("--max-vertices"));
    }

    #[test]
    fn bad_map_names_the_file() {
        let dir = tempdir().unwrap();
        let map_path = dir.path().join("bad.txt");
        fs::write(&map_path, "0, 0\n").unwrap();
        let err = run(&run_args(map_path, dir.path().join("out"))).unwrap_err();
        assert!(err.to_string().contains("parsing map"));
        assert!(err.root_cause().to_string().contains("line"));
    }

    #[test]
    fn generated_map_is_readable() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("maps/gen.txt");
        let args = GenerateArgs {
            out: out.clone(),
            seed: 7,
            index: 3,
            obstacles: 5,
        };
        generate(&args).unwrap();
        let map: Map = fs::read_to_string(&out).unwrap().parse().unwrap();
        assert_eq!(map.polygons.len(), 5);
        assert!(dir.path().join("maps/gen.provenance.json").exists());
        let summary = run(&run_args(out, dir.path().join("run"))).unwrap();
        assert!(summary.path.is_some());
    }
}
