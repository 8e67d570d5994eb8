//! Prim's algorithm over the visibility graph.
//!
//! Dense variant (linear scan for the next vertex): visibility graphs are
//! close to complete, so O(V²) matches a heap version and keeps tie-breaking
//! trivial to state.

use tracing::debug;

use crate::visibility::{VertexId, VisibilityGraph};

use super::types::{SpanningTree, TreeEdge};

/// Minimum spanning tree rooted at the graph's start vertex (first vertex if
/// the graph has no start tag). Empty for an empty graph.
pub fn minimum_spanning_tree(graph: &VisibilityGraph) -> SpanningTree<'_> {
    let root = graph
        .start()
        .or_else(|| (graph.vertex_count() > 0).then_some(VertexId(0)));
    match root {
        Some(r) => prim_from(graph, r),
        None => SpanningTree::empty(graph),
    }
}

/// Grow a minimum spanning tree of `root`'s component.
///
/// Ties on the cheapest crossing edge go to the lowest vertex id; among
/// equal-weight links to one vertex the first tree vertex that offered it
/// stays its parent. Vertices in other components are left out.
pub fn prim_from(graph: &VisibilityGraph, root: VertexId) -> SpanningTree<'_> {
    let mut tree = SpanningTree::empty(graph);
    if !graph.contains(root) {
        return tree;
    }
    let n = graph.vertex_count();
    let mut key = vec![f64::INFINITY; n];
    let mut link: Vec<Option<VertexId>> = vec![None; n];
    key[root.0] = 0.0;

    loop {
        let mut next: Option<usize> = None;
        for v in 0..n {
            if tree.in_tree[v] || !key[v].is_finite() {
                continue;
            }
            if next.map_or(true, |u| key[v] < key[u]) {
                next = Some(v);
            }
        }
        let Some(u) = next else { break };
        let uid = VertexId(u);
        tree.in_tree[u] = true;
        tree.order.push(uid);
        if let Some(p) = link[u] {
            tree.parent[u] = Some(p);
            tree.edges.push(TreeEdge {
                parent: p,
                child: uid,
                weight: key[u],
            });
            tree.adj[p.0].push(uid);
            tree.adj[u].push(p);
        }
        for (v, w) in graph.neighbors(uid) {
            if !tree.in_tree[v.0] && w < key[v.0] {
                key[v.0] = w;
                link[v.0] = Some(uid);
            }
        }
    }
    debug!(
        root = root.0,
        vertices = tree.order.len(),
        unreached = n - tree.order.len(),
        weight = tree.total_weight(),
        "spanning tree built"
    );
    tree
}
