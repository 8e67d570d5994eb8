use std::collections::VecDeque;

use crate::visibility::VertexId;

use super::types::{Path, QueryError, SpanningTree};

impl SpanningTree<'_> {
    /// The unique tree path from `from` to `to`, both inclusive.
    ///
    /// Single-source BFS over tree edges with parent pointers; stops when `to`
    /// is dequeued. Fails with `NoPath` if either endpoint is not in the tree.
    pub fn path(&self, from: VertexId, to: VertexId) -> Result<Path, QueryError> {
        if !self.contains(from) || !self.contains(to) {
            return Err(QueryError::NoPath { from, to });
        }
        let n = self.in_tree.len();
        let mut visited = vec![false; n];
        let mut came_from: Vec<Option<VertexId>> = vec![None; n];
        let mut queue = VecDeque::new();
        visited[from.0] = true;
        queue.push_back(from);

        let mut reached = false;
        while let Some(u) = queue.pop_front() {
            if u == to {
                reached = true;
                break;
            }
            for &v in self.neighbors(u) {
                if !visited[v.0] {
                    visited[v.0] = true;
                    came_from[v.0] = Some(u);
                    queue.push_back(v);
                }
            }
        }
        if !reached {
            return Err(QueryError::NoPath { from, to });
        }

        let mut vertices = vec![to];
        let mut cur = to;
        while let Some(prev) = came_from[cur.0] {
            vertices.push(prev);
            cur = prev;
        }
        vertices.reverse();
        let points = vertices.iter().map(|&v| self.graph.point(v)).collect();
        Ok(Path { vertices, points })
    }
}
