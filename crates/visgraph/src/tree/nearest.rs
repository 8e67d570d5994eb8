use crate::geom2::{distance, Point};
use crate::visibility::VertexId;

use super::types::{QueryError, SpanningTree};

impl SpanningTree<'_> {
    /// Tree vertex closest to `p` and its distance. Linear scan in attachment
    /// order; the first vertex wins ties.
    pub fn nearest(&self, p: Point) -> Result<(VertexId, f64), QueryError> {
        let mut best: Option<(VertexId, f64)> = None;
        for &v in &self.order {
            let d = distance(self.graph.point(v), p);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((v, d));
            }
        }
        best.ok_or(QueryError::EmptyTree)
    }
}
