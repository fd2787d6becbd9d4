//! Single-source shortest paths on a DAG.

#![allow(clippy::module_name_repetitions)]

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::graph::weighted::WeightedGraph;
use crate::metrics::Metrics;
use crate::paths::{dag_order, path_sum, walk_parents};

/// Shortest distances and the shortest-path tree rooted at `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortestPaths {
    source: usize,
    /// `None` is the +∞ sentinel: not reachable from the source.
    distances: Vec<Option<i64>>,
    parents: Vec<Option<usize>>,
}

impl ShortestPaths {
    #[must_use]
    pub const fn source(&self) -> usize {
        self.source
    }

    /// Shortest distance from the source, `None` when unreachable.
    #[must_use]
    pub fn distance(&self, vertex: usize) -> Option<i64> {
        self.distances.get(vertex).copied().flatten()
    }

    #[must_use]
    pub fn is_reachable(&self, vertex: usize) -> bool {
        self.distance(vertex).is_some()
    }

    #[must_use]
    pub fn distances(&self) -> &[Option<i64>] {
        &self.distances
    }

    #[must_use]
    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    /// Vertices of a shortest path from the source to `vertex`; empty when
    /// `vertex` is unreachable.
    #[must_use]
    pub fn path_to(&self, vertex: usize) -> Vec<usize> {
        if self.is_reachable(vertex) {
            walk_parents(&self.parents, vertex)
        } else {
            Vec::new()
        }
    }
}

/// Compute shortest distances from `source` over a DAG.
///
/// # Errors
///
/// - [`GraphError::NotDirected`] for undirected graphs.
/// - [`GraphError::VertexOutOfRange`] if `source` is not a vertex.
/// - [`GraphError::CycleDetected`] if the graph is not acyclic.
/// - [`GraphError::WeightOverflow`] if a path sum leaves the `i64` range.
#[instrument(skip(graph, metrics), fields(vertices = graph.vertex_count()))]
pub fn shortest_paths(
    graph: &WeightedGraph,
    source: usize,
    metrics: &mut (impl Metrics + ?Sized),
) -> Result<ShortestPaths, GraphError> {
    const OPERATION: &str = "DAG shortest path";

    if !graph.is_directed() {
        return Err(GraphError::NotDirected { operation: OPERATION });
    }
    graph.check_vertex(source)?;

    metrics.start_timing();
    let order = match dag_order(graph, OPERATION) {
        Ok(order) => order,
        Err(err) => {
            metrics.stop_timing();
            return Err(err);
        }
    };

    let n = graph.vertex_count();
    let mut distances: Vec<Option<i64>> = vec![None; n];
    let mut parents: Vec<Option<usize>> = vec![None; n];
    distances[source] = Some(0);

    for u in order {
        let Some(dist_u) = distances[u] else { continue };
        for edge in graph.adjacent(u) {
            metrics.increment("relaxations");
            let candidate = match path_sum(dist_u, edge.weight, edge.to, OPERATION) {
                Ok(sum) => sum,
                Err(err) => {
                    metrics.stop_timing();
                    return Err(err);
                }
            };
            if distances[edge.to].is_none_or(|current| candidate < current) {
                distances[edge.to] = Some(candidate);
                parents[edge.to] = Some(u);
                metrics.increment("distance_updates");
            }
        }
    }

    metrics.stop_timing();
    debug!(
        reachable = distances.iter().filter(|d| d.is_some()).count(),
        "shortest paths computed"
    );

    Ok(ShortestPaths {
        source,
        distances,
        parents,
    })
}
