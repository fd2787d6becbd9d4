//! Longest paths on a DAG: rooted at a source, and anywhere in the graph.
//!
//! [`longest_paths`] mirrors [`shortest_paths`](super::shortest_paths) with
//! the comparison flipped, so unreachable vertices stay at the −∞ sentinel.
//! [`critical_path`] starts every vertex at distance zero, which makes each
//! vertex a candidate start and yields the heaviest path in the whole DAG.

#![allow(clippy::module_name_repetitions)]

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::graph::weighted::WeightedGraph;
use crate::metrics::Metrics;
use crate::paths::{dag_order, path_sum, walk_parents};

/// Longest distances and parent pointers rooted at `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongestPaths {
    source: usize,
    /// `None` is the −∞ sentinel: not reachable from the source.
    distances: Vec<Option<i64>>,
    parents: Vec<Option<usize>>,
}

impl LongestPaths {
    #[must_use]
    pub const fn source(&self) -> usize {
        self.source
    }

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

    /// Vertices of a longest path from the source to `vertex`; empty when
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

/// The heaviest directed path anywhere in a DAG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriticalPath {
    /// Vertices from start to end. Empty only for a graph with no vertices.
    pub path: Vec<usize>,
    /// Sum of edge weights along `path`.
    pub length: i64,
    /// Last vertex of the path.
    pub end: Option<usize>,
}

impl CriticalPath {
    #[must_use]
    pub const fn start(&self) -> Option<usize> {
        match self.path.as_slice() {
            [first, ..] => Some(*first),
            [] => None,
        }
    }

    /// Number of edges on the path.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Compute longest distances from `source` over a DAG.
///
/// Only vertices already reached from `source` relax their out-edges.
///
/// # Errors
///
/// - [`GraphError::NotDirected`] for undirected graphs.
/// - [`GraphError::VertexOutOfRange`] if `source` is not a vertex.
/// - [`GraphError::CycleDetected`] if the graph is not acyclic.
/// - [`GraphError::WeightOverflow`] if a path sum leaves the `i64` range.
#[instrument(skip(graph, metrics), fields(vertices = graph.vertex_count()))]
pub fn longest_paths(
    graph: &WeightedGraph,
    source: usize,
    metrics: &mut (impl Metrics + ?Sized),
) -> Result<LongestPaths, GraphError> {
    const OPERATION: &str = "DAG longest path";

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
            if distances[edge.to].is_none_or(|current| candidate > current) {
                distances[edge.to] = Some(candidate);
                parents[edge.to] = Some(u);
                metrics.increment("distance_updates");
            }
        }
    }

    metrics.stop_timing();
    debug!(
        reachable = distances.iter().filter(|d| d.is_some()).count(),
        "longest paths computed"
    );

    Ok(LongestPaths {
        source,
        distances,
        parents,
    })
}

/// Find the heaviest path in a DAG, with no fixed start vertex.
///
/// Ties on the maximum distance go to the lowest vertex index.
///
/// # Errors
///
/// - [`GraphError::NotDirected`] for undirected graphs.
/// - [`GraphError::CycleDetected`] if the graph is not acyclic.
/// - [`GraphError::WeightOverflow`] if a path sum leaves the `i64` range.
#[instrument(skip_all, fields(vertices = graph.vertex_count()))]
pub fn critical_path(
    graph: &WeightedGraph,
    metrics: &mut (impl Metrics + ?Sized),
) -> Result<CriticalPath, GraphError> {
    const OPERATION: &str = "critical path";

    metrics.start_timing();
    let order = match dag_order(graph, OPERATION) {
        Ok(order) => order,
        Err(err) => {
            metrics.stop_timing();
            return Err(err);
        }
    };

    let n = graph.vertex_count();
    let mut distances = vec![0_i64; n];
    let mut parents: Vec<Option<usize>> = vec![None; n];

    for u in order {
        let dist_u = distances[u];
        for edge in graph.adjacent(u) {
            metrics.increment("relaxations");
            let candidate = match path_sum(dist_u, edge.weight, edge.to, OPERATION) {
                Ok(sum) => sum,
                Err(err) => {
                    metrics.stop_timing();
                    return Err(err);
                }
            };
            if candidate > distances[edge.to] {
                distances[edge.to] = candidate;
                parents[edge.to] = Some(u);
                metrics.increment("distance_updates");
            }
        }
    }

    let mut end: Option<usize> = None;
    for (v, &dist) in distances.iter().enumerate() {
        if end.is_none_or(|best| dist > distances[best]) {
            end = Some(v);
        }
    }

    metrics.stop_timing();

    let result = end.map_or_else(
        || CriticalPath {
            path: Vec::new(),
            length: 0,
            end: None,
        },
        |end| CriticalPath {
            path: walk_parents(&parents, end),
            length: distances[end],
            end: Some(end),
        },
    );
    debug!(
        length = result.length,
        edges = result.edge_count(),
        "critical path found"
    );
    Ok(result)
}
