//! Topological ordering via Kahn's algorithm.
//!
//! Vertices whose in-degree reaches zero are emitted in FIFO order, seeded
//! with the zero-in-degree vertices in ascending index order. When a cycle
//! exists the queue drains early; the vertices emitted up to that point are
//! still a valid topological prefix, and the result is flagged as cyclic.

#![allow(clippy::module_name_repetitions)]

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::graph::weighted::WeightedGraph;
use crate::metrics::Metrics;

/// Output of [`kahn_sort`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopoOrder {
    order: Vec<usize>,
    has_cycle: bool,
}

impl TopoOrder {
    /// Emitted vertices: a full permutation, or a strict prefix when cyclic.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Consume the result and keep only the order.
    #[must_use]
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    #[must_use]
    pub const fn has_cycle(&self) -> bool {
        self.has_cycle
    }

    /// Returns `true` when the order covers every vertex.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !self.has_cycle
    }

    /// Position of `vertex` in the order, if it was emitted.
    #[must_use]
    pub fn position(&self, vertex: usize) -> Option<usize> {
        self.order.iter().position(|&v| v == vertex)
    }
}

/// Order the vertices of a directed graph so every edge points forward.
///
/// # Errors
///
/// Returns [`GraphError::NotDirected`] for undirected graphs.
#[instrument(skip_all, fields(vertices = graph.vertex_count()))]
pub fn kahn_sort(
    graph: &WeightedGraph,
    metrics: &mut (impl Metrics + ?Sized),
) -> Result<TopoOrder, GraphError> {
    if !graph.is_directed() {
        return Err(GraphError::NotDirected {
            operation: "topological sort",
        });
    }

    metrics.start_timing();
    let order = kahn_order(graph, metrics);
    metrics.stop_timing();

    let has_cycle = order.len() != graph.vertex_count();
    debug!(emitted = order.len(), has_cycle, "kahn sort finished");
    Ok(TopoOrder { order, has_cycle })
}

/// The untimed core of [`kahn_sort`]; the caller has already checked that
/// the graph is directed.
pub(crate) fn kahn_order(graph: &WeightedGraph, metrics: &mut (impl Metrics + ?Sized)) -> Vec<usize> {
    let n = graph.vertex_count();
    let mut in_degree = vec![0_usize; n];

    for (_, to, _) in graph.edges() {
        in_degree[to] += 1;
        metrics.increment("edges_scanned");
    }

    let mut queue: VecDeque<usize> = VecDeque::new();
    for (vertex, &degree) in in_degree.iter().enumerate() {
        if degree == 0 {
            queue.push_back(vertex);
            metrics.increment("queue_pushes");
        }
    }

    let mut order = Vec::with_capacity(n);
    while let Some(u) = queue.pop_front() {
        metrics.increment("queue_pops");
        order.push(u);

        for edge in graph.adjacent(u) {
            let v = edge.to;
            in_degree[v] -= 1;
            metrics.increment("in_degree_updates");
            if in_degree[v] == 0 {
                queue.push_back(v);
                metrics.increment("queue_pushes");
            }
        }
    }

    order
}
