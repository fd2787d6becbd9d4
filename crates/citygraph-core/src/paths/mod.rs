//! Single-source and global path problems on weighted DAGs.
//!
//! All solvers share the same shape: validate (directed input, source in
//! range, acyclic via an uninstrumented Kahn pre-pass), then relax every
//! edge once in topological order. Validation happens before any distance
//! array exists, so a [`GraphError::CycleDetected`] costs nothing and the
//! caller can retry on the condensation.
//!
//! | Solver            | Init                    | Relax from        | Update rule |
//! |-------------------|-------------------------|-------------------|-------------|
//! | [`shortest_paths`]| +∞, source = 0          | reached vertices  | strict `<`  |
//! | [`longest_paths`] | −∞, source = 0          | reached vertices  | strict `>`  |
//! | [`critical_path`] | 0 everywhere            | every vertex      | strict `>`  |
//!
//! Path sums use checked `i64` addition: a sum that leaves the `i64` range
//! fails with [`GraphError::WeightOverflow`] rather than wrapping or
//! clamping, so every reported distance is an exact path weight.
//!
//! The source-rooted longest path and the global critical path are different
//! problems: the former only sees vertices reachable from the source, the
//! latter treats every vertex as a potential start.

pub mod longest;
pub mod shortest;

pub use longest::{CriticalPath, LongestPaths, critical_path, longest_paths};
pub use shortest::{ShortestPaths, shortest_paths};

use crate::error::GraphError;
use crate::graph::topo::kahn_order;
use crate::graph::weighted::WeightedGraph;
use crate::metrics::NoopMetrics;

/// Check that `graph` is a DAG and return its topological order.
fn dag_order(graph: &WeightedGraph, operation: &'static str) -> Result<Vec<usize>, GraphError> {
    if !graph.is_directed() {
        return Err(GraphError::NotDirected { operation });
    }

    let order = kahn_order(graph, &mut NoopMetrics);
    if order.len() == graph.vertex_count() {
        Ok(order)
    } else {
        Err(GraphError::CycleDetected { operation })
    }
}

/// Extend a path of weight `distance` by an edge into `to`.
fn path_sum(
    distance: i64,
    weight: i64,
    to: usize,
    operation: &'static str,
) -> Result<i64, GraphError> {
    distance
        .checked_add(weight)
        .ok_or(GraphError::WeightOverflow {
            operation,
            vertex: to,
        })
}

/// Follow parent pointers from `end` back to a root; returns root-first.
fn walk_parents(parents: &[Option<usize>], end: usize) -> Vec<usize> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(parent) = parents[current] {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}
