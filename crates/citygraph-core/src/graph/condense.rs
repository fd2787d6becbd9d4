//! SCC condensation: collapse every strongly connected component to a single
//! vertex.
//!
//! The result is a DAG over component indices `0..C`, numbered exactly as in
//! the [`SccResult`] it was built from. Edges inside a component are dropped.
//! Parallel crossings between the same two components collapse to a single
//! edge that keeps the weight of the *first* crossing edge met while
//! enumerating the original graph (ascending source vertex, then adjacency
//! order). No min/sum aggregation is applied.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::scc::SccResult;
use crate::graph::weighted::WeightedGraph;
use crate::metrics::Metrics;

/// The acyclic quotient graph of a directed graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condensation {
    dag: WeightedGraph,
    components: Vec<Vec<usize>>,
    component_of: Vec<usize>,
}

impl Condensation {
    /// The condensed DAG; vertex `i` stands for component `i`.
    #[must_use]
    pub const fn dag(&self) -> &WeightedGraph {
        &self.dag
    }

    /// Consume the condensation and keep only the DAG.
    #[must_use]
    pub fn into_dag(self) -> WeightedGraph {
        self.dag
    }

    #[must_use]
    pub fn components(&self) -> &[Vec<usize>] {
        &self.components
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Condensed vertex holding original `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not a vertex of the original graph.
    #[must_use]
    pub fn component_of(&self, vertex: usize) -> usize {
        self.component_of[vertex]
    }

    /// Original vertices collapsed into condensed vertex `component`.
    #[must_use]
    pub fn members(&self, component: usize) -> &[usize] {
        self.components.get(component).map_or(&[], Vec::as_slice)
    }
}

/// Build the condensation of `graph` from its SCC partition.
///
/// `scc` must have been computed on `graph`.
#[must_use]
#[instrument(skip_all, fields(components = scc.component_count()))]
pub fn condense(
    graph: &WeightedGraph,
    scc: &SccResult,
    metrics: &mut (impl Metrics + ?Sized),
) -> Condensation {
    metrics.start_timing();

    let count = scc.component_count();
    let component_of = scc.vertex_to_component();
    let mut dag = WeightedGraph::directed(count);
    // Component pairs already linked.
    let mut seen: HashSet<(usize, usize)> = HashSet::new();

    for (from, to, weight) in graph.edges() {
        metrics.increment("edges_scanned");
        let (a, b) = (component_of[from], component_of[to]);
        if a == b || !seen.insert((a, b)) {
            continue;
        }
        dag.push_record(a, b, weight);
        metrics.increment("condensed_edges");
    }

    metrics.stop_timing();
    debug!(edges = dag.edge_count(), "condensation built");

    Condensation {
        dag,
        components: scc.components().to_vec(),
        component_of: component_of.to_vec(),
    }
}
