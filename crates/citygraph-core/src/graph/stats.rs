//! Summary statistics for a weighted graph and its SCC partition.
//!
//! # Statistics Provided
//!
//! - **vertex_count** / **edge_count**: logical size of the original graph.
//! - **density**: `edge_count / (vertex_count * (vertex_count - 1))`; zero for
//!   graphs with fewer than two vertices.
//! - **component_count**: number of SCCs. Equals `vertex_count` when no
//!   vertices are mutually reachable.
//! - **cyclic_component_count**: SCCs with more than one member, plus
//!   singletons carrying a self-loop.
//! - **weakly_connected_component_count**: pieces of the graph once edge
//!   direction is ignored.
//! - **isolated_vertex_count**: vertices with no in-edges and no out-edges.
//! - **max_in_degree** / **max_out_degree**: over stored adjacency records.

use petgraph::algo::connected_components;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use crate::graph::scc::SccResult;
use crate::graph::weighted::WeightedGraph;

/// Summary statistics for one analysed graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub directed: bool,
    pub density: f64,
    pub component_count: usize,
    pub cyclic_component_count: usize,
    pub weakly_connected_component_count: usize,
    pub isolated_vertex_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

impl GraphStats {
    /// Compute statistics for `graph`, whose SCC partition is `scc`.
    #[must_use]
    pub fn compute(graph: &WeightedGraph, scc: &SccResult) -> Self {
        let (out_degree, in_degree) = graph.degrees();

        let isolated_vertex_count = out_degree
            .iter()
            .zip(&in_degree)
            .filter(|&(&out_d, &in_d)| out_d == 0 && in_d == 0)
            .count();

        let cyclic_component_count = scc
            .components()
            .iter()
            .filter(|members| match members.as_slice() {
                [single] => graph.has_self_loop(*single),
                _ => true,
            })
            .count();

        Self {
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            directed: graph.is_directed(),
            density: compute_density(graph.vertex_count(), graph.edge_count()),
            component_count: scc.component_count(),
            cyclic_component_count,
            weakly_connected_component_count: weak_components(graph),
            isolated_vertex_count,
            max_in_degree: in_degree.iter().copied().max().unwrap_or(0),
            max_out_degree: out_degree.iter().copied().max().unwrap_or(0),
        }
    }

    /// Return `true` if the graph contains at least one cycle.
    #[must_use]
    pub const fn has_cycles(&self) -> bool {
        self.cyclic_component_count > 0
    }

    /// Return `true` if the graph has no edges.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.edge_count == 0
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(vertex_count: usize, edge_count: usize) -> f64 {
    if vertex_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (vertex_count * (vertex_count - 1)) as f64;
    edge_count as f64 / max_edges
}

/// Count weakly connected components: direction is ignored, so each
/// disjoint piece of the graph counts once.
fn weak_components(graph: &WeightedGraph) -> usize {
    let mut view: DiGraph<(), ()> =
        DiGraph::with_capacity(graph.vertex_count(), graph.edge_count());
    for _ in 0..graph.vertex_count() {
        view.add_node(());
    }
    for (from, to, _) in graph.edges() {
        view.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
    }
    connected_components(&view)
}
