//! Strongly connected components via Tarjan's algorithm.
//!
//! # Algorithm
//!
//! Each vertex gets a discovery time and a low-link (the smallest discovery
//! time reachable through its DFS subtree plus back edges to vertices still
//! on the component stack). A vertex whose low-link equals its discovery time
//! is a component root: everything above it on the stack, and the root
//! itself, forms one SCC.
//!
//! The depth-first traversal runs on an explicit work-stack of
//! `(vertex, next_edge)` frames instead of native recursion, so the traversal
//! depth is bounded by heap memory rather than the thread's call stack.
//!
//! # Output order
//!
//! A component is appended the moment its root finishes, which yields the
//! components in reverse topological order of the condensation: if some edge
//! leads from component `A` to component `B`, then `B` appears before `A`.

#![allow(clippy::module_name_repetitions)]

use fixedbitset::FixedBitSet;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::graph::weighted::WeightedGraph;
use crate::metrics::Metrics;

/// Partition of a graph's vertices into strongly connected components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SccResult {
    components: Vec<Vec<usize>>,
    component_of: Vec<usize>,
}

impl SccResult {
    fn from_components(components: Vec<Vec<usize>>, vertex_count: usize) -> Self {
        let mut component_of = vec![0; vertex_count];
        for (index, members) in components.iter().enumerate() {
            for &v in members {
                component_of[v] = index;
            }
        }
        Self {
            components,
            component_of,
        }
    }

    /// Components in closing order; members in stack-pop order.
    #[must_use]
    pub fn components(&self) -> &[Vec<usize>] {
        &self.components
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Number of vertices in the partitioned graph.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.component_of.len()
    }

    /// Index of the component containing `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not a vertex of the partitioned graph.
    #[must_use]
    pub fn component_of(&self, vertex: usize) -> usize {
        self.component_of[vertex]
    }

    /// Vertex → component index for every vertex.
    #[must_use]
    pub fn vertex_to_component(&self) -> &[usize] {
        &self.component_of
    }

    /// Returns `true` when every component is a single vertex.
    ///
    /// This is the orchestrator's "already acyclic" test. It ignores
    /// self-loops, which the path solvers still reject as cycles.
    #[must_use]
    pub fn all_singletons(&self) -> bool {
        self.component_count() == self.vertex_count()
    }
}

/// Partition `graph` into strongly connected components.
///
/// # Errors
///
/// Returns [`GraphError::NotDirected`] for undirected graphs.
#[instrument(skip_all, fields(vertices = graph.vertex_count()))]
pub fn tarjan_scc(
    graph: &WeightedGraph,
    metrics: &mut (impl Metrics + ?Sized),
) -> Result<SccResult, GraphError> {
    if !graph.is_directed() {
        return Err(GraphError::NotDirected {
            operation: "SCC decomposition",
        });
    }

    metrics.start_timing();
    let components = Tarjan::new(graph.vertex_count()).run(graph, metrics);
    metrics.stop_timing();

    debug!(components = components.len(), "tarjan scc finished");
    Ok(SccResult::from_components(components, graph.vertex_count()))
}

/// Per-call traversal state.
struct Tarjan {
    clock: usize,
    disc: Vec<Option<usize>>,
    low: Vec<usize>,
    on_stack: FixedBitSet,
    stack: Vec<usize>,
    // Each frame: (vertex, index of the next adjacency entry to examine).
    call_stack: Vec<(usize, usize)>,
    components: Vec<Vec<usize>>,
}

impl Tarjan {
    fn new(vertex_count: usize) -> Self {
        Self {
            clock: 0,
            disc: vec![None; vertex_count],
            low: vec![0; vertex_count],
            on_stack: FixedBitSet::with_capacity(vertex_count),
            stack: Vec::new(),
            call_stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn run(
        mut self,
        graph: &WeightedGraph,
        metrics: &mut (impl Metrics + ?Sized),
    ) -> Vec<Vec<usize>> {
        for root in 0..graph.vertex_count() {
            if self.disc[root].is_none() {
                self.visit(root, graph, metrics);
            }
        }
        self.components
    }

    fn enter(&mut self, vertex: usize, metrics: &mut (impl Metrics + ?Sized)) {
        self.disc[vertex] = Some(self.clock);
        self.low[vertex] = self.clock;
        self.clock += 1;
        self.stack.push(vertex);
        self.on_stack.insert(vertex);
        self.call_stack.push((vertex, 0));
        metrics.increment("dfs_visits");
    }

    fn visit(&mut self, root: usize, graph: &WeightedGraph, metrics: &mut (impl Metrics + ?Sized)) {
        self.enter(root, metrics);

        while let Some(frame) = self.call_stack.last_mut() {
            let u = frame.0;

            if let Some(edge) = graph.adjacent(u).get(frame.1) {
                frame.1 += 1;
                let v = edge.to;
                metrics.increment("edges_explored");

                match self.disc[v] {
                    // Tree edge: descend; low[u] is folded in when v finishes.
                    None => self.enter(v, metrics),
                    Some(disc_v) if self.on_stack.contains(v) => {
                        self.low[u] = self.low[u].min(disc_v);
                    }
                    // Cross edge into an already-closed component.
                    Some(_) => {}
                }
                continue;
            }

            // u has no edges left: finish it.
            self.call_stack.pop();
            if let Some(&(parent, _)) = self.call_stack.last() {
                self.low[parent] = self.low[parent].min(self.low[u]);
            }
            if Some(self.low[u]) == self.disc[u] {
                self.close_component(u, metrics);
            }
        }
    }

    fn close_component(&mut self, root: usize, metrics: &mut (impl Metrics + ?Sized)) {
        let mut component = Vec::new();
        while let Some(v) = self.stack.pop() {
            self.on_stack.set(v, false);
            component.push(v);
            metrics.increment("stack_pops");
            if v == root {
                break;
            }
        }
        self.components.push(component);
    }
}
