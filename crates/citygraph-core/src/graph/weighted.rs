//! Adjacency-list graph with integer edge weights.
//!
//! Vertices are the dense indices `0..n`. Each vertex owns an ordered list of
//! outgoing [`Edge`]s; insertion order is preserved and parallel edges and
//! self-loops are kept as-is. An undirected edge is stored once in each
//! endpoint's list but counts as a single logical edge.

use std::fmt;

use serde::Serialize;

use crate::error::GraphError;

/// One outgoing adjacency record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// Target vertex.
    pub to: usize,
    /// Edge weight.
    pub weight: i64,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, w={})", self.to, self.weight)
    }
}

/// A directed or undirected weighted graph over vertices `0..n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightedGraph {
    directed: bool,
    adjacency: Vec<Vec<Edge>>,
}

impl WeightedGraph {
    /// Create a graph with `vertex_count` vertices and no edges.
    #[must_use]
    pub fn new(vertex_count: usize, directed: bool) -> Self {
        Self {
            directed,
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    /// Shorthand for `WeightedGraph::new(vertex_count, true)`.
    #[must_use]
    pub fn directed(vertex_count: usize) -> Self {
        Self::new(vertex_count, true)
    }

    /// Build a directed graph from `(from, to, weight)` triples.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] on the first bad endpoint.
    pub fn from_edges(
        vertex_count: usize,
        edges: impl IntoIterator<Item = (usize, usize, i64)>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::directed(vertex_count);
        for (from, to, weight) in edges {
            graph.add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    /// Append the edge `from -> to` (and `to -> from` when undirected).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if either endpoint is not a
    /// vertex of this graph. The graph is left unchanged in that case.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: i64) -> Result<(), GraphError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;

        self.adjacency[from].push(Edge { to, weight });
        if !self.directed {
            self.adjacency[to].push(Edge { to: from, weight });
        }
        Ok(())
    }

    /// Outgoing edges of `vertex` in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `vertex >= self.vertex_count()`.
    #[must_use]
    pub fn adjacent(&self, vertex: usize) -> &[Edge] {
        &self.adjacency[vertex]
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of logical edges: every `add_edge` call counts once.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let records: usize = self.adjacency.iter().map(Vec::len).sum();
        if self.directed { records } else { records / 2 }
    }

    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.directed
    }

    /// Every stored adjacency record as `(from, to, weight)`, in enumeration
    /// order: ascending source vertex, then insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, i64)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| edges.iter().map(move |e| (from, e.to, e.weight)))
    }

    /// Return a new graph with every edge flipped.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ReverseUndirected`] for undirected graphs.
    pub fn reverse(&self) -> Result<Self, GraphError> {
        if !self.directed {
            return Err(GraphError::ReverseUndirected);
        }

        let mut reversed = Self::directed(self.vertex_count());
        for (from, to, weight) in self.edges() {
            reversed.push_record(to, from, weight);
        }
        Ok(reversed)
    }

    /// Out-degree and in-degree of every vertex, counted over stored records.
    #[must_use]
    pub fn degrees(&self) -> (Vec<usize>, Vec<usize>) {
        let out_degree: Vec<usize> = self.adjacency.iter().map(Vec::len).collect();
        let mut in_degree = vec![0; self.vertex_count()];
        for (_, to, _) in self.edges() {
            in_degree[to] += 1;
        }
        (out_degree, in_degree)
    }

    /// Returns `true` when `vertex` has an edge to itself.
    #[must_use]
    pub fn has_self_loop(&self, vertex: usize) -> bool {
        self.adjacency
            .get(vertex)
            .is_some_and(|edges| edges.iter().any(|e| e.to == vertex))
    }

    /// Append one directed record. Callers guarantee both endpoints are in
    /// range.
    pub(crate) fn push_record(&mut self, from: usize, to: usize, weight: i64) {
        self.adjacency[from].push(Edge { to, weight });
    }

    pub(crate) fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex < self.adjacency.len() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                vertex_count: self.adjacency.len(),
            })
        }
    }
}

impl fmt::Display for WeightedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Graph ({}, n={}, edges={})",
            if self.directed { "directed" } else { "undirected" },
            self.vertex_count(),
            self.edge_count()
        )?;
        for (vertex, edges) in self.adjacency.iter().enumerate() {
            write!(f, "{vertex}:")?;
            for edge in edges {
                write!(f, " {edge}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directed_edges_are_stored_once() {
        let mut g = WeightedGraph::directed(3);
        g.add_edge(0, 1, 5).expect("edge");
        g.add_edge(1, 2, 3).expect("edge");

        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.adjacent(0), &[Edge { to: 1, weight: 5 }]);
        assert!(g.adjacent(2).is_empty());
    }

    #[test]
    fn undirected_edges_are_mirrored_but_counted_once() {
        let mut g = WeightedGraph::new(3, false);
        g.add_edge(0, 1, 4).expect("edge");
        g.add_edge(1, 2, 7).expect("edge");

        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.adjacent(1).len(), 2);
        assert_eq!(g.adjacent(2), &[Edge { to: 1, weight: 7 }]);
    }

    #[test]
    fn undirected_self_loop_counts_once() {
        let mut g = WeightedGraph::new(1, false);
        g.add_edge(0, 0, 1).expect("edge");
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_self_loop(0));
    }

    #[test]
    fn out_of_range_endpoint_is_rejected_without_mutation() {
        let mut g = WeightedGraph::directed(2);
        let err = g.add_edge(0, 2, 1).expect_err("2 is not a vertex");

        assert_eq!(
            err,
            GraphError::VertexOutOfRange {
                vertex: 2,
                vertex_count: 2
            }
        );
        assert_eq!(g.edge_count(), 0);
        assert!(g.adjacent(0).is_empty());
    }

    #[test]
    fn parallel_edges_and_insertion_order_are_kept() {
        let g = WeightedGraph::from_edges(2, [(0, 1, 9), (0, 1, 2), (0, 0, 1)]).expect("graph");
        let targets: Vec<(usize, i64)> = g.adjacent(0).iter().map(|e| (e.to, e.weight)).collect();
        assert_eq!(targets, vec![(1, 9), (1, 2), (0, 1)]);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn reverse_flips_every_edge() {
        let g = WeightedGraph::from_edges(3, [(0, 1, 5), (0, 1, 6), (1, 2, 3)]).expect("graph");
        let r = g.reverse().expect("directed graph reverses");

        assert_eq!(r.edge_count(), 3);
        assert_eq!(
            r.adjacent(1),
            &[Edge { to: 0, weight: 5 }, Edge { to: 0, weight: 6 }]
        );
        assert_eq!(r.adjacent(2), &[Edge { to: 1, weight: 3 }]);
        assert!(r.adjacent(0).is_empty());
    }

    #[test]
    fn reverse_undirected_is_unsupported() {
        let g = WeightedGraph::new(2, false);
        assert_eq!(g.reverse(), Err(GraphError::ReverseUndirected));
    }

    #[test]
    fn degrees_count_records() {
        let g = WeightedGraph::from_edges(3, [(0, 1, 1), (0, 2, 1), (1, 2, 1)]).expect("graph");
        let (out_d, in_d) = g.degrees();
        assert_eq!(out_d, vec![2, 1, 0]);
        assert_eq!(in_d, vec![0, 1, 2]);
    }

    #[test]
    fn display_lists_adjacency() {
        let g = WeightedGraph::from_edges(2, [(0, 1, 5)]).expect("graph");
        let text = g.to_string();
        assert!(text.starts_with("Graph (directed, n=2, edges=1)"));
        assert!(text.contains("0: (1, w=5)"));
    }

    #[test]
    fn empty_graph_is_valid() {
        let g = WeightedGraph::directed(0);
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.edges().count(), 0);
    }
}
