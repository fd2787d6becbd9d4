//! Graph file loading.
//!
//! Graph files are JSON with `//` line comments:
//!
//! ```text
//! // build pipeline
//! {
//!   "directed": true,
//!   "n": 3,
//!   "source": 0,
//!   "weight_model": "edge",
//!   "edges": [{"u": 0, "v": 1, "w": 5}, {"u": 1, "v": 2, "w": 3}]
//! }
//! ```
//!
//! A line is dropped when its trimmed text starts with `//`; trailing
//! comments after JSON on the same line are not supported. Every field is
//! optional and unknown fields are ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::graph::weighted::WeightedGraph;

/// Largest `n` a graph file may declare. The adjacency list is allocated
/// up front, so `n` is checked before anything is built.
pub const MAX_VERTICES: usize = 1 << 24;

/// Errors raised while reading or parsing a graph file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("graph declares {n} vertices; the limit is {limit}")]
    TooManyVertices { n: usize, limit: usize },

    #[error("source vertex {vertex} out of range for graph with {vertex_count} vertices")]
    SourceOutOfRange { vertex: usize, vertex_count: usize },

    #[error("invalid edge: {0}")]
    Graph(#[from] GraphError),
}

/// A loaded graph together with its file-level settings.
#[derive(Debug, Clone)]
pub struct GraphData {
    pub graph: WeightedGraph,
    /// Start vertex for the source-rooted path solvers.
    pub source: usize,
    /// Free-form label describing what edge weights mean.
    pub weight_model: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GraphFile {
    directed: bool,
    n: usize,
    source: usize,
    weight_model: String,
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    u: usize,
    v: usize,
    w: i64,
}

/// Remove every line whose trimmed content starts with `//`.
fn strip_comments(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse graph file contents.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for malformed JSON,
/// [`LoadError::TooManyVertices`] when `n` exceeds [`MAX_VERTICES`],
/// [`LoadError::Graph`] for an edge endpoint outside `[0, n)`, and
/// [`LoadError::SourceOutOfRange`] when the graph has vertices but
/// `source >= n`.
pub fn parse_graph(text: &str) -> Result<GraphData, LoadError> {
    let file: GraphFile = serde_json::from_str(&strip_comments(text))?;

    if file.n > MAX_VERTICES {
        return Err(LoadError::TooManyVertices {
            n: file.n,
            limit: MAX_VERTICES,
        });
    }

    if file.n > 0 && file.source >= file.n {
        return Err(LoadError::SourceOutOfRange {
            vertex: file.source,
            vertex_count: file.n,
        });
    }

    let mut graph = WeightedGraph::new(file.n, file.directed);
    for edge in &file.edges {
        graph.add_edge(edge.u, edge.v, edge.w)?;
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        directed = graph.is_directed(),
        "graph parsed"
    );

    Ok(GraphData {
        graph,
        source: file.source,
        weight_model: file.weight_model,
    })
}

/// Read and parse a graph file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise the same
/// errors as [`parse_graph`].
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_graph_file(path: impl AsRef<Path>) -> Result<GraphData, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_graph(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn parses_full_document_with_comments() {
        let text = r#"
            // tasks for the nightly build
            {
              "directed": true,
              "n": 3,
              // comment inside the object
              "source": 1,
              "weight_model": "edge",
              "edges": [
                {"u": 0, "v": 1, "w": 5},
                {"u": 1, "v": 2, "w": 3}
              ]
            }
        "#;
        let data = parse_graph(text).expect("parse");

        assert!(data.graph.is_directed());
        assert_eq!(data.graph.vertex_count(), 3);
        assert_eq!(data.graph.edge_count(), 2);
        assert_eq!(data.source, 1);
        assert_eq!(data.weight_model, "edge");
        assert_eq!(data.graph.adjacent(0)[0].weight, 5);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let data = parse_graph("{}").expect("parse");
        assert!(!data.graph.is_directed());
        assert_eq!(data.graph.vertex_count(), 0);
        assert_eq!(data.source, 0);
        assert!(data.weight_model.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let data = parse_graph(r#"{"n": 1, "directed": true, "owner": "ops"}"#).expect("parse");
        assert_eq!(data.graph.vertex_count(), 1);
    }

    #[test]
    fn undirected_edges_are_mirrored() {
        let data = parse_graph(r#"{"n": 2, "edges": [{"u": 0, "v": 1, "w": 4}]}"#).expect("parse");
        assert_eq!(data.graph.edge_count(), 1);
        assert_eq!(data.graph.adjacent(1)[0].to, 0);
    }

    #[test]
    fn negative_weights_are_accepted() {
        let data = parse_graph(r#"{"directed": true, "n": 2, "edges": [{"u": 0, "v": 1, "w": -2}]}"#)
            .expect("parse");
        assert_eq!(data.graph.adjacent(0)[0].weight, -2);
    }

    #[test]
    fn edge_endpoint_out_of_range_is_rejected() {
        let err = parse_graph(r#"{"directed": true, "n": 2, "edges": [{"u": 0, "v": 2, "w": 1}]}"#)
            .expect_err("bad edge");
        assert!(matches!(
            err,
            LoadError::Graph(GraphError::VertexOutOfRange {
                vertex: 2,
                vertex_count: 2
            })
        ));
    }

    #[test]
    fn source_out_of_range_is_rejected() {
        let err = parse_graph(r#"{"n": 2, "source": 2}"#).expect_err("bad source");
        assert!(matches!(err, LoadError::SourceOutOfRange { vertex: 2, .. }));
    }

    #[test]
    fn source_is_unchecked_for_empty_graph() {
        let data = parse_graph(r#"{"n": 0, "source": 4}"#).expect("parse");
        assert_eq!(data.source, 4);
    }

    #[test]
    fn oversized_vertex_count_is_rejected_before_allocation() {
        let err = parse_graph(r#"{"n": 18446744073709551615}"#).expect_err("too big");
        assert!(matches!(err, LoadError::TooManyVertices { .. }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = parse_graph(r#"{"n": 2,"#).expect_err("truncated");
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn load_graph_file_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{"directed": true, "n": 2, "edges": [{{"u": 0, "v": 1, "w": 7}}]}}"#)
            .expect("write");

        let data = load_graph_file(file.path()).expect("load");
        assert_eq!(data.graph.edge_count(), 1);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");
        let err = load_graph_file(&path).expect_err("missing");
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}
