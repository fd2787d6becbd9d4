use std::fmt;

/// Broad failure category shared by every graph operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong kind of graph for the operation (undirected, or cyclic where a
    /// DAG is required).
    InvalidArgument,
    /// A vertex index outside `[0, n)`, or a path weight outside `i64`.
    OutOfRange,
    /// The operation is not defined for this graph at all.
    UnsupportedOperation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidArgument => "invalid argument",
            Self::OutOfRange => "out of range",
            Self::UnsupportedOperation => "unsupported operation",
        };
        f.write_str(label)
    }
}

/// Errors from graph construction and analysis.
///
/// All per-call state is local, so a failed call leaves nothing behind and
/// can be retried on a different graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An edge endpoint or source vertex is not a vertex of the graph.
    #[error("vertex {vertex} out of range for graph with {vertex_count} vertices")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },

    /// A directed-only algorithm was given an undirected graph.
    #[error("{operation} requires a directed graph")]
    NotDirected { operation: &'static str },

    /// A DAG-only algorithm found a cycle during its topological pre-pass.
    #[error("graph contains a cycle - {operation} requires a DAG")]
    CycleDetected { operation: &'static str },

    /// A path sum left the `i64` range while relaxing an edge into `vertex`.
    #[error("{operation}: path weight into vertex {vertex} overflows i64")]
    WeightOverflow {
        operation: &'static str,
        vertex: usize,
    },

    /// `reverse` was called on an undirected graph.
    #[error("cannot reverse an undirected graph")]
    ReverseUndirected,
}

impl GraphError {
    /// Failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::VertexOutOfRange { .. } | Self::WeightOverflow { .. } => ErrorKind::OutOfRange,
            Self::NotDirected { .. } | Self::CycleDetected { .. } => ErrorKind::InvalidArgument,
            Self::ReverseUndirected => ErrorKind::UnsupportedOperation,
        }
    }

    /// Stable code identifier (`G####`) for machine parsing.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::VertexOutOfRange { .. } => "G1001",
            Self::WeightOverflow { .. } => "G1002",
            Self::NotDirected { .. } => "G2001",
            Self::CycleDetected { .. } => "G2002",
            Self::ReverseUndirected => "G3001",
        }
    }

    /// Optional remediation hint for terminal output.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::VertexOutOfRange { .. } => Some("Edge endpoints and the source must be below `n`."),
            Self::WeightOverflow { .. } => Some("Scale edge weights down so every path sum fits in i64."),
            Self::NotDirected { .. } => Some("Set `\"directed\": true` in the graph file."),
            Self::CycleDetected { .. } => {
                Some("Run the path solvers on the condensation of the graph instead.")
            }
            Self::ReverseUndirected => None,
        }
    }

    /// Returns `true` when the error means "not a DAG", the one failure the
    /// orchestrator recovers from by retrying on the condensation.
    #[must_use]
    pub const fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected { .. })
    }
}
