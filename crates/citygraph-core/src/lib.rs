#![forbid(unsafe_code)]
//! citygraph-core library.
//!
//! Strongly connected components, condensation, topological ordering and
//! DAG path problems over a weighted adjacency-list graph.
//!
//! # Conventions
//!
//! - **Errors**: Algorithms return `Result<_, GraphError>`; the loader returns
//!   `Result<_, LoadError>`. Every error is raised before per-call state is
//!   allocated.
//! - **Logging**: Use `tracing` macros (`debug!` on algorithm completion).
//! - **Instrumentation**: Every algorithm takes `&mut impl Metrics` owned by
//!   the caller. Pass [`metrics::NoopMetrics`] to opt out.
//! - **Immutability**: Algorithms borrow the graph immutably. Only
//!   [`graph::WeightedGraph::add_edge`] mutates, and it runs before analysis.

pub mod error;
pub mod graph;
pub mod load;
pub mod metrics;
pub mod paths;

pub use error::{ErrorKind, GraphError};
pub use load::{GraphData, LoadError, load_graph_file, parse_graph};
