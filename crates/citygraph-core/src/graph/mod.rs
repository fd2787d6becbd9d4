//! Weighted graph container and structural analysis.
//!
//! # Overview
//!
//! ```text
//! WeightedGraph (directed, may contain cycles)
//!        ↓  scc::tarjan_scc()
//! SccResult (components in reverse topological order)
//!        ↓  condense::condense()
//! Condensation (DAG over component indices)
//!        ↓  topo::kahn_sort()
//! TopoOrder (component order, cycle flag)
//!        ↓  crate::paths::*
//! shortest / longest / critical paths
//! ```
//!
//! Every algorithm takes the graph by shared reference and a per-call
//! [`Metrics`](crate::metrics::Metrics) recorder. No algorithm mutates its
//! input.
//!
//! ## Typical Usage
//!
//! ```rust
//! use citygraph_core::graph::{condense, kahn_sort, tarjan_scc, WeightedGraph};
//! use citygraph_core::metrics::Recorder;
//!
//! let graph = WeightedGraph::from_edges(3, [(0, 1, 1), (1, 0, 1), (1, 2, 4)])?;
//! let mut rec = Recorder::new();
//!
//! let scc = tarjan_scc(&graph, &mut rec)?;
//! let condensation = condense(&graph, &scc, &mut rec);
//! let order = kahn_sort(condensation.dag(), &mut rec)?;
//!
//! assert_eq!(scc.component_count(), 2);
//! assert!(!order.has_cycle());
//! # Ok::<(), citygraph_core::GraphError>(())
//! ```

pub mod condense;
pub mod scc;
pub mod stats;
pub mod topo;
pub mod weighted;

pub use condense::{Condensation, condense};
pub use scc::{SccResult, tarjan_scc};
pub use stats::GraphStats;
pub use topo::{TopoOrder, kahn_sort};
pub use weighted::{Edge, WeightedGraph};
