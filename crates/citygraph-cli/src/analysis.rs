//! The full analysis pipeline for one graph file.
//!
//! SCC → condensation → Kahn order of the condensation → path solvers. The
//! path solvers run on the original graph when it is a DAG, otherwise on the
//! condensation with the source mapped to its component.

use citygraph_core::graph::{
    Condensation, GraphStats, SccResult, TopoOrder, WeightedGraph, condense, kahn_sort, tarjan_scc,
};
use citygraph_core::metrics::{Metrics, MetricsReport, Recorder};
use citygraph_core::paths::{
    CriticalPath, LongestPaths, ShortestPaths, critical_path, longest_paths, shortest_paths,
};
use citygraph_core::{GraphData, GraphError};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Which graph the path solvers ran on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathTarget {
    Original,
    Condensation,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathReport {
    pub target: PathTarget,
    /// Source vertex in the target graph (a component index on fallback).
    pub source: usize,
    pub shortest: ShortestPaths,
    pub longest: LongestPaths,
    pub critical: CriticalPath,
}

/// One component in topological position.
#[derive(Debug, Clone, Serialize)]
pub struct TaskGroup {
    pub component: usize,
    pub members: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageTiming {
    pub stage: &'static str,
    pub metrics: MetricsReport,
}

/// Everything `cg analyze` reports for one input.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub input: String,
    pub source: usize,
    pub weight_model: String,
    pub stats: GraphStats,
    pub scc: SccResult,
    pub condensation: Condensation,
    pub topo: TopoOrder,
    pub task_order: Vec<TaskGroup>,
    /// `None` only for a graph with no vertices.
    pub paths: Option<PathReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub timings: Vec<StageTiming>,
}

/// Per-stage recorders, kept only when the caller asked for timings.
struct Stages {
    keep: bool,
    timings: Vec<StageTiming>,
}

impl Stages {
    const fn new(keep: bool) -> Self {
        Self {
            keep,
            timings: Vec::new(),
        }
    }

    fn run<T>(
        &mut self,
        stage: &'static str,
        f: impl FnOnce(&mut Recorder) -> Result<T, GraphError>,
    ) -> Result<T, GraphError> {
        let mut rec = Recorder::new();
        let value = f(&mut rec)?;
        if self.keep {
            self.timings.push(StageTiming {
                stage,
                metrics: rec.report(),
            });
        }
        Ok(value)
    }
}

/// Run the full pipeline over `data`.
///
/// # Errors
///
/// Fails with [`GraphError::NotDirected`] for undirected input; every other
/// stage either succeeds or is retried on the condensation.
#[instrument(skip(data), fields(vertices = data.graph.vertex_count()))]
pub fn analyze(data: &GraphData, input: &str, with_timings: bool) -> Result<Analysis, GraphError> {
    let graph = &data.graph;
    let mut stages = Stages::new(with_timings);

    let scc = stages.run("scc", |rec| tarjan_scc(graph, rec))?;
    let condensation = stages.run("condensation", |rec| Ok(condense(graph, &scc, rec)))?;
    let topo = stages.run("topological_sort", |rec| kahn_sort(condensation.dag(), rec))?;

    let task_order = topo
        .order()
        .iter()
        .map(|&component| TaskGroup {
            component,
            members: condensation.members(component).to_vec(),
        })
        .collect();

    let paths = if graph.vertex_count() == 0 {
        info!("empty graph, skipping path solvers");
        None
    } else {
        Some(solve_paths(graph, &scc, &condensation, data.source, &mut stages)?)
    };

    info!(
        components = scc.component_count(),
        condensed_edges = condensation.dag().edge_count(),
        "analysis complete"
    );

    Ok(Analysis {
        input: input.to_string(),
        source: data.source,
        weight_model: data.weight_model.clone(),
        stats: GraphStats::compute(graph, &scc),
        scc,
        condensation,
        topo,
        task_order,
        paths,
        timings: stages.timings,
    })
}

/// Run the three path solvers on `graph` as given, without any fallback.
///
/// # Errors
///
/// Propagates the first solver error, including
/// [`GraphError::CycleDetected`] for cyclic input.
pub fn solve_dag(
    graph: &WeightedGraph,
    source: usize,
    with_timings: bool,
) -> Result<(PathReport, Vec<StageTiming>), GraphError> {
    let mut stages = Stages::new(with_timings);
    let report = solve_on(graph, source, PathTarget::Original, &mut stages)?;
    Ok((report, stages.timings))
}

fn solve_paths(
    graph: &WeightedGraph,
    scc: &SccResult,
    condensation: &Condensation,
    source: usize,
    stages: &mut Stages,
) -> Result<PathReport, GraphError> {
    if scc.all_singletons() {
        match solve_on(graph, source, PathTarget::Original, stages) {
            // Singleton components can still carry self-loops.
            Err(err) if err.is_cycle() => {
                warn!("original graph is cyclic, falling back to condensation");
            }
            other => return other,
        }
    } else {
        info!(
            cyclic_components = scc.components().iter().filter(|c| c.len() > 1).count(),
            "original graph has cycles, solving on condensation"
        );
    }

    let mapped = condensation.component_of(source);
    solve_on(condensation.dag(), mapped, PathTarget::Condensation, stages)
}

fn solve_on(
    graph: &WeightedGraph,
    source: usize,
    target: PathTarget,
    stages: &mut Stages,
) -> Result<PathReport, GraphError> {
    let shortest = stages.run("shortest_paths", |rec| shortest_paths(graph, source, rec))?;
    let longest = stages.run("longest_paths", |rec| longest_paths(graph, source, rec))?;
    let critical = stages.run("critical_path", |rec| critical_path(graph, rec))?;
    Ok(PathReport {
        target,
        source,
        shortest,
        longest,
        critical,
    })
}
