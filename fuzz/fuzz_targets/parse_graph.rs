#![no_main]

use citygraph_core::graph::{condense, kahn_sort, tarjan_scc};
use citygraph_core::metrics::NoopMetrics;
use citygraph_core::parse_graph;
use citygraph_core::paths::{critical_path, longest_paths, shortest_paths};
use libfuzzer_sys::fuzz_target;

// Keeps each iteration fast; the loader enforces its own hard limit.
const FUZZ_MAX_VERTICES: usize = 4_096;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(graph_data) = parse_graph(text) else {
        return;
    };
    let graph = &graph_data.graph;
    if graph.vertex_count() > FUZZ_MAX_VERTICES {
        return;
    }

    let Ok(scc) = tarjan_scc(graph, &mut NoopMetrics) else {
        return;
    };
    let condensation = condense(graph, &scc, &mut NoopMetrics);
    let order = kahn_sort(condensation.dag(), &mut NoopMetrics).expect("condensation is directed");
    assert!(!order.has_cycle(), "condensation must be acyclic");

    if graph.vertex_count() == 0 {
        return;
    }
    let source = condensation.component_of(graph_data.source);
    let dag = condensation.dag();
    // Huge weights may overflow; a cycle error here would be a bug.
    if let Err(err) = shortest_paths(dag, source, &mut NoopMetrics) {
        assert!(!err.is_cycle(), "condensation is a DAG");
    }
    if let Err(err) = longest_paths(dag, source, &mut NoopMetrics) {
        assert!(!err.is_cycle(), "condensation is a DAG");
    }
    if let Err(err) = critical_path(dag, &mut NoopMetrics) {
        assert!(!err.is_cycle(), "condensation is a DAG");
    }
});
