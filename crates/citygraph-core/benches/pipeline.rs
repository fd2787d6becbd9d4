use citygraph_core::graph::{WeightedGraph, condense, kahn_sort, tarjan_scc};
use citygraph_core::metrics::NoopMetrics;
use citygraph_core::paths::{critical_path, shortest_paths};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

struct Tier {
    name: &'static str,
    vertices: usize,
    edges_per_vertex: usize,
}

const TIERS: [Tier; 3] = [
    Tier {
        name: "small",
        vertices: 1_000,
        edges_per_vertex: 3,
    },
    Tier {
        name: "medium",
        vertices: 20_000,
        edges_per_vertex: 4,
    },
    Tier {
        name: "large",
        vertices: 200_000,
        edges_per_vertex: 4,
    },
];

/// Random digraph with arbitrary edges, so it contains cycles.
fn random_digraph(tier: &Tier, seed: u64) -> WeightedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = WeightedGraph::directed(tier.vertices);
    for _ in 0..tier.vertices * tier.edges_per_vertex {
        let u = rng.gen_range(0..tier.vertices);
        let v = rng.gen_range(0..tier.vertices);
        graph
            .add_edge(u, v, rng.gen_range(1..100))
            .expect("endpoints in range");
    }
    graph
}

/// Random DAG: every edge points from a lower to a higher index.
fn random_dag(tier: &Tier, seed: u64) -> WeightedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = WeightedGraph::directed(tier.vertices);
    for _ in 0..tier.vertices * tier.edges_per_vertex {
        let a = rng.gen_range(0..tier.vertices);
        let b = rng.gen_range(0..tier.vertices);
        if a != b {
            graph
                .add_edge(a.min(b), a.max(b), rng.gen_range(1..100))
                .expect("endpoints in range");
        }
    }
    graph
}

fn bench_structure(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline.structure");

    for tier in &TIERS {
        let graph = random_digraph(tier, 0x5CC0_u64 + tier.vertices as u64);
        group.throughput(Throughput::Elements(graph.edge_count() as u64));

        group.bench_with_input(BenchmarkId::new("tarjan", tier.name), &graph, |b, g| {
            b.iter(|| black_box(tarjan_scc(g, &mut NoopMetrics)));
        });

        let scc = tarjan_scc(&graph, &mut NoopMetrics).expect("directed");
        group.bench_with_input(BenchmarkId::new("condense", tier.name), &graph, |b, g| {
            b.iter(|| black_box(condense(g, &scc, &mut NoopMetrics)));
        });

        let dag = condense(&graph, &scc, &mut NoopMetrics).into_dag();
        group.bench_with_input(BenchmarkId::new("kahn", tier.name), &dag, |b, g| {
            b.iter(|| black_box(kahn_sort(g, &mut NoopMetrics)));
        });
    }

    group.finish();
}

fn bench_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline.paths");

    for tier in &TIERS {
        let dag = random_dag(tier, 0xDA6_u64 + tier.vertices as u64);
        group.throughput(Throughput::Elements(dag.edge_count() as u64));

        group.bench_with_input(BenchmarkId::new("shortest", tier.name), &dag, |b, g| {
            b.iter(|| black_box(shortest_paths(g, 0, &mut NoopMetrics)));
        });
        group.bench_with_input(BenchmarkId::new("critical", tier.name), &dag, |b, g| {
            b.iter(|| black_box(critical_path(g, &mut NoopMetrics)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_structure, bench_paths);
criterion_main!(benches);
