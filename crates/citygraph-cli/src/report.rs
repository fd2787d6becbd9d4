//! Pretty and text renderers for analysis results.
//!
//! Pretty output uses numbered sections with rules; text output uses one
//! `key value` row per fact so it greps cleanly.

use std::io::{self, Write};

use citygraph_core::graph::{Condensation, GraphStats, SccResult, TopoOrder};
use citygraph_core::metrics::format_duration;
use citygraph_core::paths::{CriticalPath, LongestPaths, ShortestPaths};

use crate::analysis::{Analysis, PathReport, PathTarget, StageTiming, TaskGroup};
use crate::output::{pretty_kv, pretty_rule, pretty_section};

/// Join vertices as `a -> b -> c`.
pub fn format_path(path: &[usize]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn format_members(members: &[usize]) -> String {
    let inner = members
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}

fn format_distance(distance: Option<i64>, unreachable: &str) -> String {
    distance.map_or_else(|| unreachable.to_string(), |d| d.to_string())
}

// ── full analysis ───────────────────────────────────────────────────────────

pub fn analysis_pretty(a: &Analysis, w: &mut dyn Write) -> io::Result<()> {
    pretty_rule(w)?;
    writeln!(w, "Processing: {}", a.input)?;
    pretty_rule(w)?;
    summary_pretty(a, w)?;
    writeln!(w)?;

    pretty_section(w, "1. Strongly connected components (Tarjan)")?;
    scc_pretty(&a.scc, w)?;
    writeln!(w)?;

    pretty_section(w, "2. Condensation graph")?;
    condensation_pretty(&a.condensation, w)?;
    writeln!(w)?;

    pretty_section(w, "3. Topological order of the condensation (Kahn)")?;
    topo_pretty(&a.topo, w)?;
    task_order_pretty(&a.task_order, w)?;
    writeln!(w)?;

    match &a.paths {
        Some(paths) => {
            let heading = match paths.target {
                PathTarget::Original => "4. Paths in DAG",
                PathTarget::Condensation => "4. Paths (on condensation DAG)",
            };
            pretty_section(w, heading)?;
            paths_pretty(paths, w)?;
        }
        None => {
            pretty_section(w, "4. Paths")?;
            writeln!(w, "  Graph has no vertices; nothing to solve.")?;
        }
    }

    if !a.timings.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Stage metrics")?;
        timings_pretty(&a.timings, w)?;
    }
    Ok(())
}

pub fn analysis_text(a: &Analysis, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "input {}", a.input)?;
    writeln!(w, "source {}", a.source)?;
    writeln!(w, "weight_model {}", a.weight_model)?;
    stats_text(&a.stats, w)?;
    scc_text(&a.scc, w)?;
    for (a_comp, b_comp, weight) in a.condensation.dag().edges() {
        writeln!(w, "condensed_edge {a_comp} {b_comp} {weight}")?;
    }
    topo_text(&a.topo, w)?;
    for group in &a.task_order {
        writeln!(w, "task_group {} {}", group.component, format_members(&group.members))?;
    }
    if let Some(paths) = &a.paths {
        paths_text(paths, w)?;
    }
    for timing in &a.timings {
        writeln!(
            w,
            "timing {} {}us",
            timing.stage,
            timing.metrics.elapsed.as_micros()
        )?;
    }
    Ok(())
}

fn summary_pretty(a: &Analysis, w: &mut dyn Write) -> io::Result<()> {
    let s = &a.stats;
    writeln!(w, "Graph loaded successfully:")?;
    pretty_kv(w, "Vertices", s.vertex_count.to_string())?;
    pretty_kv(w, "Edges", s.edge_count.to_string())?;
    pretty_kv(w, "Source", a.source.to_string())?;
    let model = if a.weight_model.is_empty() {
        "(unspecified)"
    } else {
        a.weight_model.as_str()
    };
    pretty_kv(w, "Weight model", model)?;
    pretty_kv(w, "Density", format!("{:.4}", s.density))?;
    pretty_kv(
        w,
        "Cyclic SCCs",
        format!("{} of {}", s.cyclic_component_count, s.component_count),
    )?;
    pretty_kv(w, "Weak comps", s.weakly_connected_component_count.to_string())?;
    pretty_kv(w, "Isolated", s.isolated_vertex_count.to_string())?;
    pretty_kv(
        w,
        "Max degree",
        format!("in {} / out {}", s.max_in_degree, s.max_out_degree),
    )
}

fn stats_text(s: &GraphStats, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "vertices {}", s.vertex_count)?;
    writeln!(w, "edges {}", s.edge_count)?;
    writeln!(w, "density {:.4}", s.density)?;
    writeln!(w, "cyclic_components {}", s.cyclic_component_count)?;
    writeln!(w, "weak_components {}", s.weakly_connected_component_count)?;
    writeln!(w, "isolated {}", s.isolated_vertex_count)?;
    writeln!(w, "max_in_degree {}", s.max_in_degree)?;
    writeln!(w, "max_out_degree {}", s.max_out_degree)
}

// ── single stages ───────────────────────────────────────────────────────────

pub fn scc_pretty(scc: &SccResult, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "  Found {} component(s):", scc.component_count())?;
    for (index, members) in scc.components().iter().enumerate() {
        writeln!(
            w,
            "  SCC {index:<4} size {:<4} {}",
            members.len(),
            format_members(members)
        )?;
    }
    Ok(())
}

pub fn scc_text(scc: &SccResult, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "components {}", scc.component_count())?;
    for (index, members) in scc.components().iter().enumerate() {
        writeln!(w, "scc {index} {}", format_members(members))?;
    }
    Ok(())
}

fn condensation_pretty(c: &Condensation, w: &mut dyn Write) -> io::Result<()> {
    let dag = c.dag();
    writeln!(
        w,
        "  {} component vertices, {} edges",
        dag.vertex_count(),
        dag.edge_count()
    )?;
    for (from, to, weight) in dag.edges() {
        writeln!(w, "  C{from} -> C{to}  (w={weight})")?;
    }
    Ok(())
}

pub fn topo_pretty(topo: &TopoOrder, w: &mut dyn Write) -> io::Result<()> {
    if topo.has_cycle() {
        writeln!(
            w,
            "  Cycle detected: only {} vertex(es) could be ordered.",
            topo.order().len()
        )?;
    } else {
        writeln!(w, "  Valid topological order.")?;
    }
    writeln!(w, "  Order: {}", format_members(topo.order()))
}

pub fn topo_text(topo: &TopoOrder, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "has_cycle {}", topo.has_cycle())?;
    writeln!(w, "order {}", format_members(topo.order()))
}

fn task_order_pretty(groups: &[TaskGroup], w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "  Original task order (by SCC):")?;
    for group in groups {
        writeln!(
            w,
            "    SCC {}: {}",
            group.component,
            format_members(&group.members)
        )?;
    }
    Ok(())
}

pub fn paths_pretty(p: &PathReport, w: &mut dyn Write) -> io::Result<()> {
    if p.target == PathTarget::Condensation {
        writeln!(
            w,
            "  Original graph has cycles; vertices are SCC indices (source -> C{}).",
            p.source
        )?;
    }
    shortest_pretty(&p.shortest, w)?;
    writeln!(w)?;
    critical_pretty(&p.critical, w)?;
    writeln!(w)?;
    longest_pretty(&p.longest, w)
}

pub fn paths_text(p: &PathReport, w: &mut dyn Write) -> io::Result<()> {
    let target = match p.target {
        PathTarget::Original => "original",
        PathTarget::Condensation => "condensation",
    };
    writeln!(w, "path_target {target}")?;
    writeln!(w, "path_source {}", p.source)?;
    for (v, d) in p.shortest.distances().iter().enumerate() {
        writeln!(w, "shortest {v} {}", format_distance(*d, "inf"))?;
    }
    for (v, d) in p.longest.distances().iter().enumerate() {
        writeln!(w, "longest {v} {}", format_distance(*d, "-inf"))?;
    }
    writeln!(w, "critical_length {}", p.critical.length)?;
    writeln!(w, "critical_path {}", format_members(&p.critical.path))
}

fn shortest_pretty(sp: &ShortestPaths, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "  Shortest paths from {}:", sp.source())?;
    for (v, d) in sp.distances().iter().enumerate() {
        let path = sp.path_to(v);
        if path.is_empty() {
            writeln!(w, "    {v:<4} {:>8}   unreachable", format_distance(*d, "∞"))?;
        } else {
            writeln!(
                w,
                "    {v:<4} {:>8}   {}",
                format_distance(*d, "∞"),
                format_path(&path)
            )?;
        }
    }
    Ok(())
}

fn longest_pretty(lp: &LongestPaths, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "  Longest paths from {}:", lp.source())?;
    for (v, d) in lp.distances().iter().enumerate() {
        let path = lp.path_to(v);
        if path.is_empty() {
            writeln!(w, "    {v:<4} {:>8}   unreachable", format_distance(*d, "-∞"))?;
        } else {
            writeln!(
                w,
                "    {v:<4} {:>8}   {}",
                format_distance(*d, "-∞"),
                format_path(&path)
            )?;
        }
    }
    Ok(())
}

fn critical_pretty(cp: &CriticalPath, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "  Critical path (heaviest path anywhere):")?;
    pretty_kv(w, "Length", cp.length.to_string())?;
    pretty_kv(w, "Path", format_path(&cp.path))
}

fn timings_pretty(timings: &[StageTiming], w: &mut dyn Write) -> io::Result<()> {
    for timing in timings {
        writeln!(
            w,
            "  {:<18} {:>12}",
            timing.stage,
            format_duration(timing.metrics.elapsed)
        )?;
        for (name, value) in &timing.metrics.counters {
            writeln!(w, "    {name:<20} {value:>10}")?;
        }
    }
    Ok(())
}
