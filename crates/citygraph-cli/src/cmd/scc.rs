//! `cg scc`: strongly connected components of one graph file.

use std::io::{self, Write};

use citygraph_core::graph::{GraphStats, SccResult, tarjan_scc};
use citygraph_core::metrics::{Metrics, MetricsReport, Recorder};
use serde::Serialize;

use crate::cmd::{FileArgs, RunContext, fail, load_input};
use crate::output::{CliError, pretty_section, render_mode};
use crate::report;

#[derive(Debug, Serialize)]
struct SccOutput {
    input: String,
    scc: SccResult,
    stats: GraphStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<MetricsReport>,
}

/// Execute `cg scc`.
pub fn run_scc(args: &FileArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let data = load_input(&args.file).map_err(|err| fail(ctx.output, &err))?;

    let mut rec = Recorder::new();
    let scc = tarjan_scc(&data.graph, &mut rec)
        .map_err(|err| fail(ctx.output, &CliError::from(&err)))?;

    let payload = SccOutput {
        input: args.file.display().to_string(),
        stats: GraphStats::compute(&data.graph, &scc),
        scc,
        metrics: ctx.timing.then(|| rec.report()),
    };

    render_mode(ctx.output, &payload, render_scc_text, render_scc_pretty)
}

fn render_scc_pretty(payload: &SccOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Strongly connected components: {}", payload.input))?;
    report::scc_pretty(&payload.scc, w)?;
    if payload.stats.has_cycles() {
        writeln!(
            w,
            "  {} component(s) contain cycles.",
            payload.stats.cyclic_component_count
        )?;
    } else {
        writeln!(w, "  Graph is acyclic.")?;
    }
    if let Some(metrics) = &payload.metrics {
        writeln!(w)?;
        write!(w, "{}", metrics.display_table())?;
    }
    Ok(())
}

fn render_scc_text(payload: &SccOutput, w: &mut dyn Write) -> io::Result<()> {
    report::scc_text(&payload.scc, w)?;
    writeln!(w, "cyclic_components {}", payload.stats.cyclic_component_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use citygraph_core::parse_graph;

    fn payload() -> SccOutput {
        let data = parse_graph(
            r#"{"directed": true, "n": 3, "edges": [
                {"u": 0, "v": 1, "w": 1}, {"u": 1, "v": 0, "w": 1}, {"u": 1, "v": 2, "w": 1}]}"#,
        )
        .expect("graph");
        let scc = tarjan_scc(&data.graph, &mut Recorder::new()).expect("directed");
        SccOutput {
            input: "g.json".into(),
            stats: GraphStats::compute(&data.graph, &scc),
            scc,
            metrics: None,
        }
    }

    #[test]
    fn text_lists_components() {
        let mut buf = Vec::new();
        render_scc_text(&payload(), &mut buf).expect("render");
        let out = String::from_utf8(buf).expect("utf8");
        assert!(out.contains("components 2\n"));
        assert!(out.contains("scc 1 [1, 0]\n"));
        assert!(out.contains("cyclic_components 1\n"));
    }

    #[test]
    fn pretty_mentions_cycles() {
        let mut buf = Vec::new();
        render_scc_pretty(&payload(), &mut buf).expect("render");
        assert!(String::from_utf8(buf).expect("utf8").contains("contain cycles"));
    }
}
