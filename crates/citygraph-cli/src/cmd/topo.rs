//! `cg topo`: Kahn topological order of one graph file.

use std::io::{self, Write};

use citygraph_core::graph::{TopoOrder, kahn_sort};
use citygraph_core::metrics::{Metrics, MetricsReport, Recorder};
use serde::Serialize;

use crate::cmd::{FileArgs, RunContext, fail, load_input};
use crate::output::{CliError, pretty_section, render_mode};
use crate::report;

#[derive(Debug, Serialize)]
struct TopoOutput {
    input: String,
    topo: TopoOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<MetricsReport>,
}

/// Execute `cg topo`. A cyclic graph is reported, not treated as a failure.
pub fn run_topo(args: &FileArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let data = load_input(&args.file).map_err(|err| fail(ctx.output, &err))?;

    let mut rec = Recorder::new();
    let topo = kahn_sort(&data.graph, &mut rec)
        .map_err(|err| fail(ctx.output, &CliError::from(&err)))?;

    let payload = TopoOutput {
        input: args.file.display().to_string(),
        topo,
        metrics: ctx.timing.then(|| rec.report()),
    };

    render_mode(
        ctx.output,
        &payload,
        |p, w| report::topo_text(&p.topo, w),
        render_topo_pretty,
    )
}

fn render_topo_pretty(payload: &TopoOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Topological order: {}", payload.input))?;
    report::topo_pretty(&payload.topo, w)?;
    if let Some(metrics) = &payload.metrics {
        writeln!(w)?;
        write!(w, "{}", metrics.display_table())?;
    }
    Ok(())
}
