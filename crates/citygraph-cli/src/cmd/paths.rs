//! `cg paths`: shortest, longest and critical paths of a DAG file.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::analysis::{PathReport, StageTiming, solve_dag};
use crate::cmd::{RunContext, fail, load_input};
use crate::output::{CliError, pretty_section, render_mode};
use crate::report;

/// Arguments for `cg paths`.
#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Graph file; must be a DAG.
    pub file: PathBuf,

    /// Source vertex. Overrides `source` from the file.
    #[arg(long)]
    pub source: Option<usize>,
}

#[derive(Debug, Serialize)]
struct PathsOutput {
    input: String,
    paths: PathReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    timings: Vec<StageTiming>,
}

/// Execute `cg paths`.
pub fn run_paths(args: &PathsArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let data = load_input(&args.file).map_err(|err| fail(ctx.output, &err))?;
    let source = args.source.unwrap_or(data.source);

    let (paths, timings) = solve_dag(&data.graph, source, ctx.timing)
        .map_err(|err| fail(ctx.output, &CliError::from(&err)))?;

    let payload = PathsOutput {
        input: args.file.display().to_string(),
        paths,
        timings,
    };

    render_mode(
        ctx.output,
        &payload,
        |p, w| report::paths_text(&p.paths, w),
        render_paths_pretty,
    )
}

fn render_paths_pretty(payload: &PathsOutput, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Paths: {}", payload.input))?;
    report::paths_pretty(&payload.paths, w)?;
    for timing in &payload.timings {
        writeln!(w)?;
        writeln!(w, "[{}]", timing.stage)?;
        write!(w, "{}", timing.metrics.display_table())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: PathsArgs,
    }

    #[test]
    fn source_flag_is_optional() {
        let parsed = Wrapper::parse_from(["test", "dag.json"]);
        assert!(parsed.args.source.is_none());

        let parsed = Wrapper::parse_from(["test", "dag.json", "--source", "3"]);
        assert_eq!(parsed.args.source, Some(3));
    }
}
