//! `cg analyze`: run the full pipeline on one graph file.

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use crate::analysis::{Analysis, analyze};
use crate::cmd::{RunContext, fail, load_input};
use crate::output::{CliError, render_mode};
use crate::report;

/// Arguments for `cg analyze`.
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Graph file. Defaults to `[input] default_file`, else `tasks.json`.
    pub file: Option<PathBuf>,
}

/// Execute `cg analyze`.
pub fn run_analyze(args: &AnalyzeArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let path = args
        .file
        .clone()
        .unwrap_or_else(|| ctx.config.input.default_file.clone());

    let analysis = analyze_file(&path, ctx.timing).map_err(|err| fail(ctx.output, &err))?;
    render_mode(
        ctx.output,
        &analysis,
        report::analysis_text,
        report::analysis_pretty,
    )
}

/// Load and analyse one file. Shared with `cg batch`.
pub fn analyze_file(path: &Path, with_timings: bool) -> Result<Analysis, CliError> {
    info!(path = %path.display(), "analyzing");
    let data = load_input(path)?;
    analyze(&data, &path.display().to_string(), with_timings).map_err(|err| CliError::from(&err))
}
