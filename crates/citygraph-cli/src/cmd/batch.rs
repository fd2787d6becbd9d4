//! `cg batch`: analyse every `*.json` file in a directory.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::Analysis;
use crate::cmd::analyze::analyze_file;
use crate::cmd::{RunContext, fail};
use crate::output::{CliError, pretty_rule, render_mode};
use crate::report;

/// Arguments for `cg batch`.
#[derive(Args, Debug, Default)]
pub struct BatchArgs {
    /// Directory to scan. Defaults to `[input] data_dir`, else `data`.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BatchEntry {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<Analysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<CliError>,
}

#[derive(Debug, Serialize)]
struct BatchOutput {
    dir: String,
    processed: usize,
    failed: usize,
    results: Vec<BatchEntry>,
}

/// Execute `cg batch`.
pub fn run_batch(args: &BatchArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let dir = args
        .dir
        .clone()
        .unwrap_or_else(|| ctx.config.input.data_dir.clone());

    if !dir.is_dir() {
        return Err(fail(
            ctx.output,
            &CliError::with_details(
                format!("data directory not found: {}", dir.display()),
                "pass a directory or set [input] data_dir in citygraph.toml",
                "data_dir_missing",
            ),
        ));
    }

    let files = list_json_files(&dir).map_err(|err| {
        fail(
            ctx.output,
            &CliError::new(format!("failed to list {}: {err}", dir.display())),
        )
    })?;
    info!(dir = %dir.display(), files = files.len(), "batch start");

    let results: Vec<BatchEntry> = files
        .iter()
        .map(|path| {
            let file = path.display().to_string();
            match analyze_file(path, ctx.timing) {
                Ok(analysis) => BatchEntry {
                    file,
                    analysis: Some(analysis),
                    error: None,
                },
                Err(error) => {
                    warn!(file = %file, error = %error.message, "batch entry failed");
                    BatchEntry {
                        file,
                        analysis: None,
                        error: Some(error),
                    }
                }
            }
        })
        .collect();

    let payload = BatchOutput {
        dir: dir.display().to_string(),
        processed: results.len(),
        failed: results.iter().filter(|r| r.error.is_some()).count(),
        results,
    };

    render_mode(ctx.output, &payload, render_batch_text, render_batch_pretty)
}

/// `*.json` files directly inside `dir`, sorted by file name.
fn list_json_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn render_batch_pretty(payload: &BatchOutput, w: &mut dyn Write) -> io::Result<()> {
    if payload.results.is_empty() {
        writeln!(w, "No JSON files found in {}.", payload.dir)?;
        return Ok(());
    }

    for entry in &payload.results {
        if let Some(analysis) = &entry.analysis {
            report::analysis_pretty(analysis, w)?;
        } else if let Some(error) = &entry.error {
            pretty_rule(w)?;
            writeln!(w, "Processing: {}", entry.file)?;
            pretty_rule(w)?;
            writeln!(w, "error: {}", error.message)?;
        }
        writeln!(w)?;
    }

    pretty_rule(w)?;
    writeln!(
        w,
        "Batch processing complete. Processed {} dataset(s), {} failed.",
        payload.processed, payload.failed
    )?;
    pretty_rule(w)
}

fn render_batch_text(payload: &BatchOutput, w: &mut dyn Write) -> io::Result<()> {
    for entry in &payload.results {
        if let Some(analysis) = &entry.analysis {
            report::analysis_text(analysis, w)?;
        } else if let Some(error) = &entry.error {
            writeln!(w, "error {} {}", entry.file, error.message)?;
        }
        writeln!(w)?;
    }
    writeln!(w, "processed {} failed {}", payload.processed, payload.failed)
}
