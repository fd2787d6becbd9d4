//! Subcommand handlers for `cg`.

pub mod analyze;
pub mod batch;
pub mod paths;
pub mod scc;
pub mod topo;

use std::path::{Path, PathBuf};

use citygraph_core::{GraphData, load_graph_file};
use clap::Args;

use crate::config::Config;
use crate::output::{CliError, OutputMode, render_error};

/// Settings shared by every handler.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub output: OutputMode,
    pub timing: bool,
    pub config: Config,
}

/// A single required graph file.
#[derive(Args, Debug)]
pub struct FileArgs {
    /// Graph file (JSON with `//` line comments).
    pub file: PathBuf,
}

/// Load `path`, converting failures into a renderable error.
pub fn load_input(path: &Path) -> Result<GraphData, CliError> {
    load_graph_file(path).map_err(|err| CliError::from(&err))
}

/// Render `error` and turn it into the handler's failure.
pub fn fail(output: OutputMode, error: &CliError) -> anyhow::Error {
    if let Err(render_err) = render_error(output, error) {
        return render_err;
    }
    anyhow::anyhow!("{}", error.message)
}
