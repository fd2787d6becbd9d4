#![forbid(unsafe_code)]

mod analysis;
mod cmd;
mod config;
mod output;
mod report;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cmd::RunContext;
use crate::cmd::analyze::AnalyzeArgs;
use crate::cmd::batch::BatchArgs;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cg: SCC condensation and DAG path analysis for weighted task graphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Include per-stage timing and operation counters in the output.
    #[arg(long, global = true)]
    timing: bool,

    /// Output format: pretty, text, or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Alias for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Run the full pipeline on one graph file",
        long_about = "Find SCCs, build the condensation, order it topologically, then solve shortest, longest and critical paths.",
        after_help = "EXAMPLES:\n    # Analyze the default input (tasks.json)\n    cg analyze\n\n    # Analyze a specific file as JSON\n    cg analyze data/city.json --format json"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Analyze every JSON file in a directory",
        long_about = "Run `analyze` on each *.json file in name order. Failures are reported and the batch continues.",
        after_help = "EXAMPLES:\n    # Analyze everything under ./data\n    cg batch\n\n    # Another directory, with stage metrics\n    cg batch graphs --timing"
    )]
    Batch(BatchArgs),

    #[command(about = "List strongly connected components of a graph file")]
    Scc(cmd::FileArgs),

    #[command(about = "Topologically sort a graph file (reports cycles)")]
    Topo(cmd::FileArgs),

    #[command(
        about = "Shortest, longest and critical paths of a DAG file",
        after_help = "EXAMPLES:\n    # Use the source from the file\n    cg paths dag.json\n\n    # Override the source vertex\n    cg paths dag.json --source 2"
    )]
    Paths(cmd::paths::PathsArgs),
}

/// Default filter when `CITYGRAPH_LOG` is unset. The binary's own targets
/// live under `cg::`, the library's under `citygraph_core::`.
const fn default_log_directives(debug: bool) -> &'static str {
    if debug {
        "citygraph=debug,cg=debug,info"
    } else {
        "citygraph=info,cg=info,warn"
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CITYGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(default_log_directives(env::var("DEBUG").is_ok()))
    });

    let format = env::var("CITYGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// No subcommand: analyze the default file, then batch the data directory.
///
/// A failed default file is reported and the batch still runs; the first
/// failure becomes the exit status.
fn run_default(ctx: &RunContext) -> anyhow::Result<()> {
    let default_file = &ctx.config.input.default_file;
    let single = if default_file.is_file() {
        cmd::analyze::run_analyze(&AnalyzeArgs::default(), ctx)
    } else {
        eprintln!(
            "{} not found. Skipping single-file analysis.",
            default_file.display()
        );
        Ok(())
    };
    if let Err(ref err) = single {
        warn!(error = %err, "default file failed, continuing with batch");
    }

    let data_dir = &ctx.config.input.data_dir;
    let batch = if data_dir.is_dir() {
        cmd::batch::run_batch(&BatchArgs::default(), ctx)
    } else {
        eprintln!(
            "Data directory {} not found. Skipping batch processing.",
            data_dir.display()
        );
        Ok(())
    };

    single.and(batch)
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let root = env::current_dir()?;
    let config = config::load_config(&root)?;
    let ctx = RunContext {
        output: output::resolve_output_mode(cli.format, cli.json, config.output.format),
        timing: cli.timing,
        config,
    };

    match cli.command {
        Some(Commands::Analyze(ref args)) => cmd::analyze::run_analyze(args, &ctx),
        Some(Commands::Batch(ref args)) => cmd::batch::run_batch(args, &ctx),
        Some(Commands::Scc(ref args)) => cmd::scc::run_scc(args, &ctx),
        Some(Commands::Topo(ref args)) => cmd::topo::run_topo(args, &ctx),
        Some(Commands::Paths(ref args)) => cmd::paths::run_paths(args, &ctx),
        None => run_default(&ctx),
    }
}
