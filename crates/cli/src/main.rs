use std::env;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use dotprune_core::{
    prune, transform, transform_dir, transform_file, Graph, PruneError, PruneOptions, PruneReport,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// dotprune - Small .dot file transformation utility
///
/// Without INPUT and OUTPUT the graph is read from stdin and written to
/// stdout. INPUT may be a file or a directory; for a directory every
/// `.dot`/`.DOT` file in it is written under the same name into OUTPUT.
#[derive(Parser, Debug)]
#[command(name = "dotprune")]
#[command(version)] // Auto-pull version from Cargo.toml
#[command(about = "Prune light edges and unreachable nodes from DOT graphs")]
struct Cli {
    /// Input filename or directory
    #[arg(value_name = "INPUT", requires = "output")]
    input: Option<PathBuf>,

    /// Output filename or directory
    #[arg(value_name = "OUTPUT", requires = "input")]
    output: Option<PathBuf>,

    /// Edge weight threshold value
    #[arg(short, long)]
    threshold: f64,

    /// Label of a node used as a root during garbage collection (GC).
    /// May be given multiple times.
    #[arg(short = 'r', long = "gc-root", value_name = "GC_ROOT", required = true)]
    gc_roots: Vec<String>,

    /// Print a JSON report of what each graph lost on stderr
    #[arg(long)]
    report: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("dotprune: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DOTPRUNE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "dotprune=debug,info"
        } else {
            "dotprune=info,warn"
        })
    });

    let format = env::var("DOTPRUNE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    // stdout carries the graph in pipe mode
    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = PruneOptions::new(cli.threshold, cli.gc_roots.iter().cloned());
    let report = cli.report;
    let apply = |graph: &mut Graph| -> Result<(), PruneError> {
        let summary = prune(graph, &options)?;
        if report {
            emit_report(&summary);
        }
        Ok(())
    };

    match (&cli.input, &cli.output) {
        (Some(input), Some(output)) => run_paths(input, output, apply),
        _ => run_pipe(apply),
    }
}

/// Pipe mode: stdin to stdout
fn run_pipe<F>(apply: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut Graph) -> Result<(), PruneError>,
{
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;

    let rendered = render_pipe(&text, apply)?;

    io::stdout()
        .write_all(rendered.as_bytes())
        .context("failed to write stdout")
}

/// Transformed document as written to stdout, newline-terminated
fn render_pipe<F>(text: &str, apply: F) -> anyhow::Result<String>
where
    F: FnOnce(&mut Graph) -> Result<(), PruneError>,
{
    let mut rendered = transform(text, apply)?;
    rendered.push('\n');
    Ok(rendered)
}

/// File or directory mode, picked by what INPUT is
fn run_paths<F>(input: &Path, output: &Path, apply: F) -> anyhow::Result<()>
where
    F: FnMut(&mut Graph) -> Result<(), PruneError>,
{
    if !input.exists() {
        bail!("{} does not exist", input.display());
    }

    if input.is_file() {
        transform_file(input, output, apply)?;
    } else if input.is_dir() {
        if !output.is_dir() {
            bail!("{} is not an existing directory", output.display());
        }
        let written = transform_dir(input, output, apply)?;
        tracing::info!(files = written.len(), "directory transformed");
    } else {
        bail!("{} is neither a file nor a directory", input.display());
    }
    Ok(())
}

fn emit_report(report: &PruneReport) {
    match serde_json::to_string(report) {
        Ok(json) => eprintln!("{json}"),
        Err(err) => tracing::warn!(%err, "could not encode pruning report"),
    }
}
