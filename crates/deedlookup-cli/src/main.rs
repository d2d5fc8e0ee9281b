//! deedlookup — resolve incident addresses to property owners of record.
//!
//! Reads a JSON or CSV file of incident addresses, routes each address
//! to the municipal source that can answer it, and writes one JSON
//! artifact of per-address outcomes. Individual lookup failures are
//! reported in the output, not through the exit code; only a bad
//! argument, input file, or output write exits non-zero.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{warn, Level};

use deedlookup_core::{init_tracing, load_addresses, Orchestrator, ResolverConfig};

#[derive(Parser)]
#[command(name = "deedlookup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve incident addresses to property owners of record", long_about = None)]
struct Cli {
    /// CSV or JSON file with incident addresses
    input_file: PathBuf,

    /// Output JSON file
    #[arg(long, default_value = "owner_names.json")]
    output: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let addresses = load_addresses(&cli.input_file)
        .with_context(|| format!("failed to load addresses from {:?}", cli.input_file))?;

    // Ctrl-C aborts outstanding lookups; whatever has been collected is
    // still written below.
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received; flushing collected results");
            interrupt.cancel();
        }
    });

    let orchestrator = Orchestrator::new(ResolverConfig::default())?;
    let results = orchestrator.run(&addresses, &cancel).await;

    results
        .write_json(&cli.output)
        .with_context(|| format!("failed to write results to {:?}", cli.output))?;

    Ok(())
}
