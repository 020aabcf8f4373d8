//! Election Perf Report CLI
//!
//! Renders the election latency charts from a timing CSV.

use anyhow::Result;
use clap::Parser;
use election_perf_report::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Generate the report
    cli.run()?;

    Ok(())
}
