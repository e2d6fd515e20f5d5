// File: crates/portfolio-plots/src/main.rs
// Summary: CLI entry point: flags, logging setup, one report run.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// Render the consumer-lending portfolio charts from CSV summary tables.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Directory holding the CSV summary tables.
    #[arg(long, default_value = "outputs")]
    data_dir: PathBuf,

    /// Directory the PNGs go to (defaults to <data-dir>/plots).
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let out_dir = cli
        .out_dir
        .clone()
        .unwrap_or_else(|| cli.data_dir.join("plots"));
    portfolio_plots::report::run(&cli.data_dir, &out_dir)
}
