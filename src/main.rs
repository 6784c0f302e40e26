//! Sajuvise - Saju and Western astrology engine CLI
//!
//! A local, deterministic favorability engine: four-pillar charts, Western
//! natal charts, event scoring, timelines, and compatibility.

use anyhow::Result;
use clap::Parser;
use sajuvise::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    cli::run(cli)
}
