//! Luntra CLI - Command-line interface for real-estate deal analysis.
//!
//! # Usage
//!
//! ```bash
//! # Analyze a deal from flags
//! luntra analyze --model house-hack --price 420000 --rent 2100 --tax 5400
//!
//! # Analyze a deal file, with a flag overriding the file
//! luntra analyze --file duplex.toml --rate 6.25 --all
//!
//! # Yearly amortization
//! luntra schedule --file duplex.toml --yearly
//!
//! # Write a report
//! luntra report --file duplex.toml --notes "Roof replaced 2021" --output duplex.md
//!
//! # Record a session with feedback
//! luntra session --file duplex.toml --rating 5 --sink events.jsonl
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod context;
mod error;
mod output;
mod sink;

use cli::{Cli, Commands};
use context::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let ctx = Context::load(&cli)?;

    // Execute command
    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &ctx)?,
        Commands::Schedule(args) => commands::schedule::execute(args, &ctx)?,
        Commands::Report(args) => commands::report::execute(args, &ctx)?,
        Commands::Session(args) => commands::session::execute(args, &ctx)?,
        Commands::Presets(args) => commands::presets::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so they never mix with command output.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "luntra=debug,luntra_analytics=debug,luntra_config=debug,warn",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
