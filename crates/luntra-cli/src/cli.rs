//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{
    AnalyzeArgs, ConfigArgs, PresetsArgs, ReportArgs, ScheduleArgs, SessionArgs,
};

/// Luntra - 60-second deal analysis for house-hack and whole-unit rentals
#[derive(Parser)]
#[command(name = "luntra")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the settings file, then table)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, env = "LUNTRA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compute deal metrics (PITI, NOI, cash flow, cap rate, cash-on-cash)
    Analyze(AnalyzeArgs),

    /// Show the loan amortization schedule
    Schedule(ScheduleArgs),

    /// Render a deal report
    Report(ReportArgs),

    /// Record a calculator session and append its events to the telemetry sink
    Session(SessionArgs),

    /// List or show deal presets
    Presets(PresetsArgs),

    /// Manage CLI settings
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (key figures only)
    Minimal,
}

impl OutputFormat {
    /// Parses the format name stored in the settings file.
    pub fn from_setting(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }

    /// Lowercase name, as written in the settings file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Minimal => "minimal",
        }
    }
}
