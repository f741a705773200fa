//! Report command implementation.
//!
//! Renders the deal report to stdout or a file and records the export.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use uuid::Uuid;

use luntra_analytics::{analyze, DealReport, TelemetryEvent};

use crate::cli::OutputFormat;
use crate::commands::DealArgs;
use crate::context::Context;
use crate::error::CliError;
use crate::output::{print_success, print_warning};
use crate::sink::EventSink;

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub deal: DealArgs,

    /// Report title (overrides the deal file's title)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Note to append; may be repeated
    #[arg(short, long = "notes", value_name = "NOTE")]
    pub notes: Vec<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Session the export belongs to
    #[arg(long)]
    pub session_id: Option<Uuid>,

    /// Telemetry sink file (overrides the settings file)
    #[arg(long)]
    pub sink: Option<PathBuf>,
}

/// Execute the report command.
pub fn execute(args: ReportArgs, ctx: &Context) -> Result<()> {
    let deal = args.deal.resolve(ctx)?;
    let analysis = analyze(&deal.inputs)?;

    let mut report = DealReport::new(analysis);
    if let Some(title) = args.title.or(deal.title) {
        report = report.with_title(title);
    }
    for note in deal.notes.into_iter().chain(args.notes) {
        report = report.with_note(note);
    }
    let text = report.render();

    match &args.output {
        Some(path) => {
            std::fs::write(path, &text).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            print_success(&format!("Report written to {}", path.display()));
        }
        None if ctx.format == OutputFormat::Json => {
            let output = serde_json::json!({
                "title": report_title(&text),
                "body": text,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        None => print!("{text}"),
    }

    let sink = args
        .sink
        .or_else(|| ctx.settings.telemetry_sink.clone())
        .map(EventSink::new);
    if let Some(sink) = sink {
        let session = args.session_id.unwrap_or_else(Uuid::new_v4);
        let event = TelemetryEvent::report_exported(session, report.analysis(), "markdown");
        if !sink.emit(&[event]) {
            print_warning("Telemetry events could not be written; continuing.");
        }
    }

    Ok(())
}

fn report_title(text: &str) -> &str {
    text.lines()
        .next()
        .and_then(|line| line.strip_prefix("# "))
        .unwrap_or_default()
}
