//! Session command implementation.
//!
//! Computes a deal inside a calculator session and records the session's
//! telemetry events. The session payload always goes to stdout; events are
//! appended to the sink when one is configured.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use uuid::Uuid;

use luntra_analytics::{compute_metrics, EventKind, TelemetryEvent};
use luntra_core::FlatMap;

use crate::cli::OutputFormat;
use crate::commands::DealArgs;
use crate::context::Context;
use crate::output::{print_flat, print_header, print_output, print_warning, KeyValue};
use crate::sink::EventSink;

/// Arguments for the session command.
#[derive(Args, Debug)]
pub struct SessionArgs {
    #[command(flatten)]
    pub deal: DealArgs,

    /// Continue an existing session instead of starting a new one
    #[arg(long)]
    pub session_id: Option<Uuid>,

    /// Rate the calculator from 1 to 5
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=5))]
    pub rating: Option<u32>,

    /// Feedback message to go with the rating
    #[arg(long, requires = "rating")]
    pub message: Option<String>,

    /// Telemetry sink file (overrides the settings file)
    #[arg(long)]
    pub sink: Option<PathBuf>,
}

/// Session payload.
#[derive(Debug, Serialize)]
struct SessionPayload {
    session_id: Uuid,
    events: Vec<EventKind>,
    delivered: bool,
    inputs: FlatMap,
    metrics: FlatMap,
}

/// Execute the session command.
pub fn execute(args: SessionArgs, ctx: &Context) -> Result<()> {
    let deal = args.deal.resolve(ctx)?;
    let metrics = compute_metrics(&deal.inputs)?;

    let session_id = args.session_id.unwrap_or_else(Uuid::new_v4);
    let mut events = Vec::new();
    if args.session_id.is_none() {
        events.push(TelemetryEvent::session_started(session_id));
    }
    events.push(TelemetryEvent::metrics_computed(session_id, &deal.inputs, &metrics));
    if let Some(rating) = args.rating {
        events.push(TelemetryEvent::feedback(session_id, rating, args.message.as_deref())?);
    }

    let sink = args
        .sink
        .or_else(|| ctx.settings.telemetry_sink.clone())
        .map(EventSink::new);
    let delivered = match &sink {
        Some(sink) => sink.emit(&events),
        None => {
            tracing::debug!("no telemetry sink configured");
            false
        }
    };

    let payload = SessionPayload {
        session_id,
        events: events.iter().map(|e| e.event).collect(),
        delivered,
        inputs: deal.inputs.to_flat_map(),
        metrics: metrics.to_flat_map(),
    };

    match ctx.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Csv => {
            let mut map = payload.inputs;
            map.extend(payload.metrics);
            map.insert("session_id".into(), session_id.to_string().into());
            print_flat(&map, ctx.format)?;
        }
        OutputFormat::Minimal => println!("{session_id}"),
        OutputFormat::Table => {
            print_header("Session");
            let events: Vec<&str> = payload.events.iter().map(EventKind::as_str).collect();
            let rows = vec![
                KeyValue::new("Session ID", session_id.to_string()),
                KeyValue::new("Events", events.join(", ")),
                KeyValue::new(
                    "Sink",
                    sink.as_ref()
                        .map(|s| s.path().display().to_string())
                        .unwrap_or_else(|| "none".to_string()),
                ),
            ];
            print_output(&rows, ctx.format)?;
        }
    }

    if sink.is_some() && !delivered {
        print_warning("Telemetry events could not be written; continuing.");
    }

    Ok(())
}
