//! Presets command implementation.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use luntra_config::{DealPreset, PresetRegistry};

use crate::cli::OutputFormat;
use crate::context::Context;
use crate::output::{print_header, print_output, KeyValue};

/// Arguments for the presets command.
#[derive(Args, Debug)]
pub struct PresetsArgs {
    #[command(subcommand)]
    pub command: Option<PresetsCommand>,
}

/// Presets subcommands.
#[derive(Subcommand, Debug)]
pub enum PresetsCommand {
    /// List available presets (default)
    List,

    /// Show a preset's default assumptions
    Show(ShowArgs),
}

/// Arguments for show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Preset name (case and separators are ignored)
    pub name: String,
}

#[derive(Serialize, Tabled)]
struct PresetRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Down")]
    down: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Term")]
    term: u32,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&DealPreset> for PresetRow {
    fn from(preset: &DealPreset) -> Self {
        Self {
            name: preset.name.clone(),
            model: preset.model_type().to_string(),
            down: preset.defaults.down_payment_percent.to_string(),
            rate: preset.defaults.interest_rate_percent.to_string(),
            term: preset.defaults.loan_term_years,
            description: preset.description.clone().unwrap_or_default(),
        }
    }
}

/// Execute the presets command.
pub fn execute(args: PresetsArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(PresetsCommand::List) {
        PresetsCommand::List => execute_list(&ctx.registry, ctx.format),
        PresetsCommand::Show(show) => execute_show(&ctx.registry, &show.name, ctx.format),
    }
}

fn execute_list(registry: &PresetRegistry, format: OutputFormat) -> Result<()> {
    let presets = registry.list();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&presets)?),
        OutputFormat::Minimal => {
            for preset in &presets {
                println!("{}", preset.name);
            }
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<PresetRow> = presets.iter().map(PresetRow::from).collect();
            if format == OutputFormat::Table {
                print_header("Deal Presets");
            }
            print_output(&rows, format)?;
        }
    }
    Ok(())
}

fn execute_show(registry: &PresetRegistry, name: &str, format: OutputFormat) -> Result<()> {
    let preset = registry.get(name)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&preset)?),
        OutputFormat::Minimal => println!("{}", preset.name),
        OutputFormat::Table | OutputFormat::Csv => {
            let d = &preset.defaults;
            let rows = vec![
                KeyValue::new("Model", d.model_type.to_string()),
                KeyValue::new("Down Payment", d.down_payment_percent.to_string()),
                KeyValue::new("Interest Rate", d.interest_rate_percent.to_string()),
                KeyValue::new("Loan Term", format!("{} years", d.loan_term_years)),
                KeyValue::new("Vacancy", d.vacancy_percent.to_string()),
                KeyValue::new("Maintenance", d.maintenance_percent.to_string()),
                KeyValue::new("CapEx", d.capex_percent.to_string()),
                KeyValue::new("Property Management", d.property_management_percent.to_string()),
                KeyValue::new("Closing Costs", d.closing_cost_percent.to_string()),
            ];
            if format == OutputFormat::Table {
                print_header(&preset.name);
                if let Some(description) = &preset.description {
                    println!("{description}");
                }
            }
            print_output(&rows, format)?;
        }
    }
    Ok(())
}
