//! Config command implementation.
//!
//! Manages the CLI settings file.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};

use luntra_config::{CliSettings, MAX_PRECISION};
use luntra_core::Validate;

use crate::cli::OutputFormat;
use crate::context::Context;
use crate::error::CliError;
use crate::output::{print_header, print_info, print_output, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current settings
    Show,

    /// Show settings file location
    Path,

    /// Write a settings file with the defaults
    Init(InitArgs),

    /// Set a setting
    Set(SetArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Setting key
    pub key: String,

    /// Setting value (use "none" to clear optional settings)
    pub value: String,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Path => execute_path(ctx),
        ConfigCommand::Init(init) => execute_init(init, ctx),
        ConfigCommand::Set(set) => execute_set(set, ctx),
    }
}

fn settings_path(ctx: &Context) -> Result<PathBuf> {
    ctx.settings_path
        .clone()
        .ok_or_else(|| anyhow!("Could not determine config directory; pass --config"))
}

/// Show current settings.
fn execute_show(ctx: &Context) -> Result<()> {
    let s = &ctx.settings;
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(s)?),
        OutputFormat::Minimal => print!("{}", s.to_toml_string()?),
        OutputFormat::Table | OutputFormat::Csv => {
            let rows = vec![
                KeyValue::new("default_format", s.default_format.clone()),
                KeyValue::new("precision", s.precision.to_string()),
                KeyValue::new("colors", s.colors.to_string()),
                KeyValue::new(
                    "default_preset",
                    s.default_preset.clone().unwrap_or_else(|| "none".into()),
                ),
                KeyValue::new(
                    "telemetry_sink",
                    s.telemetry_sink
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "none".into()),
                ),
                KeyValue::new(
                    "presets",
                    if s.presets.is_empty() {
                        "none".to_string()
                    } else {
                        s.presets
                            .iter()
                            .map(|p| p.name.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    },
                ),
            ];
            if ctx.format == OutputFormat::Table {
                print_header("Current Settings");
            }
            print_output(&rows, ctx.format)?;
        }
    }
    Ok(())
}

/// Show settings file path.
fn execute_path(ctx: &Context) -> Result<()> {
    let path = settings_path(ctx)?;
    if ctx.format == OutputFormat::Minimal {
        println!("{}", path.display());
        return Ok(());
    }

    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

/// Write default settings.
fn execute_init(args: InitArgs, ctx: &Context) -> Result<()> {
    let path = settings_path(ctx)?;
    if path.exists() && !args.force {
        print_warning(&format!(
            "{} already exists; use --force to overwrite",
            path.display()
        ));
        return Ok(());
    }

    CliSettings::default().save(&path)?;
    print_success(&format!("Wrote default settings to {}", path.display()));
    Ok(())
}

/// Set a single setting and save.
fn execute_set(args: SetArgs, ctx: &Context) -> Result<()> {
    let path = settings_path(ctx)?;
    let mut settings = ctx.settings.clone();
    let value = args.value.trim();
    let cleared = value.eq_ignore_ascii_case("none");

    match args.key.to_lowercase().as_str() {
        "default_format" | "format" => settings.default_format = value.to_lowercase(),
        "precision" => {
            settings.precision = value.parse().map_err(|_| {
                CliError::InvalidArgument(format!(
                    "precision must be a number from 0 to {MAX_PRECISION}, got {value}"
                ))
            })?;
        }
        "colors" => {
            settings.colors = match value.to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => true,
                "false" | "no" | "0" | "off" => false,
                _ => {
                    return Err(CliError::InvalidArgument(format!(
                        "colors must be true or false, got {value}"
                    ))
                    .into())
                }
            };
        }
        "default_preset" | "preset" => {
            if !cleared {
                ctx.registry.get(value)?;
            }
            settings.default_preset = (!cleared).then(|| value.to_string());
        }
        "telemetry_sink" | "sink" => {
            settings.telemetry_sink = (!cleared).then(|| PathBuf::from(value));
        }
        other => {
            return Err(CliError::InvalidArgument(format!(
                "unknown setting {other}; known settings are default_format, precision, colors, default_preset and telemetry_sink"
            ))
            .into())
        }
    }

    if let Some(error) = settings.validate().into_iter().next() {
        return Err(anyhow!("Invalid {}: {}", error.field, error.message));
    }

    settings.save(&path)?;
    print_success(&format!("Set {} = {}", args.key, value));
    Ok(())
}
