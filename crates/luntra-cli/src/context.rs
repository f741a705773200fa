//! Per-invocation context shared by all commands.

use std::path::PathBuf;

use anyhow::Result;
use luntra_config::{CliSettings, PresetRegistry};

use crate::cli::{Cli, OutputFormat};

/// Settings and global flags resolved once at start-up.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective output format.
    pub format: OutputFormat,
    /// Loaded settings.
    pub settings: CliSettings,
    /// Where the settings live (explicit `--config` or the default location).
    pub settings_path: Option<PathBuf>,
    /// Built-in presets plus the custom presets from the settings file.
    pub registry: PresetRegistry,
}

impl Context {
    /// Builds the context from parsed arguments.
    ///
    /// A missing settings file means defaults. A broken default settings file
    /// is reported and replaced by the defaults; a broken explicit `--config`
    /// file is an error.
    pub fn load(cli: &Cli) -> Result<Self> {
        let settings_path = cli.config.clone().or_else(CliSettings::default_path);

        let settings = match cli.config.as_deref() {
            Some(path) if !path.exists() => {
                tracing::debug!("{} does not exist yet, using defaults", path.display());
                CliSettings::default()
            }
            explicit => match CliSettings::load(explicit) {
                Ok(settings) => settings,
                Err(e) if explicit.is_none() => {
                    tracing::warn!("ignoring settings file: {e}");
                    CliSettings::default()
                }
                Err(e) => return Err(e.into()),
            },
        };

        let registry = settings.registry()?;

        let format = cli
            .format
            .or_else(|| OutputFormat::from_setting(&settings.default_format))
            .unwrap_or_default();

        if cli.no_color || !settings.colors {
            colored::control::set_override(false);
        }

        tracing::debug!(?format, precision = settings.precision, "loaded settings");

        Ok(Self {
            format,
            settings,
            settings_path,
            registry,
        })
    }

    /// Decimal places for displayed ratios.
    pub fn precision(&self) -> u32 {
        self.settings.precision
    }
}
