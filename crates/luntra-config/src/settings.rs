//! Command-line settings file.

use std::path::{Path, PathBuf};

use luntra_core::{Validate, ValidationError};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::preset::DealPreset;
use crate::registry::PresetRegistry;

/// Output formats the CLI understands.
pub const OUTPUT_FORMATS: [&str; 4] = ["table", "json", "csv", "minimal"];

/// Upper bound on displayed decimal places.
pub const MAX_PRECISION: u32 = 10;

/// Persistent CLI settings, stored as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliSettings {
    /// Default output format.
    #[serde(default = "default_format")]
    pub default_format: String,

    /// Decimal places for displayed ratios.
    #[serde(default = "default_precision")]
    pub precision: u32,

    /// Colored terminal output.
    #[serde(default = "default_true")]
    pub colors: bool,

    /// Preset used when neither a deal file nor `--preset` names one.
    #[serde(default)]
    pub default_preset: Option<String>,

    /// File that telemetry events are appended to, one JSON object per line.
    #[serde(default)]
    pub telemetry_sink: Option<PathBuf>,

    /// Custom presets, written as `[[presets]]` tables.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<DealPreset>,
}

fn default_format() -> String {
    "table".to_string()
}

fn default_precision() -> u32 {
    4
}

fn default_true() -> bool {
    true
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            precision: default_precision(),
            colors: true,
            default_preset: None,
            telemetry_sink: None,
            presets: Vec::new(),
        }
    }
}

impl CliSettings {
    /// Default location: `<config dir>/luntra/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("luntra").join("config.toml"))
    }

    /// Loads settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::parse(path, e))?;
        settings.validate_or_error()?;
        Ok(settings)
    }

    /// Loads settings from `path` if given, otherwise from the default path.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(path),
            _ => {
                log::debug!("no settings file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Builds the preset registry: built-ins plus the custom presets.
    pub fn registry(&self) -> ConfigResult<PresetRegistry> {
        PresetRegistry::with_custom(self.presets.iter().cloned())
    }

    /// Serializes the settings as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the settings to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_toml_string()?).map_err(io_err)?;
        log::debug!("saved settings to {}", path.display());
        Ok(())
    }
}

impl Validate for CliSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !OUTPUT_FORMATS.contains(&self.default_format.to_ascii_lowercase().as_str()) {
            errors.push(ValidationError::new(
                "default_format",
                format!(
                    "unknown format '{}', expected one of {}",
                    self.default_format,
                    OUTPUT_FORMATS.join(", ")
                ),
            ));
        }

        if self.precision > MAX_PRECISION {
            errors.push(ValidationError::new(
                "precision",
                format!("must be at most {MAX_PRECISION}, got {}", self.precision),
            ));
        }

        for preset in &self.presets {
            errors.extend(preset.validate().into_iter().map(|e| {
                ValidationError::new(format!("presets.{}", e.field), e.message)
            }));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luntra_core::ModelType;

    #[test]
    fn test_defaults() {
        let settings = CliSettings::default();
        assert_eq!(settings.default_format, "table");
        assert_eq!(settings.precision, 4);
        assert!(settings.colors);
        assert!(settings.is_valid());
    }

    #[test]
    fn test_partial_toml() {
        let settings: CliSettings = toml::from_str("precision = 2\n").unwrap();
        assert_eq!(settings.precision, 2);
        assert_eq!(settings.default_format, "table");
        assert!(settings.telemetry_sink.is_none());
    }

    #[test]
    fn test_validation() {
        let settings = CliSettings {
            default_format: "xml".into(),
            precision: 12,
            ..Default::default()
        };
        let fields: Vec<_> = settings.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["default_format", "precision"]);
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = CliSettings {
            default_format: "json".into(),
            telemetry_sink: Some(PathBuf::from("/tmp/luntra-events.jsonl")),
            ..Default::default()
        };
        let text = settings.to_toml_string().unwrap();
        let back: CliSettings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_custom_presets_from_toml() {
        let text = r#"
default_preset = "fha"

[[presets]]
name = "FHA"
description = "3.5% down owner-occupied"

[presets.defaults]
model_type = "House-Hack"
down_payment_percent = 3.5
interest_rate_percent = 6.25
"#;
        let settings: CliSettings = toml::from_str(text).unwrap();
        assert!(settings.is_valid());
        assert_eq!(settings.presets.len(), 1);

        let registry = settings.registry().unwrap();
        let fha = registry.get("fha").unwrap();
        assert_eq!(fha.model_type(), ModelType::HouseHack);
        assert_eq!(fha.defaults.loan_term_years, 30);
        assert!(!fha.read_only);
        assert_eq!(registry.list().len(), 3);
    }

    #[test]
    fn test_custom_preset_cannot_replace_builtin() {
        let settings = CliSettings {
            presets: vec![DealPreset::new("WHOLE_UNIT", ModelType::WholeUnit)],
            ..Default::default()
        };
        assert!(matches!(
            settings.registry(),
            Err(ConfigError::ReadOnly { .. })
        ));
    }

    #[test]
    fn test_invalid_custom_preset_named() {
        let mut preset = DealPreset::new("LONG", ModelType::WholeUnit);
        preset.defaults.loan_term_years = 0;
        let settings = CliSettings {
            presets: vec![preset],
            ..Default::default()
        };
        let fields: Vec<_> = settings.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["presets.loan_term_years"]);
    }
}
