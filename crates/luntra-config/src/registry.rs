//! Preset registry.
//!
//! Built once at start-up from the built-in presets plus any custom presets
//! from the settings file, then only read. Built-ins are read-only.

use std::collections::HashMap;

use luntra_core::{ModelType, Validate};

use crate::error::{ConfigError, ConfigResult};
use crate::preset::{normalize_key, DealPreset};

/// Registry of deal presets.
///
/// # Example
///
/// ```rust
/// use luntra_config::{DealPreset, PresetRegistry};
/// use luntra_core::ModelType;
///
/// let registry = PresetRegistry::with_custom([
///     DealPreset::new("FHA_DUPLEX", ModelType::HouseHack).with_description("3.5% down duplex"),
/// ])
/// .unwrap();
///
/// let preset = registry.get("house-hack").unwrap();
/// assert_eq!(preset.model_type(), ModelType::HouseHack);
/// assert!(registry.get("fha_duplex").is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PresetRegistry {
    /// Presets keyed by normalized name.
    presets: HashMap<String, DealPreset>,
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetRegistry {
    /// Creates a registry holding the built-in presets.
    pub fn new() -> Self {
        let presets = [DealPreset::house_hack(), DealPreset::whole_unit()]
            .into_iter()
            .map(|preset| (preset.key(), preset))
            .collect();
        Self { presets }
    }

    /// Creates a registry with no presets.
    pub fn empty() -> Self {
        Self {
            presets: HashMap::new(),
        }
    }

    /// Creates a registry holding the built-ins plus `custom` presets.
    ///
    /// Fails on the first custom preset that is invalid or clashes with a
    /// built-in.
    pub fn with_custom(custom: impl IntoIterator<Item = DealPreset>) -> ConfigResult<Self> {
        let mut registry = Self::new();
        for preset in custom {
            registry.register(preset)?;
        }
        Ok(registry)
    }

    /// Registers a preset, replacing any writable preset of the same name.
    pub fn register(&mut self, preset: DealPreset) -> ConfigResult<()> {
        preset.validate_or_error()?;

        let key = preset.key();
        if let Some(existing) = self.presets.get(&key) {
            if existing.read_only {
                return Err(ConfigError::ReadOnly {
                    key: existing.name.clone(),
                });
            }
        }

        log::debug!("registered preset {}", preset.name);
        self.presets.insert(key, preset);
        Ok(())
    }

    /// Gets a preset by name. Lookup ignores case and separators.
    pub fn get(&self, name: &str) -> ConfigResult<DealPreset> {
        self.presets
            .get(&normalize_key(name))
            .cloned()
            .ok_or_else(|| ConfigError::NotFound {
                key: name.to_string(),
            })
    }

    /// Gets the preset for a model, falling back to the built-in one.
    pub fn for_model(&self, model_type: ModelType) -> DealPreset {
        let builtin = DealPreset::for_model(model_type);
        self.get(&builtin.name).unwrap_or(builtin)
    }

    /// Lists all presets, sorted by name.
    pub fn list(&self) -> Vec<DealPreset> {
        let mut list: Vec<_> = self.presets.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luntra_core::DealInputs;

    #[test]
    fn test_builtins_loaded() {
        let registry = PresetRegistry::new();
        let names: Vec<_> = registry.list().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["HOUSE_HACK", "WHOLE_UNIT"]);
    }

    #[test]
    fn test_lookup_is_forgiving() {
        let registry = PresetRegistry::new();
        for name in ["HOUSE_HACK", "house-hack", "HouseHack", "house hack"] {
            assert_eq!(registry.get(name).unwrap().name, "HOUSE_HACK");
        }
        assert!(matches!(
            registry.get("condo"),
            Err(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_builtins_read_only() {
        let err = PresetRegistry::with_custom([DealPreset::new("house_hack", ModelType::HouseHack)])
            .unwrap_err();
        assert!(matches!(err, ConfigError::ReadOnly { .. }));
    }

    #[test]
    fn test_custom_presets_registered() {
        let registry = PresetRegistry::with_custom([
            DealPreset::new("Condo", ModelType::WholeUnit),
            DealPreset::new("CONDO", ModelType::WholeUnit).with_description("v2"),
        ])
        .unwrap();

        // Later writable presets replace earlier ones.
        assert_eq!(
            registry.get("condo").unwrap().description.as_deref(),
            Some("v2")
        );
        assert_eq!(registry.list().len(), 3);
    }

    #[test]
    fn test_invalid_preset_rejected() {
        let mut defaults = DealInputs::default();
        defaults.loan_term_years = 99;

        let err = PresetRegistry::with_custom([
            DealPreset::new("LONG", ModelType::WholeUnit).with_defaults(defaults)
        ])
        .unwrap_err();
        assert!(err.names_field("loan_term_years"));
    }

    #[test]
    fn test_for_model_falls_back() {
        let registry = PresetRegistry::empty();
        let preset = registry.for_model(ModelType::HouseHack);
        assert_eq!(preset.name, "HOUSE_HACK");
    }
}
