//! Deal presets.
//!
//! A preset carries the default financing and expense assumptions for a
//! model. Deal-specific amounts (price, rent, taxes) stay at zero until a
//! deal file or the command line fills them in.

use luntra_core::{DealInputs, ModelType, Validate, ValidationError};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

// =============================================================================
// DEAL PRESET
// =============================================================================

/// Named default assumptions for a deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealPreset {
    /// Preset name, e.g. `HOUSE_HACK`.
    pub name: String,

    /// Description of this preset.
    #[serde(default)]
    pub description: Option<String>,

    /// Default inputs, including the model type.
    #[serde(default)]
    pub defaults: DealInputs,

    /// Whether this preset is read-only.
    #[serde(default)]
    pub read_only: bool,
}

impl DealPreset {
    /// Creates a new preset starting from all-default inputs for a model.
    pub fn new(name: impl Into<String>, model_type: ModelType) -> Self {
        Self {
            name: name.into(),
            description: None,
            defaults: DealInputs {
                model_type,
                ..DealInputs::default()
            },
            read_only: false,
        }
    }

    /// Owner-occupant low-down-payment financing on a small multifamily.
    pub fn house_hack() -> Self {
        Self {
            name: "HOUSE_HACK".to_string(),
            description: Some("Owner-occupied small multifamily, low down payment".to_string()),
            defaults: DealInputs::builder()
                .down_payment_percent(dec!(5))
                .interest_rate_percent(dec!(6.5))
                .loan_term_years(30)
                .vacancy_percent(dec!(5))
                .maintenance_percent(dec!(5))
                .capex_percent(dec!(5))
                .closing_cost_percent(dec!(3))
                .model_type(ModelType::HouseHack)
                .build_unchecked(),
            read_only: true,
        }
    }

    /// Investor financing on a fully rented property.
    pub fn whole_unit() -> Self {
        Self {
            name: "WHOLE_UNIT".to_string(),
            description: Some("Fully rented investment property".to_string()),
            defaults: DealInputs::builder()
                .down_payment_percent(dec!(25))
                .interest_rate_percent(dec!(6.5))
                .loan_term_years(30)
                .vacancy_percent(dec!(5))
                .maintenance_percent(dec!(5))
                .capex_percent(dec!(5))
                .property_management_percent(dec!(8))
                .closing_cost_percent(dec!(3))
                .model_type(ModelType::WholeUnit)
                .build_unchecked(),
            read_only: true,
        }
    }

    /// Returns the built-in preset for a model.
    pub fn for_model(model_type: ModelType) -> Self {
        match model_type {
            ModelType::HouseHack => Self::house_hack(),
            ModelType::WholeUnit => Self::whole_unit(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the default inputs.
    #[must_use]
    pub fn with_defaults(mut self, defaults: DealInputs) -> Self {
        self.defaults = defaults;
        self
    }

    /// Model this preset targets.
    pub fn model_type(&self) -> ModelType {
        self.defaults.model_type
    }

    /// Lookup key: the name lowercased with separators removed, so
    /// `HOUSE_HACK`, `house-hack` and `HouseHack` are the same preset.
    pub fn key(&self) -> String {
        normalize_key(&self.name)
    }
}

/// Normalizes a preset name for lookup.
pub(crate) fn normalize_key(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl Validate for DealPreset {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.key().is_empty() {
            errors.push(ValidationError::new(
                "name",
                "Name must contain at least one letter or digit",
            ));
        }

        errors.extend(self.defaults.validate());
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luntra_core::Percent;

    #[test]
    fn test_builtin_presets_valid() {
        for preset in [DealPreset::house_hack(), DealPreset::whole_unit()] {
            assert!(preset.is_valid(), "{} invalid: {:?}", preset.name, preset.validate());
            assert!(preset.read_only);
        }
    }

    #[test]
    fn test_house_hack_defaults() {
        let preset = DealPreset::house_hack();
        assert_eq!(preset.model_type(), ModelType::HouseHack);
        assert_eq!(preset.defaults.down_payment_percent, Percent::new(dec!(5)));
        assert_eq!(preset.defaults.interest_rate_percent, Percent::new(dec!(6.5)));
        assert_eq!(preset.defaults.loan_term_years, 30);
        assert!(preset.defaults.purchase_price.is_zero());
    }

    #[test]
    fn test_whole_unit_defaults() {
        let preset = DealPreset::for_model(ModelType::WholeUnit);
        assert_eq!(preset.name, "WHOLE_UNIT");
        assert_eq!(preset.defaults.down_payment_percent, Percent::new(dec!(25)));
        assert_eq!(
            preset.defaults.property_management_percent,
            Percent::new(dec!(8))
        );
    }

    #[test]
    fn test_key_normalization() {
        assert_eq!(normalize_key("HOUSE_HACK"), "househack");
        assert_eq!(normalize_key("house-hack"), "househack");
        assert_eq!(normalize_key(" House Hack "), "househack");
        assert_eq!(DealPreset::whole_unit().key(), "wholeunit");
    }

    #[test]
    fn test_invalid_preset() {
        let mut defaults = DealInputs::default();
        defaults.loan_term_years = 0;
        let preset = DealPreset::new("--", ModelType::WholeUnit).with_defaults(defaults);

        let fields: Vec<_> = preset.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "loan_term_years"]);
    }
}
