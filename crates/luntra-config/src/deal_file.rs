//! Deal files.
//!
//! A deal file names a preset (or a model) and overrides any subset of the
//! input fields. TOML and JSON are both accepted, chosen by extension:
//!
//! ```toml
//! preset = "house-hack"
//! title = "Duplex on Elm"
//! notes = ["Owner occupies the upstairs unit"]
//!
//! [deal]
//! purchase_price = 420000
//! monthly_rent = 2100
//! annual_property_tax = 5400
//! ```

use std::path::Path;

use luntra_core::{DealInputs, ModelType, Percent, Validate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::registry::PresetRegistry;

// =============================================================================
// OVERRIDES
// =============================================================================

/// Optional values for each input field. `None` keeps the preset default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DealOverrides {
    /// Purchase price.
    pub purchase_price: Option<Decimal>,
    /// Down payment, 0-100.
    pub down_payment_percent: Option<Decimal>,
    /// Annual interest rate, 0-100.
    pub interest_rate_percent: Option<Decimal>,
    /// Loan term in years.
    pub loan_term_years: Option<u32>,
    /// Gross monthly rent.
    pub monthly_rent: Option<Decimal>,
    /// Annual property tax.
    pub annual_property_tax: Option<Decimal>,
    /// Annual insurance.
    pub annual_insurance: Option<Decimal>,
    /// Monthly HOA dues.
    pub monthly_hoa: Option<Decimal>,
    /// Monthly owner-paid utilities.
    pub monthly_utilities: Option<Decimal>,
    /// Vacancy, percent of rent.
    pub vacancy_percent: Option<Decimal>,
    /// Maintenance, percent of rent.
    pub maintenance_percent: Option<Decimal>,
    /// Capital expenditure reserve, percent of rent.
    pub capex_percent: Option<Decimal>,
    /// Property management, percent of rent.
    pub property_management_percent: Option<Decimal>,
    /// Closing costs, percent of price.
    pub closing_cost_percent: Option<Decimal>,
}

macro_rules! merge_fields {
    ($self:ident, $other:ident; $($field:ident),+ $(,)?) => {
        $( if $other.$field.is_some() { $self.$field = $other.$field; } )+
    };
}

impl DealOverrides {
    /// Returns true if no field is overridden.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Layers `other` on top of `self`; fields set in `other` win.
    pub fn merge(&mut self, other: &DealOverrides) {
        merge_fields!(self, other;
            purchase_price, down_payment_percent, interest_rate_percent, loan_term_years,
            monthly_rent, annual_property_tax, annual_insurance, monthly_hoa,
            monthly_utilities, vacancy_percent, maintenance_percent, capex_percent,
            property_management_percent, closing_cost_percent,
        );
    }

    /// Applies the overridden fields to `inputs`.
    pub fn apply(&self, inputs: &mut DealInputs) {
        let amounts = [
            (&mut inputs.purchase_price, self.purchase_price),
            (&mut inputs.monthly_rent, self.monthly_rent),
            (&mut inputs.annual_property_tax, self.annual_property_tax),
            (&mut inputs.annual_insurance, self.annual_insurance),
            (&mut inputs.monthly_hoa, self.monthly_hoa),
            (&mut inputs.monthly_utilities, self.monthly_utilities),
        ];
        for (slot, value) in amounts {
            if let Some(v) = value {
                *slot = v;
            }
        }

        let percents = [
            (&mut inputs.down_payment_percent, self.down_payment_percent),
            (&mut inputs.interest_rate_percent, self.interest_rate_percent),
            (&mut inputs.vacancy_percent, self.vacancy_percent),
            (&mut inputs.maintenance_percent, self.maintenance_percent),
            (&mut inputs.capex_percent, self.capex_percent),
            (&mut inputs.property_management_percent, self.property_management_percent),
            (&mut inputs.closing_cost_percent, self.closing_cost_percent),
        ];
        for (slot, value) in percents {
            if let Some(v) = value {
                *slot = Percent::new(v);
            }
        }

        if let Some(term) = self.loan_term_years {
            inputs.loan_term_years = term;
        }
    }
}

// =============================================================================
// DEAL FILE
// =============================================================================

/// A deal described on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DealFile {
    /// Preset to start from.
    #[serde(default)]
    pub preset: Option<String>,

    /// Model type. Overrides the preset's model when both are given.
    #[serde(default, alias = "model")]
    pub model_type: Option<ModelType>,

    /// Report title.
    #[serde(default)]
    pub title: Option<String>,

    /// Free-text notes carried into reports.
    #[serde(default)]
    pub notes: Vec<String>,

    /// Field overrides.
    #[serde(default)]
    pub deal: DealOverrides,
}

impl DealFile {
    /// Loads a deal file, choosing the parser by extension.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, String> = match extension.as_deref() {
            Some("toml") => |s| toml::from_str(s).map_err(|e| e.to_string()),
            Some("json") => |s| serde_json::from_str(s).map_err(|e| e.to_string()),
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file = parse(&content).map_err(|message| ConfigError::parse(path, message))?;
        log::debug!("loaded deal file {}", path.display());
        Ok(file)
    }

    /// Parses a deal file from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::parse("<inline>", e))
    }

    /// Resolves the file to validated inputs.
    pub fn resolve(&self, registry: &PresetRegistry) -> ConfigResult<DealInputs> {
        self.resolve_with(registry, &DealOverrides::default())
    }

    /// Resolves the file to validated inputs, with `extra` layered on top of
    /// the file's own overrides.
    pub fn resolve_with(
        &self,
        registry: &PresetRegistry,
        extra: &DealOverrides,
    ) -> ConfigResult<DealInputs> {
        let preset = match (&self.preset, self.model_type) {
            (Some(name), _) => registry.get(name)?,
            (None, Some(model)) => registry.for_model(model),
            (None, None) => registry.for_model(ModelType::default()),
        };

        let mut inputs = preset.defaults;
        if let Some(model) = self.model_type {
            inputs.model_type = model;
        }

        let mut overrides = self.deal.clone();
        overrides.merge(extra);
        overrides.apply(&mut inputs);

        inputs.validate_or_error()?;
        Ok(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_toml() {
        let file = DealFile::from_toml_str(
            r#"
            preset = "house-hack"
            title = "Duplex"

            [deal]
            purchase_price = 420000
            monthly_rent = 2100.50
            loan_term_years = 15
            "#,
        )
        .unwrap();

        assert_eq!(file.preset.as_deref(), Some("house-hack"));
        assert_eq!(file.deal.purchase_price, Some(dec!(420000)));
        assert_eq!(file.deal.monthly_rent, Some(dec!(2100.50)));
        assert_eq!(file.deal.loan_term_years, Some(15));
        assert!(file.deal.vacancy_percent.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = DealFile::from_toml_str("[deal]\npurchase_prize = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_resolve_onto_preset() {
        let registry = PresetRegistry::new();
        let file = DealFile {
            preset: Some("HOUSE_HACK".into()),
            deal: DealOverrides {
                purchase_price: Some(dec!(400000)),
                monthly_rent: Some(dec!(2000)),
                ..Default::default()
            },
            ..Default::default()
        };

        let inputs = file.resolve(&registry).unwrap();
        assert_eq!(inputs.model_type, ModelType::HouseHack);
        assert_eq!(inputs.purchase_price, dec!(400000));
        assert_eq!(inputs.down_payment_percent, Percent::new(dec!(5)));
        assert_eq!(inputs.loan_term_years, 30);
    }

    #[test]
    fn test_model_selects_preset() {
        let registry = PresetRegistry::new();
        let file = DealFile {
            model_type: Some(ModelType::WholeUnit),
            ..Default::default()
        };
        let inputs = file.resolve(&registry).unwrap();
        assert_eq!(inputs.down_payment_percent, Percent::new(dec!(25)));
    }

    #[test]
    fn test_model_overrides_preset_model() {
        let registry = PresetRegistry::new();
        let file = DealFile {
            preset: Some("house-hack".into()),
            model_type: Some(ModelType::WholeUnit),
            ..Default::default()
        };
        let inputs = file.resolve(&registry).unwrap();
        assert_eq!(inputs.model_type, ModelType::WholeUnit);
        assert_eq!(inputs.down_payment_percent, Percent::new(dec!(5)));
    }

    #[test]
    fn test_extra_overrides_win() {
        let registry = PresetRegistry::new();
        let file = DealFile {
            deal: DealOverrides {
                interest_rate_percent: Some(dec!(7)),
                ..Default::default()
            },
            ..Default::default()
        };
        let extra = DealOverrides {
            interest_rate_percent: Some(dec!(5.75)),
            ..Default::default()
        };

        let inputs = file.resolve_with(&registry, &extra).unwrap();
        assert_eq!(inputs.interest_rate_percent, Percent::new(dec!(5.75)));
    }

    #[test]
    fn test_resolve_validates() {
        let registry = PresetRegistry::new();
        let file = DealFile {
            deal: DealOverrides {
                down_payment_percent: Some(dec!(110)),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = file.resolve(&registry).unwrap_err();
        assert!(err.names_field("down_payment_percent"));
    }

    #[test]
    fn test_unknown_preset() {
        let registry = PresetRegistry::new();
        let file = DealFile {
            preset: Some("castle".into()),
            ..Default::default()
        };
        assert!(matches!(
            file.resolve(&registry),
            Err(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_overrides_is_empty() {
        assert!(DealOverrides::default().is_empty());
        let o = DealOverrides {
            loan_term_years: Some(20),
            ..Default::default()
        };
        assert!(!o.is_empty());
    }
}
