//! CLI command implementations.

pub mod analyze;
pub mod config;
pub mod presets;
pub mod report;
pub mod schedule;
pub mod session;

// Re-export submodules for convenience
pub use analyze::AnalyzeArgs;
pub use config::ConfigArgs;
pub use presets::PresetsArgs;
pub use report::ReportArgs;
pub use schedule::ScheduleArgs;
pub use session::SessionArgs;

use std::path::PathBuf;

use clap::Args;
use luntra_config::{DealFile, DealOverrides};
use luntra_core::{DealInputs, ModelType};
use rust_decimal::Decimal;

use crate::context::Context;
use crate::error::CliResult;

/// Deal inputs shared by every command that analyzes a deal.
///
/// Values are layered: preset defaults, then the deal file, then flags.
#[derive(Args, Debug, Clone, Default)]
pub struct DealArgs {
    /// Deal file (.toml or .json)
    #[arg(short = 'F', long)]
    pub file: Option<PathBuf>,

    /// Preset to start from (e.g. house-hack, whole-unit)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Model type: house-hack or whole-unit
    #[arg(short, long, value_parser = parse_model)]
    pub model: Option<ModelType>,

    /// Purchase price
    #[arg(long, value_parser = parse_decimal)]
    pub price: Option<Decimal>,

    /// Down payment, percent of price
    #[arg(long, value_parser = parse_decimal)]
    pub down: Option<Decimal>,

    /// Annual interest rate, percent (e.g. 6.5)
    #[arg(long, value_parser = parse_decimal)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term: Option<u32>,

    /// Gross monthly rent
    #[arg(long, value_parser = parse_decimal)]
    pub rent: Option<Decimal>,

    /// Annual property tax
    #[arg(long, value_parser = parse_decimal)]
    pub tax: Option<Decimal>,

    /// Annual insurance premium
    #[arg(long, value_parser = parse_decimal)]
    pub insurance: Option<Decimal>,

    /// Monthly HOA dues
    #[arg(long, value_parser = parse_decimal)]
    pub hoa: Option<Decimal>,

    /// Monthly owner-paid utilities
    #[arg(long, value_parser = parse_decimal)]
    pub utilities: Option<Decimal>,

    /// Vacancy, percent of rent
    #[arg(long, value_parser = parse_decimal)]
    pub vacancy: Option<Decimal>,

    /// Maintenance, percent of rent
    #[arg(long, value_parser = parse_decimal)]
    pub maintenance: Option<Decimal>,

    /// CapEx reserve, percent of rent
    #[arg(long, value_parser = parse_decimal)]
    pub capex: Option<Decimal>,

    /// Property management, percent of rent
    #[arg(long, value_parser = parse_decimal)]
    pub management: Option<Decimal>,

    /// Closing costs, percent of price
    #[arg(long, value_parser = parse_decimal)]
    pub closing: Option<Decimal>,
}

/// A deal resolved from presets, file and flags.
#[derive(Debug, Clone)]
pub struct ResolvedDeal {
    /// Validated inputs.
    pub inputs: DealInputs,
    /// Title from the deal file.
    pub title: Option<String>,
    /// Notes from the deal file.
    pub notes: Vec<String>,
}

impl DealArgs {
    /// Field overrides given on the command line.
    pub fn overrides(&self) -> DealOverrides {
        DealOverrides {
            purchase_price: self.price,
            down_payment_percent: self.down,
            interest_rate_percent: self.rate,
            loan_term_years: self.term,
            monthly_rent: self.rent,
            annual_property_tax: self.tax,
            annual_insurance: self.insurance,
            monthly_hoa: self.hoa,
            monthly_utilities: self.utilities,
            vacancy_percent: self.vacancy,
            maintenance_percent: self.maintenance,
            capex_percent: self.capex,
            property_management_percent: self.management,
            closing_cost_percent: self.closing,
        }
    }

    /// Resolves the deal and validates it.
    pub fn resolve(&self, ctx: &Context) -> CliResult<ResolvedDeal> {
        let mut file = match &self.file {
            Some(path) => DealFile::load(path)?,
            None => DealFile::default(),
        };

        if self.preset.is_some() {
            file.preset = self.preset.clone();
        }
        if self.model.is_some() {
            file.model_type = self.model;
        }
        if file.preset.is_none() && file.model_type.is_none() {
            file.preset = ctx.settings.default_preset.clone();
        }

        let inputs = file.resolve_with(&ctx.registry, &self.overrides())?;
        tracing::debug!(
            model = %inputs.model_type,
            price = %inputs.purchase_price,
            rent = %inputs.monthly_rent,
            "resolved deal inputs"
        );

        Ok(ResolvedDeal {
            inputs,
            title: file.title,
            notes: file.notes,
        })
    }
}

/// Parses a decimal argument, allowing `$`, `%`, `,` and `_` for readability.
pub fn parse_decimal(s: &str) -> Result<Decimal, String> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | '%' | ',' | '_'))
        .collect();

    cleaned
        .parse::<Decimal>()
        .map_err(|_| format!("'{s}' is not a number"))
}

/// Parses a model type argument.
pub fn parse_model(s: &str) -> Result<ModelType, String> {
    s.parse::<ModelType>().map_err(|e| e.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("500000"), Ok(dec!(500000)));
        assert_eq!(parse_decimal("$500,000"), Ok(dec!(500000)));
        assert_eq!(parse_decimal("6.5%"), Ok(dec!(6.5)));
        assert_eq!(parse_decimal("1_200.50"), Ok(dec!(1200.50)));
        assert_eq!(parse_decimal("-10"), Ok(dec!(-10)));
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal("").is_err());
    }

    #[test]
    fn test_parse_model() {
        assert_eq!(parse_model("house-hack"), Ok(ModelType::HouseHack));
        assert_eq!(parse_model("Whole Unit"), Ok(ModelType::WholeUnit));
        assert!(parse_model("condo").is_err());
    }

    #[test]
    fn test_overrides_map_every_flag() {
        let args = DealArgs {
            price: Some(dec!(1)),
            rate: Some(dec!(2)),
            term: Some(15),
            closing: Some(dec!(3)),
            ..Default::default()
        };
        let o = args.overrides();
        assert_eq!(o.purchase_price, Some(dec!(1)));
        assert_eq!(o.interest_rate_percent, Some(dec!(2)));
        assert_eq!(o.loan_term_years, Some(15));
        assert_eq!(o.closing_cost_percent, Some(dec!(3)));
        assert!(o.monthly_rent.is_none());
    }
}
