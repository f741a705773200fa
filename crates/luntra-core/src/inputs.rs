//! Deal input parameters.
//!
//! [`DealInputs`] is the single, strongly-typed description of a deal. It is
//! built from form or file state, validated once, and handed to the
//! calculator. It carries no identity and is never mutated by a calculation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{LuntraResult, Validate, ValidationError};
use crate::types::{FlatMap, FlatValue, ModelType, Percent};

/// Default loan term in years.
pub const DEFAULT_LOAN_TERM_YEARS: u32 = 30;

/// Longest loan term accepted.
pub const MAX_LOAN_TERM_YEARS: u32 = 50;

/// Largest monetary amount accepted for any field.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Input parameters for a single deal.
///
/// Monetary amounts are in the deal currency. Percentages are on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealInputs {
    /// Purchase price of the property.
    pub purchase_price: Decimal,
    /// Down payment as a percentage of the purchase price.
    pub down_payment_percent: Percent,
    /// Annual interest rate of the loan.
    pub interest_rate_percent: Percent,
    /// Loan term in years.
    pub loan_term_years: u32,
    /// Gross monthly rent.
    pub monthly_rent: Decimal,
    /// Annual property tax.
    pub annual_property_tax: Decimal,
    /// Annual insurance premium.
    pub annual_insurance: Decimal,
    /// Monthly HOA dues.
    pub monthly_hoa: Decimal,
    /// Monthly utilities paid by the owner.
    pub monthly_utilities: Decimal,
    /// Expected vacancy as a percentage of gross rent.
    pub vacancy_percent: Percent,
    /// Maintenance reserve as a percentage of gross rent.
    pub maintenance_percent: Percent,
    /// Capital expenditure reserve as a percentage of gross rent.
    pub capex_percent: Percent,
    /// Property management fee as a percentage of gross rent.
    pub property_management_percent: Percent,
    /// Closing costs as a percentage of the purchase price.
    pub closing_cost_percent: Percent,
    /// Investment model.
    pub model_type: ModelType,
}

impl Default for DealInputs {
    fn default() -> Self {
        Self {
            purchase_price: Decimal::ZERO,
            down_payment_percent: Percent::ZERO,
            interest_rate_percent: Percent::ZERO,
            loan_term_years: DEFAULT_LOAN_TERM_YEARS,
            monthly_rent: Decimal::ZERO,
            annual_property_tax: Decimal::ZERO,
            annual_insurance: Decimal::ZERO,
            monthly_hoa: Decimal::ZERO,
            monthly_utilities: Decimal::ZERO,
            vacancy_percent: Percent::ZERO,
            maintenance_percent: Percent::ZERO,
            capex_percent: Percent::ZERO,
            property_management_percent: Percent::ZERO,
            closing_cost_percent: Percent::ZERO,
            model_type: ModelType::default(),
        }
    }
}

impl DealInputs {
    /// Creates a builder starting from [`DealInputs::default`].
    pub fn builder() -> DealInputsBuilder {
        DealInputsBuilder::default()
    }

    /// Number of monthly payments over the loan term.
    pub fn payment_count(&self) -> u32 {
        self.loan_term_years.saturating_mul(12)
    }

    /// Down payment in currency.
    pub fn down_payment_amount(&self) -> Decimal {
        self.down_payment_percent.of(self.purchase_price)
    }

    /// Amount borrowed: purchase price less the down payment.
    pub fn loan_amount(&self) -> Decimal {
        self.purchase_price - self.down_payment_amount()
    }

    /// Monthly interest rate as a fraction.
    pub fn monthly_interest_rate(&self) -> Decimal {
        self.interest_rate_percent.as_fraction() / Decimal::from(12)
    }

    /// Flattens the inputs into a key-value map.
    ///
    /// Every field is always present.
    pub fn to_flat_map(&self) -> FlatMap {
        let entries: [(&str, FlatValue); 15] = [
            ("model_type", self.model_type.as_str().into()),
            ("purchase_price", self.purchase_price.into()),
            ("down_payment_percent", self.down_payment_percent.value().into()),
            ("interest_rate_percent", self.interest_rate_percent.value().into()),
            ("loan_term_years", self.loan_term_years.into()),
            ("monthly_rent", self.monthly_rent.into()),
            ("annual_property_tax", self.annual_property_tax.into()),
            ("annual_insurance", self.annual_insurance.into()),
            ("monthly_hoa", self.monthly_hoa.into()),
            ("monthly_utilities", self.monthly_utilities.into()),
            ("vacancy_percent", self.vacancy_percent.value().into()),
            ("maintenance_percent", self.maintenance_percent.value().into()),
            ("capex_percent", self.capex_percent.value().into()),
            (
                "property_management_percent",
                self.property_management_percent.value().into(),
            ),
            ("closing_cost_percent", self.closing_cost_percent.value().into()),
        ];

        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn amounts(&self) -> [(&'static str, Decimal); 6] {
        [
            ("purchase_price", self.purchase_price),
            ("monthly_rent", self.monthly_rent),
            ("annual_property_tax", self.annual_property_tax),
            ("annual_insurance", self.annual_insurance),
            ("monthly_hoa", self.monthly_hoa),
            ("monthly_utilities", self.monthly_utilities),
        ]
    }

    fn percents(&self) -> [(&'static str, Percent); 7] {
        [
            ("down_payment_percent", self.down_payment_percent),
            ("interest_rate_percent", self.interest_rate_percent),
            ("vacancy_percent", self.vacancy_percent),
            ("maintenance_percent", self.maintenance_percent),
            ("capex_percent", self.capex_percent),
            ("property_management_percent", self.property_management_percent),
            ("closing_cost_percent", self.closing_cost_percent),
        ]
    }
}

impl Validate for DealInputs {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (field, amount) in self.amounts() {
            if amount < Decimal::ZERO {
                errors.push(ValidationError::new(
                    field,
                    format!("must not be negative, got {amount}"),
                ));
            } else if amount > MAX_AMOUNT {
                errors.push(ValidationError::new(
                    field,
                    format!("must be at most {MAX_AMOUNT}, got {amount}"),
                ));
            }
        }

        errors.extend(
            self.percents()
                .iter()
                .filter_map(|(field, pct)| pct.check(field).err()),
        );

        if self.loan_term_years == 0 {
            errors.push(ValidationError::new("loan_term_years", "must be positive"));
        } else if self.loan_term_years > MAX_LOAN_TERM_YEARS {
            errors.push(ValidationError::new(
                "loan_term_years",
                format!(
                    "must be at most {MAX_LOAN_TERM_YEARS}, got {}",
                    self.loan_term_years
                ),
            ));
        }

        if !errors.is_empty() {
            log::debug!("deal inputs rejected with {} error(s)", errors.len());
        }

        errors
    }
}

/// Builder for [`DealInputs`].
///
/// # Example
///
/// ```rust
/// use luntra_core::{DealInputs, ModelType};
/// use rust_decimal_macros::dec;
///
/// let inputs = DealInputs::builder()
///     .model_type(ModelType::HouseHack)
///     .purchase_price(dec!(450000))
///     .down_payment_percent(dec!(5))
///     .interest_rate_percent(dec!(6.5))
///     .monthly_rent(dec!(2400))
///     .build()
///     .unwrap();
///
/// assert_eq!(inputs.payment_count(), 360);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DealInputsBuilder {
    inputs: DealInputs,
}

macro_rules! percent_setter {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[must_use]
        pub fn $name(mut self, value: Decimal) -> Self {
            self.inputs.$name = Percent::new(value);
            self
        }
    };
}

macro_rules! amount_setter {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[must_use]
        pub fn $name(mut self, value: Decimal) -> Self {
            self.inputs.$name = value;
            self
        }
    };
}

impl DealInputsBuilder {
    /// Starts from existing inputs, e.g. a preset.
    pub fn from_inputs(inputs: DealInputs) -> Self {
        Self { inputs }
    }

    amount_setter!(
        /// Sets the purchase price.
        purchase_price
    );
    amount_setter!(
        /// Sets the gross monthly rent.
        monthly_rent
    );
    amount_setter!(
        /// Sets the annual property tax.
        annual_property_tax
    );
    amount_setter!(
        /// Sets the annual insurance premium.
        annual_insurance
    );
    amount_setter!(
        /// Sets the monthly HOA dues.
        monthly_hoa
    );
    amount_setter!(
        /// Sets the monthly owner-paid utilities.
        monthly_utilities
    );
    percent_setter!(
        /// Sets the down payment percentage.
        down_payment_percent
    );
    percent_setter!(
        /// Sets the annual interest rate percentage.
        interest_rate_percent
    );
    percent_setter!(
        /// Sets the vacancy percentage.
        vacancy_percent
    );
    percent_setter!(
        /// Sets the maintenance reserve percentage.
        maintenance_percent
    );
    percent_setter!(
        /// Sets the capital expenditure reserve percentage.
        capex_percent
    );
    percent_setter!(
        /// Sets the property management fee percentage.
        property_management_percent
    );
    percent_setter!(
        /// Sets the closing cost percentage.
        closing_cost_percent
    );

    /// Sets the loan term in years.
    #[must_use]
    pub fn loan_term_years(mut self, years: u32) -> Self {
        self.inputs.loan_term_years = years;
        self
    }

    /// Sets the investment model.
    #[must_use]
    pub fn model_type(mut self, model: ModelType) -> Self {
        self.inputs.model_type = model;
        self
    }

    /// Validates and returns the inputs.
    pub fn build(self) -> LuntraResult<DealInputs> {
        self.inputs.validate_or_error()?;
        Ok(self.inputs)
    }

    /// Returns the inputs without validation.
    pub fn build_unchecked(self) -> DealInputs {
        self.inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LuntraError;

    #[test]
    fn test_defaults() {
        let inputs = DealInputs::default();
        assert_eq!(inputs.loan_term_years, 30);
        assert_eq!(inputs.payment_count(), 360);
        assert!(inputs.is_valid());
    }

    #[test]
    fn test_monthly_interest_rate() {
        let inputs = DealInputs::builder()
            .interest_rate_percent(dec!(6))
            .build_unchecked();
        assert_eq!(inputs.monthly_interest_rate(), dec!(0.005));
    }

    #[test]
    fn test_loan_amount() {
        let inputs = DealInputs::builder()
            .purchase_price(dec!(500000))
            .down_payment_percent(dec!(20))
            .build_unchecked();
        assert_eq!(inputs.down_payment_amount(), dec!(100000));
        assert_eq!(inputs.loan_amount(), dec!(400000));
        assert_eq!(inputs.down_payment_amount() + inputs.loan_amount(), dec!(500000));
    }

    #[test]
    fn test_payment_count_saturates() {
        let inputs = DealInputs::builder()
            .loan_term_years(u32::MAX)
            .build_unchecked();
        assert_eq!(inputs.payment_count(), u32::MAX);
    }

    #[test]
    fn test_negative_price_names_field() {
        let err = DealInputs::builder()
            .purchase_price(dec!(-100000))
            .build()
            .unwrap_err();
        assert!(matches!(err, LuntraError::InvalidInput(ref e) if e.field == "purchase_price"));
    }

    #[test]
    fn test_percent_out_of_range() {
        let err = DealInputs::builder()
            .vacancy_percent(dec!(101))
            .build()
            .unwrap_err();
        assert!(err.names_field("vacancy_percent"));
    }

    #[test]
    fn test_zero_term_rejected() {
        let err = DealInputs::builder().loan_term_years(0).build().unwrap_err();
        assert!(err.names_field("loan_term_years"));

        let err = DealInputs::builder().loan_term_years(51).build().unwrap_err();
        assert!(err.names_field("loan_term_years"));
    }

    #[test]
    fn test_collects_all_errors() {
        let inputs = DealInputs::builder()
            .monthly_rent(dec!(-1))
            .capex_percent(dec!(-5))
            .closing_cost_percent(dec!(250))
            .loan_term_years(0)
            .build_unchecked();

        let fields: Vec<String> = inputs.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "monthly_rent",
                "capex_percent",
                "closing_cost_percent",
                "loan_term_years"
            ]
        );
    }

    #[test]
    fn test_boundaries_accepted() {
        let inputs = DealInputs::builder()
            .purchase_price(Decimal::ZERO)
            .down_payment_percent(dec!(100))
            .interest_rate_percent(Decimal::ZERO)
            .loan_term_years(MAX_LOAN_TERM_YEARS)
            .build();
        assert!(inputs.is_ok());
    }

    #[test]
    fn test_flat_map_has_every_field() {
        let map = DealInputs::default().to_flat_map();
        assert_eq!(map.len(), 15);
        assert_eq!(map["model_type"], FlatValue::Text("Whole-Unit".into()));
        assert_eq!(map["loan_term_years"], FlatValue::Integer(30));
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{"purchase_price": 300000, "down_payment_percent": 5, "model_type": "House-Hack"}"#;
        let inputs: DealInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.purchase_price, dec!(300000));
        assert_eq!(inputs.down_payment_percent.value(), dec!(5));
        assert_eq!(inputs.model_type, ModelType::HouseHack);
        assert_eq!(inputs.loan_term_years, 30);
    }
}
