//! Supplementary underwriting ratios.
//!
//! These complement [`DealMetrics`] with screening figures commonly quoted
//! alongside it. Percent-style figures are returned on a 0-100 scale; the rest
//! are plain multiples.

use luntra_core::{DealInputs, FlatMap, FlatValue, Ratio};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::metrics::DealMetrics;

/// Supplementary ratios for a deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementaryMetrics {
    /// Loan / price × 100.
    pub loan_to_value_percent: Ratio,
    /// Price / annual gross rent.
    pub gross_rent_multiplier: Ratio,
    /// Annual NOI / annual debt service. Undefined without a loan.
    pub debt_service_coverage: Ratio,
    /// Monthly rent / price × 100. The 1% rule compares this to 1.
    pub rent_to_price_percent: Ratio,
    /// (Operating expenses + P&I) / gross rent × 100.
    pub break_even_occupancy_percent: Ratio,
    /// PITI minus effective gross income: what an owner-occupant still pays
    /// each month. Negative when the rent more than covers the payment.
    pub net_housing_cost: Decimal,
    /// EGI / PITI × 100: how much of the housing payment the rent covers.
    pub housing_cost_offset_percent: Ratio,
}

/// Compute the supplementary ratios from inputs and their metrics.
///
/// # Example
///
/// ```rust
/// use luntra_analytics::{compute_metrics, supplementary_metrics};
/// use luntra_core::DealInputs;
/// use rust_decimal_macros::dec;
///
/// let inputs = DealInputs::builder()
///     .purchase_price(dec!(400000))
///     .down_payment_percent(dec!(100))
///     .monthly_rent(dec!(2500))
///     .build()
///     .unwrap();
/// let metrics = compute_metrics(&inputs).unwrap();
/// let extra = supplementary_metrics(&inputs, &metrics);
///
/// assert_eq!(extra.rent_to_price_percent.value(), Some(dec!(0.625)));
/// assert!(extra.debt_service_coverage.is_undefined());
/// ```
pub fn supplementary_metrics(inputs: &DealInputs, metrics: &DealMetrics) -> SupplementaryMetrics {
    let price = inputs.purchase_price;
    let rent = inputs.monthly_rent;

    let loan_to_value_percent = Ratio::divide(metrics.loan_amount, price).as_percent();
    let gross_rent_multiplier = Ratio::divide(price, rent * Decimal::from(12));
    let debt_service_coverage =
        Ratio::divide(metrics.annual_noi(), metrics.annual_debt_service());
    let rent_to_price_percent = Ratio::divide(rent, price).as_percent();
    let break_even_occupancy_percent = Ratio::divide(
        metrics.operating_expenses + metrics.principal_and_interest,
        rent,
    )
    .as_percent();

    let net_housing_cost = metrics.monthly_piti - metrics.effective_gross_income;
    let housing_cost_offset_percent =
        Ratio::divide(metrics.effective_gross_income, metrics.monthly_piti).as_percent();

    SupplementaryMetrics {
        loan_to_value_percent,
        gross_rent_multiplier,
        debt_service_coverage,
        rent_to_price_percent,
        break_even_occupancy_percent,
        net_housing_cost,
        housing_cost_offset_percent,
    }
}

impl SupplementaryMetrics {
    /// Flattens the ratios into a key-value map. Every key is always present.
    pub fn to_flat_map(&self) -> FlatMap {
        let entries: [(&str, FlatValue); 7] = [
            ("loan_to_value_percent", self.loan_to_value_percent.to_flat()),
            ("gross_rent_multiplier", self.gross_rent_multiplier.to_flat()),
            ("debt_service_coverage", self.debt_service_coverage.to_flat()),
            ("rent_to_price_percent", self.rent_to_price_percent.to_flat()),
            (
                "break_even_occupancy_percent",
                self.break_even_occupancy_percent.to_flat(),
            ),
            ("net_housing_cost", self.net_housing_cost.into()),
            (
                "housing_cost_offset_percent",
                self.housing_cost_offset_percent.to_flat(),
            ),
        ];

        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_metrics;
    use rust_decimal_macros::dec;

    fn financed_deal() -> DealInputs {
        DealInputs::builder()
            .purchase_price(dec!(500000))
            .down_payment_percent(dec!(20))
            .interest_rate_percent(dec!(6))
            .monthly_rent(dec!(3000))
            .annual_property_tax(dec!(6000))
            .annual_insurance(dec!(2000))
            .vacancy_percent(dec!(5))
            .build()
            .unwrap()
    }

    #[test]
    fn test_ltv_and_grm() {
        let inputs = financed_deal();
        let extra = supplementary_metrics(&inputs, &compute_metrics(&inputs).unwrap());

        assert_eq!(extra.loan_to_value_percent.value(), Some(dec!(80)));
        // 500000 / 36000
        let grm = extra.gross_rent_multiplier.value().unwrap();
        assert!((grm - dec!(13.8889)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_dscr() {
        let inputs = financed_deal();
        let metrics = compute_metrics(&inputs).unwrap();
        let extra = supplementary_metrics(&inputs, &metrics);

        let expected = metrics.net_operating_income / metrics.principal_and_interest;
        let dscr = extra.debt_service_coverage.value().unwrap();
        assert!((dscr - expected).abs() < dec!(0.0000001));
        assert!(dscr < Decimal::ONE);
    }

    #[test]
    fn test_house_hack_offset() {
        let inputs = financed_deal();
        let metrics = compute_metrics(&inputs).unwrap();
        let extra = supplementary_metrics(&inputs, &metrics);

        assert_eq!(
            extra.net_housing_cost,
            metrics.monthly_piti - dec!(2850)
        );
        let offset = extra.housing_cost_offset_percent.value().unwrap();
        assert!(offset > dec!(90) && offset < dec!(95));
    }

    #[test]
    fn test_break_even_occupancy() {
        let inputs = financed_deal();
        let metrics = compute_metrics(&inputs).unwrap();
        let extra = supplementary_metrics(&inputs, &metrics);

        let expected = (metrics.operating_expenses + metrics.principal_and_interest)
            / dec!(3000)
            * dec!(100);
        assert_eq!(extra.break_even_occupancy_percent.value(), Some(expected));
    }

    #[test]
    fn test_undefined_ratios_on_empty_deal() {
        let inputs = DealInputs::default();
        let extra = supplementary_metrics(&inputs, &compute_metrics(&inputs).unwrap());

        assert!(extra.loan_to_value_percent.is_undefined());
        assert!(extra.gross_rent_multiplier.is_undefined());
        assert!(extra.debt_service_coverage.is_undefined());
        assert!(extra.rent_to_price_percent.is_undefined());
        assert!(extra.break_even_occupancy_percent.is_undefined());
        assert!(extra.housing_cost_offset_percent.is_undefined());
        assert_eq!(extra.net_housing_cost, Decimal::ZERO);
        assert_eq!(extra.to_flat_map().len(), 7);
    }
}
