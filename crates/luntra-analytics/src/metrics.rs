//! Deal metrics calculator.
//!
//! [`compute_metrics`] maps validated [`DealInputs`] to [`DealMetrics`]. It is a
//! pure, single-pass function: no I/O, no state, and no ordering dependency
//! between fields.

use luntra_core::{DealInputs, FlatMap, FlatValue, LuntraResult, Ratio, Validate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::financing::monthly_payment;
use crate::income::{effective_gross_income, OperatingExpenses};

/// Share of the purchase price the monthly rent must reach to pass the 1% rule.
const ONE_PERCENT_RULE: Decimal = dec!(0.01);

/// Financial metrics derived from a deal's inputs.
///
/// Monetary values are monthly unless the field name says otherwise. Ratios are
/// fractions (0.05 = 5%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealMetrics {
    /// Cash paid up front towards the price.
    pub down_payment_amount: Decimal,
    /// Amount financed.
    pub loan_amount: Decimal,
    /// Level monthly loan payment.
    pub principal_and_interest: Decimal,
    /// Principal, interest, taxes, insurance and HOA.
    pub monthly_piti: Decimal,
    /// Rent after vacancy.
    pub effective_gross_income: Decimal,
    /// Operating expenses, excluding debt service.
    pub operating_expenses: Decimal,
    /// EGI minus operating expenses.
    pub net_operating_income: Decimal,
    /// NOI minus principal and interest.
    pub monthly_cash_flow: Decimal,
    /// Monthly cash flow × 12.
    pub annual_cash_flow: Decimal,
    /// Closing costs paid at purchase.
    pub closing_costs: Decimal,
    /// Down payment plus closing costs.
    pub total_cash_invested: Decimal,
    /// Annual NOI / purchase price.
    pub cap_rate: Ratio,
    /// Annual cash flow / total cash invested.
    pub cash_on_cash_return: Ratio,
    /// Monthly rent is at least 1% of the purchase price.
    pub one_percent_rule_pass: bool,
}

/// Compute the financial metrics of a deal.
///
/// Inputs are validated first; the error names every offending field.
/// Ratios with a zero denominator come back as [`Ratio::Undefined`].
///
/// # Formulas
///
/// ```text
/// loan      = price − price × down%
/// P&I       = loan × r(1+r)^n / ((1+r)^n − 1),   r = rate / 12,  n = years × 12
/// PITI      = P&I + tax/12 + insurance/12 + hoa
/// EGI       = rent × (1 − vacancy%)
/// OpEx      = rent × (maint% + capex% + mgmt%) + tax/12 + insurance/12 + hoa + utilities
/// NOI       = EGI − OpEx
/// cash flow = NOI − P&I
/// cap rate  = NOI × 12 / price
/// CoC       = cash flow × 12 / (down payment + closing costs)
/// ```
///
/// # Example
///
/// ```rust
/// use luntra_analytics::compute_metrics;
/// use luntra_core::DealInputs;
/// use rust_decimal_macros::dec;
///
/// let inputs = DealInputs::builder()
///     .purchase_price(dec!(200000))
///     .down_payment_percent(dec!(100))
///     .monthly_rent(dec!(2000))
///     .build()
///     .unwrap();
///
/// let metrics = compute_metrics(&inputs).unwrap();
/// assert_eq!(metrics.principal_and_interest, dec!(0));
/// assert!(metrics.one_percent_rule_pass);
/// ```
pub fn compute_metrics(inputs: &DealInputs) -> LuntraResult<DealMetrics> {
    inputs.validate_or_error()?;

    let price = inputs.purchase_price;
    let months = Decimal::from(12);

    let down_payment_amount = inputs.down_payment_amount();
    let loan_amount = inputs.loan_amount();

    let principal_and_interest = monthly_payment(
        loan_amount,
        inputs.monthly_interest_rate(),
        inputs.payment_count(),
    )?;

    let expenses = OperatingExpenses::from_inputs(inputs);
    let monthly_piti = principal_and_interest + expenses.escrow();

    let effective_gross_income = effective_gross_income(inputs);
    let operating_expenses = expenses.total();
    let net_operating_income = effective_gross_income - operating_expenses;

    let monthly_cash_flow = net_operating_income - principal_and_interest;
    let annual_cash_flow = monthly_cash_flow * months;

    let closing_costs = inputs.closing_cost_percent.of(price);
    let total_cash_invested = down_payment_amount + closing_costs;

    let cap_rate = Ratio::divide(net_operating_income * months, price);
    let cash_on_cash_return = Ratio::divide(annual_cash_flow, total_cash_invested);

    let one_percent_rule_pass = inputs.monthly_rent >= price * ONE_PERCENT_RULE;

    log::debug!(
        "computed metrics for {} deal: noi={}, cash_flow={}, cap_rate={}, coc={}",
        inputs.model_type,
        net_operating_income.round_dp(2),
        monthly_cash_flow.round_dp(2),
        cap_rate.round_dp(4),
        cash_on_cash_return.round_dp(4)
    );

    Ok(DealMetrics {
        down_payment_amount,
        loan_amount,
        principal_and_interest,
        monthly_piti,
        effective_gross_income,
        operating_expenses,
        net_operating_income,
        monthly_cash_flow,
        annual_cash_flow,
        closing_costs,
        total_cash_invested,
        cap_rate,
        cash_on_cash_return,
        one_percent_rule_pass,
    })
}

impl DealMetrics {
    /// Annual net operating income.
    pub fn annual_noi(&self) -> Decimal {
        self.net_operating_income * Decimal::from(12)
    }

    /// Annual principal and interest.
    pub fn annual_debt_service(&self) -> Decimal {
        self.principal_and_interest * Decimal::from(12)
    }

    /// Returns true when the deal is cash-flow positive.
    pub fn is_cash_flow_positive(&self) -> bool {
        self.monthly_cash_flow > Decimal::ZERO
    }

    /// Returns a copy with monetary values rounded to cents and ratios to `ratio_dp` places.
    #[must_use]
    pub fn rounded(&self, ratio_dp: u32) -> Self {
        Self {
            down_payment_amount: self.down_payment_amount.round_dp(2),
            loan_amount: self.loan_amount.round_dp(2),
            principal_and_interest: self.principal_and_interest.round_dp(2),
            monthly_piti: self.monthly_piti.round_dp(2),
            effective_gross_income: self.effective_gross_income.round_dp(2),
            operating_expenses: self.operating_expenses.round_dp(2),
            net_operating_income: self.net_operating_income.round_dp(2),
            monthly_cash_flow: self.monthly_cash_flow.round_dp(2),
            annual_cash_flow: self.annual_cash_flow.round_dp(2),
            closing_costs: self.closing_costs.round_dp(2),
            total_cash_invested: self.total_cash_invested.round_dp(2),
            cap_rate: self.cap_rate.round_dp(ratio_dp),
            cash_on_cash_return: self.cash_on_cash_return.round_dp(ratio_dp),
            one_percent_rule_pass: self.one_percent_rule_pass,
        }
    }

    /// Flattens the metrics into a key-value map.
    ///
    /// Every metric is always present; undefined ratios map to
    /// [`FlatValue::Undefined`].
    pub fn to_flat_map(&self) -> FlatMap {
        let entries: [(&str, FlatValue); 14] = [
            ("down_payment_amount", self.down_payment_amount.into()),
            ("loan_amount", self.loan_amount.into()),
            ("principal_and_interest", self.principal_and_interest.into()),
            ("monthly_piti", self.monthly_piti.into()),
            ("effective_gross_income", self.effective_gross_income.into()),
            ("operating_expenses", self.operating_expenses.into()),
            ("net_operating_income", self.net_operating_income.into()),
            ("monthly_cash_flow", self.monthly_cash_flow.into()),
            ("annual_cash_flow", self.annual_cash_flow.into()),
            ("closing_costs", self.closing_costs.into()),
            ("total_cash_invested", self.total_cash_invested.into()),
            ("cap_rate", self.cap_rate.to_flat()),
            ("cash_on_cash_return", self.cash_on_cash_return.to_flat()),
            ("one_percent_rule_pass", self.one_percent_rule_pass.into()),
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
    use luntra_core::{LuntraError, ModelType};

    fn reference_deal() -> DealInputs {
        DealInputs::builder()
            .purchase_price(dec!(500000))
            .down_payment_percent(dec!(20))
            .interest_rate_percent(dec!(6))
            .loan_term_years(30)
            .monthly_rent(dec!(3000))
            .annual_property_tax(dec!(6000))
            .annual_insurance(dec!(2000))
            .monthly_hoa(dec!(0))
            .vacancy_percent(dec!(5))
            .maintenance_percent(dec!(5))
            .capex_percent(dec!(5))
            .property_management_percent(dec!(8))
            .monthly_utilities(dec!(0))
            .closing_cost_percent(dec!(3))
            .build()
            .unwrap()
    }

    fn close(actual: Decimal, expected: Decimal, tol: Decimal) -> bool {
        (actual - expected).abs() <= tol
    }

    #[test]
    fn test_reference_scenario() {
        let m = compute_metrics(&reference_deal()).unwrap();

        assert_eq!(m.down_payment_amount, dec!(100000));
        assert_eq!(m.loan_amount, dec!(400000));
        assert!(close(m.principal_and_interest, dec!(2398.20), dec!(0.01)));
        assert!(close(m.monthly_piti, dec!(3064.87), dec!(0.01)));
        assert_eq!(m.effective_gross_income, dec!(2850));
        assert!(!m.one_percent_rule_pass);
    }

    #[test]
    fn test_reference_returns() {
        let m = compute_metrics(&reference_deal()).unwrap();

        // OpEx: 18% of 3000 + 500 tax + 166.67 insurance
        assert!(close(m.operating_expenses, dec!(1206.67), dec!(0.01)));
        assert!(close(m.net_operating_income, dec!(1643.33), dec!(0.01)));
        assert!(close(m.monthly_cash_flow, dec!(-754.87), dec!(0.01)));
        assert_eq!(m.closing_costs, dec!(15000));
        assert_eq!(m.total_cash_invested, dec!(115000));

        let cap = m.cap_rate.value().unwrap();
        assert!(close(cap, dec!(0.03944), dec!(0.00001)));

        let coc = m.cash_on_cash_return.value().unwrap();
        assert!(close(coc, dec!(-0.07877), dec!(0.00001)));
    }

    #[test]
    fn test_annual_is_twelve_months() {
        let m = compute_metrics(&reference_deal()).unwrap();
        assert_eq!(m.monthly_cash_flow * dec!(12), m.annual_cash_flow);
    }

    #[test]
    fn test_zero_rate_loan() {
        let mut inputs = reference_deal();
        inputs.interest_rate_percent = luntra_core::Percent::ZERO;

        let m = compute_metrics(&inputs).unwrap();
        assert_eq!(m.principal_and_interest, m.loan_amount / dec!(360));
    }

    #[test]
    fn test_full_cash_purchase() {
        let mut inputs = reference_deal();
        inputs.down_payment_percent = luntra_core::Percent::HUNDRED;

        let m = compute_metrics(&inputs).unwrap();
        assert_eq!(m.loan_amount, Decimal::ZERO);
        assert_eq!(m.principal_and_interest, Decimal::ZERO);
        assert_eq!(m.monthly_cash_flow, m.net_operating_income);
    }

    #[test]
    fn test_zero_down_payment() {
        let mut inputs = reference_deal();
        inputs.down_payment_percent = luntra_core::Percent::ZERO;

        let m = compute_metrics(&inputs).unwrap();
        assert_eq!(m.loan_amount, dec!(500000));
        assert_eq!(m.total_cash_invested, dec!(15000));
        assert!(m.cash_on_cash_return.is_defined());
    }

    #[test]
    fn test_zero_price_is_undefined_not_fault() {
        let inputs = DealInputs::builder()
            .monthly_rent(dec!(1500))
            .interest_rate_percent(dec!(6))
            .build()
            .unwrap();

        let m = compute_metrics(&inputs).unwrap();
        assert!(m.cap_rate.is_undefined());
        assert!(m.cash_on_cash_return.is_undefined());
        assert_eq!(m.loan_amount, Decimal::ZERO);
        assert!(m.one_percent_rule_pass);
    }

    #[test]
    fn test_zero_cash_invested() {
        let mut inputs = reference_deal();
        inputs.down_payment_percent = luntra_core::Percent::ZERO;
        inputs.closing_cost_percent = luntra_core::Percent::ZERO;

        let m = compute_metrics(&inputs).unwrap();
        assert_eq!(m.total_cash_invested, Decimal::ZERO);
        assert!(m.cash_on_cash_return.is_undefined());
        assert!(m.cap_rate.is_defined());
    }

    #[test]
    fn test_zero_rent() {
        let mut inputs = reference_deal();
        inputs.monthly_rent = Decimal::ZERO;

        let m = compute_metrics(&inputs).unwrap();
        assert_eq!(m.effective_gross_income, Decimal::ZERO);
        assert!(m.net_operating_income < Decimal::ZERO);
        assert!(!m.one_percent_rule_pass);
    }

    #[test]
    fn test_one_percent_rule_boundary() {
        let inputs = DealInputs::builder()
            .purchase_price(dec!(300000))
            .monthly_rent(dec!(3000))
            .build()
            .unwrap();
        assert!(compute_metrics(&inputs).unwrap().one_percent_rule_pass);

        let inputs = DealInputs::builder()
            .purchase_price(dec!(300000))
            .monthly_rent(dec!(2999.99))
            .build()
            .unwrap();
        assert!(!compute_metrics(&inputs).unwrap().one_percent_rule_pass);
    }

    #[test]
    fn test_model_type_does_not_change_formulas() {
        let whole = reference_deal();
        let mut hack = whole.clone();
        hack.model_type = ModelType::HouseHack;

        assert_eq!(
            compute_metrics(&whole).unwrap(),
            compute_metrics(&hack).unwrap()
        );
    }

    #[test]
    fn test_rejects_invalid_input() {
        let mut inputs = reference_deal();
        inputs.purchase_price = dec!(-1);
        inputs.loan_term_years = 0;

        let err = compute_metrics(&inputs).unwrap_err();
        assert!(matches!(err, LuntraError::MultipleInvalidInputs(_)));
        assert!(err.names_field("purchase_price"));
        assert!(err.names_field("loan_term_years"));
    }

    #[test]
    fn test_idempotent() {
        let inputs = reference_deal();
        let a = compute_metrics(&inputs).unwrap();
        let b = compute_metrics(&inputs).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_flat_map_keys() {
        let mut inputs = reference_deal();
        inputs.purchase_price = Decimal::ZERO;
        let map = compute_metrics(&inputs).unwrap().to_flat_map();

        assert_eq!(map.len(), 14);
        assert!(map["cap_rate"].is_undefined());
        assert_eq!(map["one_percent_rule_pass"], FlatValue::Bool(true));
    }

    #[test]
    fn test_rounded() {
        let m = compute_metrics(&reference_deal()).unwrap().rounded(4);
        assert_eq!(m.principal_and_interest, dec!(2398.20));
        assert_eq!(m.monthly_piti, dec!(3064.87));
        assert_eq!(m.cap_rate, Ratio::Defined(dec!(0.0394)));
    }
}
