//! Rental income and operating expenses.
//!
//! All figures are monthly.

use luntra_core::DealInputs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: u32 = 12;

/// Gross rent adjusted for vacancy.
///
/// ```text
/// EGI = rent × (1 − vacancy / 100)
/// ```
pub fn effective_gross_income(inputs: &DealInputs) -> Decimal {
    inputs.monthly_rent - inputs.vacancy_percent.of(inputs.monthly_rent)
}

/// Monthly rent lost to vacancy.
pub fn vacancy_loss(inputs: &DealInputs) -> Decimal {
    inputs.vacancy_percent.of(inputs.monthly_rent)
}

/// Monthly operating expenses, itemised.
///
/// Debt service is not an operating expense and is not included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingExpenses {
    /// Maintenance reserve (percentage of gross rent).
    pub maintenance: Decimal,
    /// Capital expenditure reserve (percentage of gross rent).
    pub capex: Decimal,
    /// Property management fee (percentage of gross rent).
    pub property_management: Decimal,
    /// Property tax, annual / 12.
    pub property_tax: Decimal,
    /// Insurance, annual / 12.
    pub insurance: Decimal,
    /// HOA dues.
    pub hoa: Decimal,
    /// Owner-paid utilities.
    pub utilities: Decimal,
}

impl OperatingExpenses {
    /// Itemises the monthly operating expenses of a deal.
    pub fn from_inputs(inputs: &DealInputs) -> Self {
        let rent = inputs.monthly_rent;
        let months = Decimal::from(MONTHS_PER_YEAR);

        Self {
            maintenance: inputs.maintenance_percent.of(rent),
            capex: inputs.capex_percent.of(rent),
            property_management: inputs.property_management_percent.of(rent),
            property_tax: inputs.annual_property_tax / months,
            insurance: inputs.annual_insurance / months,
            hoa: inputs.monthly_hoa,
            utilities: inputs.monthly_utilities,
        }
    }

    /// Expenses that scale with rent.
    pub fn rent_based(&self) -> Decimal {
        self.maintenance + self.capex + self.property_management
    }

    /// Taxes, insurance and HOA: the non-loan part of PITI.
    pub fn escrow(&self) -> Decimal {
        self.property_tax + self.insurance + self.hoa
    }

    /// Total monthly operating expenses.
    pub fn total(&self) -> Decimal {
        self.rent_based() + self.escrow() + self.utilities
    }

    /// Line items in display order.
    pub fn items(&self) -> [(&'static str, Decimal); 7] {
        [
            ("Maintenance", self.maintenance),
            ("CapEx", self.capex),
            ("Property Management", self.property_management),
            ("Property Tax", self.property_tax),
            ("Insurance", self.insurance),
            ("HOA", self.hoa),
            ("Utilities", self.utilities),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn inputs() -> DealInputs {
        DealInputs::builder()
            .monthly_rent(dec!(3000))
            .vacancy_percent(dec!(5))
            .maintenance_percent(dec!(5))
            .capex_percent(dec!(5))
            .property_management_percent(dec!(8))
            .annual_property_tax(dec!(6000))
            .annual_insurance(dec!(1800))
            .monthly_hoa(dec!(50))
            .monthly_utilities(dec!(120))
            .build()
            .unwrap()
    }

    #[test]
    fn test_egi() {
        let inputs = inputs();
        assert_eq!(effective_gross_income(&inputs), dec!(2850));
        assert_eq!(vacancy_loss(&inputs), dec!(150));
    }

    #[test]
    fn test_expense_breakdown() {
        let opex = OperatingExpenses::from_inputs(&inputs());

        assert_eq!(opex.maintenance, dec!(150));
        assert_eq!(opex.capex, dec!(150));
        assert_eq!(opex.property_management, dec!(240));
        assert_eq!(opex.property_tax, dec!(500));
        assert_eq!(opex.insurance, dec!(150));
        assert_eq!(opex.escrow(), dec!(700));
        assert_eq!(opex.total(), dec!(1360));
    }

    #[test]
    fn test_items_sum_to_total() {
        let opex = OperatingExpenses::from_inputs(&inputs());
        let sum: Decimal = opex.items().iter().map(|(_, v)| *v).sum();
        assert_eq!(sum, opex.total());
    }

    #[test]
    fn test_zero_rent() {
        let inputs = DealInputs::builder()
            .vacancy_percent(dec!(10))
            .maintenance_percent(dec!(10))
            .annual_property_tax(dec!(1200))
            .build()
            .unwrap();

        assert_eq!(effective_gross_income(&inputs), Decimal::ZERO);
        assert_eq!(OperatingExpenses::from_inputs(&inputs).total(), dec!(100));
    }
}
