//! Amortization schedules for level-payment loans.

use luntra_core::inputs::{MAX_AMOUNT, MAX_LOAN_TERM_YEARS};
use luntra_core::{DealInputs, LuntraError, LuntraResult, Percent, Validate, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::monthly_payment;

/// A single month in an amortization schedule.
///
/// Amounts are rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Payment number, starting at 1.
    pub period: u32,
    /// Total payment (interest + principal).
    pub payment: Decimal,
    /// Interest portion.
    pub interest: Decimal,
    /// Principal portion.
    pub principal: Decimal,
    /// Balance after this payment.
    pub remaining_balance: Decimal,
}

impl AmortizationRow {
    /// Loan year this payment falls in, starting at 1.
    #[must_use]
    pub fn year(&self) -> u32 {
        (self.period - 1) / 12 + 1
    }
}

/// Yearly roll-up of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlySummary {
    /// Loan year, starting at 1.
    pub year: u32,
    /// Sum of payments in the year.
    pub total_payment: Decimal,
    /// Sum of interest in the year.
    pub total_interest: Decimal,
    /// Sum of principal in the year.
    pub total_principal: Decimal,
    /// Balance at the end of the year.
    pub ending_balance: Decimal,
}

/// Amortization schedule of a fixed-rate, level-payment loan.
///
/// The scheduled payment is rounded to cents; the final payment absorbs the
/// rounding so the loan is repaid exactly.
///
/// # Example
///
/// ```
/// use luntra_analytics::financing::AmortizationSchedule;
/// use rust_decimal_macros::dec;
///
/// let schedule = AmortizationSchedule::generate(dec!(400000), dec!(6), 30).unwrap();
///
/// assert_eq!(schedule.rows.len(), 360);
/// assert_eq!(schedule.total_principal(), dec!(400000));
/// assert_eq!(schedule.rows.last().unwrap().remaining_balance, dec!(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// Original loan amount.
    pub loan_amount: Decimal,
    /// Annual interest rate on a 0-100 scale.
    pub annual_rate_percent: Decimal,
    /// Loan term in years.
    pub term_years: u32,
    /// Scheduled monthly payment, rounded to cents.
    pub scheduled_payment: Decimal,
    /// Monthly rows.
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    /// Generates the schedule for a loan.
    ///
    /// # Arguments
    ///
    /// * `loan_amount` - Amount borrowed
    /// * `annual_rate_percent` - Annual rate (e.g., 6.0 for 6%)
    /// * `term_years` - Loan term in years
    ///
    /// # Errors
    ///
    /// Returns [`LuntraError::InvalidInput`] naming the field when the loan is
    /// negative, the rate lies outside 0-100 or the term outside 1-50 years.
    pub fn generate(
        loan_amount: Decimal,
        annual_rate_percent: Decimal,
        term_years: u32,
    ) -> LuntraResult<Self> {
        let errors = check_loan(loan_amount, annual_rate_percent, term_years);
        if !errors.is_empty() {
            return Err(LuntraError::from(errors));
        }

        let payments = term_years * 12;
        let monthly_rate = annual_rate_percent / Decimal::ONE_HUNDRED / Decimal::from(12);
        let scheduled_payment = monthly_payment(loan_amount, monthly_rate, payments)?.round_dp(2);

        let mut rows = Vec::with_capacity(payments as usize);
        let mut balance = loan_amount.round_dp(2);

        for period in 1..=payments {
            if balance.is_zero() {
                break;
            }

            let interest = (balance * monthly_rate).round_dp(2);
            let mut principal = scheduled_payment - interest;
            if period == payments || principal > balance {
                principal = balance;
            }
            balance -= principal;

            rows.push(AmortizationRow {
                period,
                payment: interest + principal,
                interest,
                principal,
                remaining_balance: balance,
            });
        }

        log::debug!(
            "amortization schedule: {} rows, payment {}",
            rows.len(),
            scheduled_payment
        );

        Ok(Self {
            loan_amount,
            annual_rate_percent,
            term_years,
            scheduled_payment,
            rows,
        })
    }

    /// Generates the schedule for the loan described by deal inputs.
    ///
    /// The inputs are validated first, as in `compute_metrics`.
    pub fn for_deal(inputs: &DealInputs) -> LuntraResult<Self> {
        inputs.validate_or_error()?;
        Self::generate(
            inputs.loan_amount(),
            inputs.interest_rate_percent.value(),
            inputs.loan_term_years,
        )
    }

    /// Total interest paid over the life of the loan.
    #[must_use]
    pub fn total_interest(&self) -> Decimal {
        self.rows.iter().map(|r| r.interest).sum()
    }

    /// Total principal repaid.
    #[must_use]
    pub fn total_principal(&self) -> Decimal {
        self.rows.iter().map(|r| r.principal).sum()
    }

    /// Total of all payments.
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.rows.iter().map(|r| r.payment).sum()
    }

    /// Balance remaining after `period` payments.
    #[must_use]
    pub fn balance_after(&self, period: u32) -> Decimal {
        if period == 0 {
            return self.loan_amount.round_dp(2);
        }
        self.rows
            .iter()
            .take_while(|r| r.period <= period)
            .last()
            .map_or(self.loan_amount.round_dp(2), |r| r.remaining_balance)
    }

    /// Rolls the monthly rows up into loan years.
    #[must_use]
    pub fn yearly_summary(&self) -> Vec<YearlySummary> {
        let mut years: Vec<YearlySummary> = Vec::with_capacity(self.term_years as usize);

        for row in &self.rows {
            let year = row.year();
            match years.last_mut() {
                Some(summary) if summary.year == year => {
                    summary.total_payment += row.payment;
                    summary.total_interest += row.interest;
                    summary.total_principal += row.principal;
                    summary.ending_balance = row.remaining_balance;
                }
                _ => years.push(YearlySummary {
                    year,
                    total_payment: row.payment,
                    total_interest: row.interest,
                    total_principal: row.principal,
                    ending_balance: row.remaining_balance,
                }),
            }
        }

        years
    }
}

fn check_loan(
    loan_amount: Decimal,
    annual_rate_percent: Decimal,
    term_years: u32,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if loan_amount < Decimal::ZERO {
        errors.push(ValidationError::new(
            "loan_amount",
            format!("must not be negative, got {loan_amount}"),
        ));
    } else if loan_amount > MAX_AMOUNT {
        errors.push(ValidationError::new(
            "loan_amount",
            format!("must be at most {MAX_AMOUNT}, got {loan_amount}"),
        ));
    }

    if let Err(e) = Percent::new(annual_rate_percent).check("interest_rate_percent") {
        errors.push(e);
    }

    if !(1..=MAX_LOAN_TERM_YEARS).contains(&term_years) {
        errors.push(ValidationError::new(
            "loan_term_years",
            format!("must be between 1 and {MAX_LOAN_TERM_YEARS}, got {term_years}"),
        ));
    }

    errors
}
