//! Loan financing calculations.
//!
//! Provides:
//! - Level monthly payment (principal and interest) for a fixed-rate loan
//! - Month-by-month amortization schedule with yearly roll-ups

mod schedule;

pub use schedule::{AmortizationRow, AmortizationSchedule, YearlySummary};

use luntra_core::{LuntraError, LuntraResult};
use rust_decimal::{Decimal, MathematicalOps};

/// Calculate the level monthly payment (principal and interest) of a fixed-rate loan.
///
/// # Formula
///
/// ```text
/// P&I = L × r × (1 + r)^n / ((1 + r)^n − 1)
/// ```
///
/// With a zero rate the loan is repaid in equal instalments, `L / n`.
///
/// # Arguments
///
/// * `principal` - Loan amount
/// * `monthly_rate` - Monthly interest rate as a fraction (e.g., 0.005 for 6% p.a.)
/// * `payments` - Number of monthly payments
///
/// # Example
///
/// ```rust
/// use luntra_analytics::financing::monthly_payment;
/// use rust_decimal_macros::dec;
///
/// let pi = monthly_payment(dec!(400000), dec!(0.005), 360).unwrap();
/// assert_eq!(pi.round_dp(2), dec!(2398.20));
/// ```
pub fn monthly_payment(principal: Decimal, monthly_rate: Decimal, payments: u32) -> LuntraResult<Decimal> {
    if payments == 0 {
        return Err(LuntraError::invalid_input(
            "loan_term_years",
            "must be positive",
        ));
    }

    if principal.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let n = Decimal::from(payments);
    if monthly_rate.is_zero() {
        return Ok(principal / n);
    }

    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi(i64::from(payments))
        .ok_or_else(|| LuntraError::math_error("loan growth factor overflow"))?;

    // Annuity factor first so the principal multiplies a value below one.
    let factor = (monthly_rate * growth)
        .checked_div(growth - Decimal::ONE)
        .ok_or_else(|| LuntraError::math_error("degenerate annuity factor"))?;

    principal
        .checked_mul(factor)
        .ok_or_else(|| LuntraError::math_error("payment overflow"))
}
