//! Percentage type for deal inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// A percentage on a 0-100 scale (e.g., 20 for 20%).
///
/// The value is not range-checked on construction; [`Percent::check`] is used
/// by input validation so that every out-of-range field can be reported at once.
///
/// # Example
///
/// ```rust
/// use luntra_core::types::Percent;
/// use rust_decimal_macros::dec;
///
/// let down = Percent::new(dec!(20));
/// assert_eq!(down.as_fraction(), dec!(0.20));
/// assert_eq!(down.of(dec!(500000)), dec!(100000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    /// Zero percent.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(Decimal::ONE_HUNDRED);

    /// Creates a percentage from a 0-100 scale value.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Creates a percentage from a fraction (0.2 = 20%).
    #[must_use]
    pub fn from_fraction(fraction: Decimal) -> Self {
        Self(fraction * Decimal::ONE_HUNDRED)
    }

    /// Returns the value on the 0-100 scale.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the value as a fraction (percentage / 100).
    #[must_use]
    pub fn as_fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Applies this percentage to an amount.
    #[must_use]
    pub fn of(&self, amount: Decimal) -> Decimal {
        amount * self.0 / Decimal::ONE_HUNDRED
    }

    /// Returns true if the value lies within [0, 100].
    #[must_use]
    pub fn in_range(&self) -> bool {
        self.0 >= Decimal::ZERO && self.0 <= Decimal::ONE_HUNDRED
    }

    /// Checks the range and names `field` on failure.
    pub fn check(&self, field: &str) -> Result<(), ValidationError> {
        if self.in_range() {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                format!("must be between 0 and 100, got {}", self.0),
            ))
        }
    }
}

impl From<Decimal> for Percent {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fraction_round_trip() {
        let pct = Percent::from_fraction(dec!(0.065));
        assert_eq!(pct.value(), dec!(6.5));
        assert_eq!(pct.as_fraction(), dec!(0.065));
    }

    #[test]
    fn test_range_check() {
        assert!(Percent::ZERO.check("vacancy_percent").is_ok());
        assert!(Percent::HUNDRED.check("vacancy_percent").is_ok());

        let err = Percent::new(dec!(100.01))
            .check("vacancy_percent")
            .unwrap_err();
        assert_eq!(err.field, "vacancy_percent");

        assert!(Percent::new(dec!(-1)).check("capex_percent").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Percent::new(dec!(6.50)).to_string(), "6.5%");
        assert_eq!(Percent::new(dec!(20)).to_string(), "20%");
    }
}
