//! Ratio type with an explicit undefined state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::FlatValue;

/// A derived ratio whose denominator may be zero.
///
/// Cap rate on a zero-price deal or cash-on-cash return with no cash invested
/// have no meaningful value; they are [`Ratio::Undefined`] rather than NaN or
/// an error, so reports can show "N/A" explicitly.
///
/// Serializes as a number, or `null` when undefined.
///
/// # Example
///
/// ```rust
/// use luntra_core::types::Ratio;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(Ratio::divide(dec!(30000), dec!(500000)), Ratio::Defined(dec!(0.06)));
/// assert!(Ratio::divide(dec!(30000), dec!(0)).is_undefined());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<Decimal>", into = "Option<Decimal>")]
pub enum Ratio {
    /// The ratio has a value.
    Defined(Decimal),
    /// The denominator was zero.
    #[default]
    Undefined,
}

impl Ratio {
    /// Divides `numerator` by `denominator`, yielding `Undefined` for a zero denominator.
    #[must_use]
    pub fn divide(numerator: Decimal, denominator: Decimal) -> Self {
        if denominator.is_zero() {
            Self::Undefined
        } else {
            numerator
                .checked_div(denominator)
                .map_or(Self::Undefined, Self::Defined)
        }
    }

    /// Returns the value, if defined.
    #[must_use]
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Self::Defined(v) => Some(*v),
            Self::Undefined => None,
        }
    }

    /// Returns true if the ratio has a value.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Defined(_))
    }

    /// Returns true if the denominator was zero.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Applies `f` to the value, keeping `Undefined` as is.
    #[must_use]
    pub fn map(self, f: impl FnOnce(Decimal) -> Decimal) -> Self {
        match self {
            Self::Defined(v) => Self::Defined(f(v)),
            Self::Undefined => Self::Undefined,
        }
    }

    /// Scales a fraction to a 0-100 percentage.
    #[must_use]
    pub fn as_percent(self) -> Self {
        self.map(|v| v * Decimal::ONE_HUNDRED)
    }

    /// Rounds a defined value to `dp` decimal places.
    #[must_use]
    pub fn round_dp(self, dp: u32) -> Self {
        self.map(|v| v.round_dp(dp))
    }

    /// Returns the value or `default` when undefined.
    #[must_use]
    pub fn unwrap_or(self, default: Decimal) -> Decimal {
        self.value().unwrap_or(default)
    }

    /// Converts into a flat export value.
    #[must_use]
    pub fn to_flat(self) -> FlatValue {
        match self {
            Self::Defined(v) => FlatValue::Number(v),
            Self::Undefined => FlatValue::Undefined,
        }
    }
}

impl From<Option<Decimal>> for Ratio {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(Self::Undefined, Self::Defined)
    }
}

impl From<Ratio> for Option<Decimal> {
    fn from(ratio: Ratio) -> Self {
        ratio.value()
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(v) => match f.precision() {
                Some(p) => write!(f, "{:.*}", p, v),
                None => write!(f, "{}", v),
            },
            Self::Undefined => f.write_str("N/A"),
        }
    }
}
