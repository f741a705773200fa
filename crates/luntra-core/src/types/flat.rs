//! Flat key-value representation for telemetry and report sinks.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A flat, ordered key-value mapping.
pub type FlatMap = BTreeMap<String, FlatValue>;

/// A scalar value in a flat export.
///
/// Serializes untagged: numbers as JSON numbers, `Undefined` as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    /// A numeric value.
    Number(Decimal),
    /// A whole number (counts, terms).
    Integer(i64),
    /// A boolean flag.
    Bool(bool),
    /// Free text.
    Text(String),
    /// A ratio with no defined value.
    Undefined,
}

impl FlatValue {
    /// Returns the numeric value, if any.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Integer(i) => Some(Decimal::from(*i)),
            _ => None,
        }
    }

    /// Returns true for the undefined marker.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl From<Decimal> for FlatValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FlatValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u32> for FlatValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for FlatValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FlatValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{}", v.normalize()),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
            Self::Undefined => f.write_str("N/A"),
        }
    }
}
