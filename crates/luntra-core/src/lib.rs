//! # Luntra Core
//!
//! Core types and validation for the Luntra real-estate deal analytics library.
//!
//! This crate provides the foundational building blocks used throughout Luntra:
//!
//! - **Inputs**: [`DealInputs`], the strongly-typed set of deal parameters
//! - **Types**: [`Percent`], [`Ratio`], [`ModelType`] and the flat [`FlatValue`]
//! - **Errors**: [`LuntraError`] and field-level [`ValidationError`]s
//!
//! ## Design Philosophy
//!
//! - **Validate once**: inputs are checked at the boundary and every violation
//!   names the offending field
//! - **No NaN**: ratios with a zero denominator are [`Ratio::Undefined`], never a
//!   floating-point sentinel
//! - **Exact money**: all amounts are `rust_decimal::Decimal`
//!
//! ## Example
//!
//! ```rust
//! use luntra_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let inputs = DealInputs::builder()
//!     .purchase_price(dec!(400000))
//!     .down_payment_percent(dec!(20))
//!     .monthly_rent(dec!(2800))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(inputs.model_type, ModelType::WholeUnit);
//! assert_eq!(inputs.loan_term_years, 30);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod inputs;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{LuntraError, LuntraResult, Validate, ValidationError};
    pub use crate::inputs::{DealInputs, DealInputsBuilder};
    pub use crate::types::{FlatMap, FlatValue, ModelType, Percent, Ratio};
}

// Re-export commonly used types at crate root
pub use error::{LuntraError, LuntraResult, Validate, ValidationError};
pub use inputs::{DealInputs, DealInputsBuilder};
pub use types::{FlatMap, FlatValue, ModelType, Percent, Ratio};
