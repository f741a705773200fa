//! # Luntra Analytics
//!
//! Deal metrics engine for real-estate investments.
//!
//! This crate holds all calculation logic of the Luntra library:
//! - **Financing**: Fixed-rate loan payment and amortization schedules
//! - **Income**: Effective gross income and operating expense breakdown
//! - **Metrics**: PITI, NOI, cash flow, cap rate, cash-on-cash, 1% rule
//! - **Ratios**: LTV, DSCR, GRM, break-even occupancy, housing offset
//! - **Telemetry**: Structured event records for analytics sinks
//! - **Report**: Plain-text deal report
//!
//! Every calculation is a pure function of [`DealInputs`]: no I/O, no hidden
//! state, and identical inputs always give identical outputs.
//!
//! ## Usage
//!
//! ```rust
//! use luntra_analytics::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let inputs = DealInputs::builder()
//!     .purchase_price(dec!(500000))
//!     .down_payment_percent(dec!(20))
//!     .interest_rate_percent(dec!(6))
//!     .monthly_rent(dec!(3000))
//!     .build()
//!     .unwrap();
//!
//! let metrics = compute_metrics(&inputs).unwrap();
//! assert_eq!(metrics.loan_amount, dec!(400000));
//! assert!(!metrics.one_percent_rule_pass);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod analysis;
pub mod financing;
pub mod income;
pub mod metrics;
pub mod ratios;
pub mod report;
pub mod telemetry;

pub use luntra_core::{DealInputs, LuntraError, LuntraResult, Ratio};

pub use analysis::{analyze, DealAnalysis};
pub use financing::{monthly_payment, AmortizationRow, AmortizationSchedule, YearlySummary};
pub use income::{effective_gross_income, OperatingExpenses};
pub use metrics::{compute_metrics, DealMetrics};
pub use ratios::{supplementary_metrics, SupplementaryMetrics};
pub use report::DealReport;
pub use telemetry::{EventKind, TelemetryEvent};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use luntra_core::prelude::*;

    pub use crate::analysis::{analyze, DealAnalysis};
    pub use crate::financing::{monthly_payment, AmortizationSchedule};
    pub use crate::income::{effective_gross_income, OperatingExpenses};
    pub use crate::metrics::{compute_metrics, DealMetrics};
    pub use crate::ratios::{supplementary_metrics, SupplementaryMetrics};
    pub use crate::report::DealReport;
    pub use crate::telemetry::{EventKind, TelemetryEvent};
}
