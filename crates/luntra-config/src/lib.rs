//! Luntra Configuration Layer
//!
//! This crate provides configuration management for the Luntra deal
//! calculator: named presets of default assumptions, deal files that
//! override any subset of the inputs, and the CLI settings file.
//!
//! # Features
//!
//! - **Presets**: Built-in `HOUSE_HACK` and `WHOLE_UNIT` defaults plus custom presets
//! - **Deal Files**: TOML or JSON, resolved onto a preset and validated
//! - **CLI Settings**: Default output format, precision, colors, telemetry sink
//!
//! # Example
//!
//! ```rust
//! use luntra_config::{DealFile, PresetRegistry};
//! use luntra_core::ModelType;
//! use rust_decimal_macros::dec;
//!
//! let registry = PresetRegistry::new();
//!
//! let file = DealFile::from_toml_str(r#"
//!     preset = "house-hack"
//!
//!     [deal]
//!     purchase_price = 420000
//!     monthly_rent = 2100
//! "#).unwrap();
//!
//! let inputs = file.resolve(&registry).unwrap();
//! assert_eq!(inputs.model_type, ModelType::HouseHack);
//! assert_eq!(inputs.purchase_price, dec!(420000));
//! assert_eq!(inputs.loan_term_years, 30);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod deal_file;
mod error;
mod preset;
mod registry;
mod settings;

pub use deal_file::{DealFile, DealOverrides};
pub use error::{ConfigError, ConfigResult};
pub use preset::DealPreset;
pub use registry::PresetRegistry;
pub use settings::{CliSettings, MAX_PRECISION, OUTPUT_FORMATS};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::deal_file::{DealFile, DealOverrides};
    pub use crate::error::{ConfigError, ConfigResult};
    pub use crate::preset::DealPreset;
    pub use crate::registry::PresetRegistry;
    pub use crate::settings::CliSettings;
}
