//! Investment strategy being modelled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// The investment model a deal is analysed under.
///
/// Both models share the same formulas. The model only selects default
/// inputs and the narrative shown alongside the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelType {
    /// Owner-occupied: the buyer lives in one unit and rents the rest.
    #[serde(rename = "House-Hack", alias = "house-hack", alias = "HouseHack")]
    HouseHack,
    /// Traditional rental: the whole property is let.
    #[default]
    #[serde(
        rename = "Whole-Unit",
        alias = "whole-unit",
        alias = "Whole Unit",
        alias = "WholeUnit"
    )]
    WholeUnit,
}

impl ModelType {
    /// Returns the display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HouseHack => "House-Hack",
            Self::WholeUnit => "Whole-Unit",
        }
    }

    /// Short description of the strategy.
    pub fn narrative(&self) -> &'static str {
        match self {
            Self::HouseHack => {
                "Owner-occupied investment property: rent from the other units offsets your housing payment."
            }
            Self::WholeUnit => {
                "Traditional rental property: the whole unit is let and must carry its own costs."
            }
        }
    }

    /// All model types.
    pub fn all() -> &'static [Self] {
        &[Self::HouseHack, Self::WholeUnit]
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "househack" | "hh" => Ok(Self::HouseHack),
            "wholeunit" | "wu" => Ok(Self::WholeUnit),
            _ => Err(ValidationError::new(
                "model_type",
                format!("unknown model '{s}', expected House-Hack or Whole-Unit"),
            )),
        }
    }
}
