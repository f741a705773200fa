//! Domain types for deal analytics.
//!
//! - [`Percent`]: A percentage expressed on a 0-100 scale
//! - [`Ratio`]: A derived ratio that may be undefined
//! - [`ModelType`]: The investment strategy being modelled
//! - [`FlatValue`]: A scalar in a flat key-value export

mod flat;
mod model;
mod percent;
mod ratio;

pub use flat::{FlatMap, FlatValue};
pub use model::ModelType;
pub use percent::Percent;
pub use ratio::Ratio;
