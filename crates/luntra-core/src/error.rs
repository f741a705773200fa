//! Error types for the Luntra library.
//!
//! Validation failures are reported per field. A ratio with a zero
//! denominator is not an error: see [`crate::types::Ratio`].

use thiserror::Error;

/// A specialized Result type for Luntra operations.
pub type LuntraResult<T> = Result<T, LuntraError>;

/// A single field-level validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Name of the offending input field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The main error type for Luntra operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LuntraError {
    /// An input field is outside its declared domain.
    #[error("Invalid input: {0}")]
    InvalidInput(ValidationError),

    /// More than one input field is outside its declared domain.
    #[error("Invalid input: {}", join_errors(.0))]
    MultipleInvalidInputs(Vec<ValidationError>),

    /// Arithmetic overflow or another numerical failure.
    #[error("Mathematical error: {reason}")]
    MathError {
        /// Description of the error.
        reason: String,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LuntraError {
    /// Creates an invalid input error for a single field.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput(ValidationError::new(field, message))
    }

    /// Creates a math error.
    #[must_use]
    pub fn math_error(reason: impl Into<String>) -> Self {
        Self::MathError {
            reason: reason.into(),
        }
    }

    /// Returns the validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> Vec<&ValidationError> {
        match self {
            Self::InvalidInput(err) => vec![err],
            Self::MultipleInvalidInputs(errs) => errs.iter().collect(),
            Self::MathError { .. } => Vec::new(),
        }
    }

    /// Returns true if the error names the given field.
    pub fn names_field(&self, field: &str) -> bool {
        self.validation_errors().iter().any(|e| e.field == field)
    }
}

impl From<Vec<ValidationError>> for LuntraError {
    fn from(mut errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            Self::InvalidInput(errors.remove(0))
        } else {
            Self::MultipleInvalidInputs(errors)
        }
    }
}

/// Trait for values validated at the boundary.
pub trait Validate {
    /// Validates the value.
    ///
    /// Returns every violation found, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the value is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error naming the offending field(s) if invalid.
    fn validate_or_error(&self) -> LuntraResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.into())
        }
    }
}
