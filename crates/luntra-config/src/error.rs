//! Configuration error types.

use std::path::PathBuf;

use luntra_core::{LuntraError, ValidationError};
use thiserror::Error;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Preset or setting not found.
    #[error("Configuration not found: {key}")]
    NotFound {
        /// The key that was not found.
        key: String,
    },

    /// Validation error.
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("Multiple validation errors: {}", join(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Built-in presets cannot be replaced or removed.
    #[error("Configuration '{key}' is read-only")]
    ReadOnly {
        /// The read-only key.
        key: String,
    },

    /// File could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File contents could not be parsed.
    #[error("Failed to parse {}: {message}", path.display())]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// File extension is not one we read.
    #[error("Unsupported file format: {} (expected .toml or .json)", path.display())]
    UnsupportedFormat {
        /// File involved.
        path: PathBuf,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A computation on resolved inputs failed.
    #[error(transparent)]
    Core(LuntraError),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConfigError {
    /// Creates a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a parse error for a file.
    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Returns true if the error names the given field.
    pub fn names_field(&self, field: &str) -> bool {
        match self {
            Self::Validation { field: f, .. } => f == field,
            Self::MultipleValidationErrors(errors) => errors.iter().any(|e| e.field == field),
            Self::Core(err) => err.names_field(field),
            _ => false,
        }
    }
}

impl From<LuntraError> for ConfigError {
    fn from(err: LuntraError) -> Self {
        match err {
            LuntraError::InvalidInput(e) => Self::Validation {
                field: e.field,
                message: e.message,
            },
            LuntraError::MultipleInvalidInputs(errors) => Self::MultipleValidationErrors(errors),
            other => Self::Core(other),
        }
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_core_error() {
        let err: ConfigError = LuntraError::invalid_input("monthly_rent", "must not be negative").into();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert!(err.names_field("monthly_rent"));

        let err: ConfigError = LuntraError::MultipleInvalidInputs(vec![
            ValidationError::new("a", "bad"),
            ValidationError::new("b", "bad"),
        ])
        .into();
        assert!(err.names_field("b"));
        assert_eq!(err.to_string(), "Multiple validation errors: a: bad; b: bad");

        let err: ConfigError = LuntraError::math_error("overflow").into();
        assert!(matches!(err, ConfigError::Core(_)));
        assert!(!err.names_field("a"));
    }

    #[test]
    fn test_display() {
        let err = ConfigError::UnsupportedFormat {
            path: PathBuf::from("deal.yaml"),
        };
        assert!(err.to_string().contains("deal.yaml"));

        let err = ConfigError::ReadOnly {
            key: "HOUSE_HACK".into(),
        };
        assert_eq!(err.to_string(), "Configuration 'HOUSE_HACK' is read-only");
    }
}
