//! CLI error types.

use std::path::PathBuf;

use luntra_config::ConfigError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Deal inputs or presets could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
