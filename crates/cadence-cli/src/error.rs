//! Error types for the CLI application.

use cadence_domain::MatrixError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SDK error
    #[error("{0}")]
    Sdk(#[from] cadence_sdk::SdkError),

    /// Edit against a source that is not in the matrix
    #[error("{0}")]
    Matrix(#[from] MatrixError),

    /// A source's profile could not be loaded
    #[error("Source '{id}' is unavailable: {reason}")]
    SourceUnavailable {
        /// Source clone ID
        id: String,
        /// Underlying failure
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),
}
