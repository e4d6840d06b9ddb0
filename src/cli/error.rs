//! Error types for CLI operations

use thiserror::Error;

use crate::orchestration::OrchestrationError;
use crate::provider::ProviderError;
use crate::registry::RegistryError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur while running the assistant from the command line
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Provider could not be created
    #[error("Provider error: {0}")]
    ProviderError(#[from] ProviderError),

    /// Built-in tools could not be registered
    #[error("Tool registry error: {0}")]
    ToolError(#[from] RegistryError),

    /// A conversation turn failed
    #[error("{0}")]
    TurnError(#[from] OrchestrationError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerdeError(String),

    /// Invalid argument or input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// Conversions from common error types
impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::SerdeError(err.to_string())
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::ConfigError(format!("{:#}", err))
    }
}
