//! Error types for completion providers.

use std::time::Duration;
use thiserror::Error;

/// Errors that fail a single completion exchange.
///
/// None of these are retried by the provider; the orchestrator surfaces them
/// to the caller of the turn.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Structured error reported by the provider (`{"error": {...}}`).
    #[error("Provider error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable message
        message: String,
        /// Provider error type, e.g. `invalid_request_error`
        error_type: Option<String>,
        /// Offending request parameter, if reported
        param: Option<String>,
        /// Provider error code, if reported
        code: Option<String>,
    },

    /// Network failure or a non-success response without a structured error.
    #[error("Transport error: {detail}")]
    Transport {
        /// What went wrong
        detail: String,
    },

    /// The exchange did not finish before its deadline.
    #[error("Completion request timed out after {0:?}")]
    Timeout(Duration),

    /// A success response that could not be interpreted.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Provider settings that cannot produce a valid request.
    #[error("Invalid provider configuration: {0}")]
    Configuration(String),
}

impl ProviderError {
    /// Build a transport error from any displayable cause.
    pub fn transport(detail: impl std::fmt::Display) -> Self {
        ProviderError::Transport {
            detail: detail.to_string(),
        }
    }

    /// Whether this error was reported by the provider itself.
    pub fn is_api_error(&self) -> bool {
        matches!(self, ProviderError::Api { .. })
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
