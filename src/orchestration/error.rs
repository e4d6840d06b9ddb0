//! Errors that abort a conversation turn.

use thiserror::Error;

use crate::provider::ProviderError;
use crate::types::MessageError;

/// Reasons a turn ends without an answer.
///
/// Nothing is retried internally; the caller decides whether to run the turn
/// again. The transcript keeps every entry appended before the failure.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// The completion exchange failed or timed out.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Tool arguments were not valid JSON or did not match the schema.
    #[error("Malformed arguments for tool '{tool}': {reason}")]
    MalformedToolArguments {
        /// Requested tool
        tool: String,
        /// Parse or schema failure
        reason: String,
    },

    /// The model asked for a tool that is not registered.
    #[error("Model requested unknown tool '{0}'")]
    UnknownToolRequested(String),

    /// The model kept requesting tools past the per-turn bound.
    #[error("Tool call limit of {limit} per turn exceeded")]
    ToolCallLimitExceeded {
        /// Configured maximum number of dispatches
        limit: u32,
    },

    /// The caller cancelled the turn.
    #[error("Turn cancelled")]
    Cancelled,

    /// The transcript handed in breaks the entry invariants.
    #[error("Invalid transcript: {0}")]
    InvalidTranscript(#[from] MessageError),

    /// Model, temperature or token settings are unusable.
    #[error("Invalid turn settings: {0}")]
    InvalidSettings(String),

    /// The final transcript could not be serialized.
    #[error("Failed to serialize transcript: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OrchestrationError {
    /// Whether the error came from the completion provider.
    pub fn is_provider_error(&self) -> bool {
        matches!(self, OrchestrationError::Provider(_))
    }
}

/// Result type for orchestration operations.
pub type OrchestrationResult<T> = Result<T, OrchestrationError>;
