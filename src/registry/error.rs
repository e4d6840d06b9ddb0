//! Error types for the tool registry and tool handlers.

use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A tool with the same name is already registered.
    #[error("Tool '{name}' is already registered")]
    Conflict {
        /// Name of the conflicting tool.
        name: String,
    },

    /// The tool name is invalid (empty or contains invalid characters).
    #[error("Invalid tool name '{0}': must be non-empty and contain only alphanumeric characters, underscores, or hyphens")]
    InvalidName(String),

    /// The parameter schema cannot be advertised to the provider.
    #[error("Invalid parameter schema for tool '{name}': {reason}")]
    InvalidSchema {
        /// Name of the tool.
        name: String,
        /// Why the schema was rejected.
        reason: String,
    },

    /// The requested tool was not found.
    #[error("Tool '{0}' not found")]
    NotFound(String),

    /// The handler for a tool could not be constructed.
    #[error("Handler for tool '{name}' unavailable: {reason}")]
    HandlerUnavailable {
        /// Name of the tool.
        name: String,
        /// Why construction failed.
        reason: String,
    },
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Failure reported by a tool handler.
///
/// The orchestrator folds these into the transcript instead of aborting the
/// turn, so the messages are written for the model to read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// The arguments were well-formed JSON but unusable by the tool.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// A collaborator could not be reached.
    #[error("request failed: {0}")]
    Request(String),

    /// A collaborator answered with something the tool cannot use.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Any other failure inside the tool.
    #[error("{0}")]
    Failed(String),
}

/// Result type for tool handlers.
pub type ToolResult<T> = Result<T, ToolError>;
