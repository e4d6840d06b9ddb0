//! Orchestration - the function-calling turn loop
//!
//! An [`Orchestrator`] resolves one user turn: it sends the transcript and
//! the tool catalogue to the completion provider, runs the single tool the
//! model asks for, folds the result back into the transcript and repeats
//! until the model answers.
//!
//! Every turn is bounded by [`RuntimeConfig::max_tool_calls`], each provider
//! exchange and tool call has a deadline, and a
//! [`CancellationToken`](tokio_util::sync::CancellationToken) can stop the
//! turn at any suspension point.

pub mod conversation;
pub mod error;
pub mod runtime;
pub mod tools;

// Re-export main types
pub use conversation::Conversation;
pub use error::{OrchestrationError, OrchestrationResult};
pub use runtime::{Orchestrator, RuntimeConfig, TurnOutcome, TurnSettings, TurnState};
pub use tools::{ToolCoordinator, ToolExecutionResult};
