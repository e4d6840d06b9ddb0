//! Tool invocation coordination

use serde::Serialize;

/// Tool execution result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolExecutionResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Raw JSON arguments as sent by the model
    pub arguments: String,
    /// Content folded into the transcript
    pub content: String,
    /// Whether tool execution succeeded
    pub success: bool,
}

/// Tool coordinator
///
/// Tracks the tool dispatches of one turn. Its count drives the per-turn
/// tool call bound.
#[derive(Debug, Default)]
pub struct ToolCoordinator {
    execution_history: Vec<ToolExecutionResult>,
}

impl ToolCoordinator {
    /// Create a new tool coordinator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tool invocation
    pub fn record_invocation(&mut self, result: ToolExecutionResult) {
        self.execution_history.push(result);
    }

    /// Get total number of tool invocations
    pub fn invocation_count(&self) -> u32 {
        self.execution_history.len() as u32
    }

    /// Whether another dispatch would exceed `limit`
    pub fn limit_reached(&self, limit: u32) -> bool {
        self.invocation_count() >= limit
    }

    /// Get execution history
    pub fn execution_history(&self) -> &[ToolExecutionResult] {
        &self.execution_history
    }

    /// Get failed executions
    pub fn failed_executions(&self) -> Vec<&ToolExecutionResult> {
        self.execution_history
            .iter()
            .filter(|r| !r.success)
            .collect()
    }

    /// Consume the coordinator, returning the history
    pub fn into_history(self) -> Vec<ToolExecutionResult> {
        self.execution_history
    }
}
