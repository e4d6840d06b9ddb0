//! Orchestrator core - the function-calling turn loop

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::error::{OrchestrationError, OrchestrationResult};
use super::tools::{ToolCoordinator, ToolExecutionResult};
use crate::config::ExecutionConfig;
use crate::observability::Logger;
use crate::provider::{CompletionOutcome, CompletionProvider, CompletionRequest, ToolRequest};
use crate::registry::{RegisteredTool, ToolRegistry};
use crate::types::{GenerateConfig, Message, Role, ToolDescriptor, Transcript};

/// Orchestrator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Maximum tool dispatches per turn
    pub max_tool_calls: u32,
    /// Deadline for one completion exchange
    pub completion_timeout: Duration,
    /// Deadline for one tool invocation
    pub tool_timeout: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_tool_calls: 8,
            completion_timeout: Duration::from_secs(60),
            tool_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&ExecutionConfig> for RuntimeConfig {
    fn from(config: &ExecutionConfig) -> Self {
        Self {
            max_tool_calls: config.max_tool_calls,
            completion_timeout: Duration::from_secs(config.completion_timeout_seconds.max(1)),
            tool_timeout: Duration::from_secs(config.tool_timeout_seconds.max(1)),
        }
    }
}

/// Per-turn request settings
#[derive(Debug, Clone)]
pub struct TurnSettings {
    /// Identifier used in logs
    pub conversation_id: String,
    /// System prompt prepended to every request
    pub system_prompt: String,
    /// Model, temperature, token limit and optional key
    pub generate: GenerateConfig,
}

impl TurnSettings {
    /// Create settings with a fresh conversation id
    pub fn new(system_prompt: impl Into<String>, generate: GenerateConfig) -> Self {
        Self {
            conversation_id: uuid::Uuid::new_v4().to_string(),
            system_prompt: system_prompt.into(),
            generate,
        }
    }

    /// Use an existing conversation id
    pub fn with_conversation_id(mut self, id: impl Into<String>) -> Self {
        self.conversation_id = id.into();
        self
    }
}

/// Loop state of one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    /// Waiting for the next completion
    AwaitingCompletion,
    /// Running the tool the model asked for
    Dispatching(ToolRequest),
    /// The model answered
    Terminated(String),
}

/// Result of a successful turn
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Final answer text
    pub answer: String,
    /// Final transcript serialized as a JSON array
    pub transcript_json: String,
    /// Tool dispatches in order
    pub tool_calls: Vec<ToolExecutionResult>,
}

/// Drives one conversation turn to a final answer.
///
/// Each turn alternates between a completion exchange and at most one tool
/// dispatch until the model answers in plain text. The orchestrator holds
/// no per-conversation state; the transcript is borrowed mutably for the
/// duration of the turn, so one orchestrator can serve many conversations
/// concurrently.
pub struct Orchestrator {
    provider: Arc<dyn CompletionProvider>,
    registry: Arc<ToolRegistry>,
    config: RuntimeConfig,
    logger: Option<Arc<Logger>>,
}

impl Orchestrator {
    /// Create a new orchestrator
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        registry: Arc<ToolRegistry>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            provider,
            registry,
            config,
            logger: None,
        }
    }

    /// Mirror turns into a markdown session log
    pub fn with_logger(mut self, logger: Arc<Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Get the runtime configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Get the tool registry
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Resolve one turn.
    ///
    /// `transcript` must already end with the user's message. On success it
    /// ends with the assistant's answer; on failure it keeps every entry
    /// appended before the error.
    pub async fn run_turn(
        &self,
        transcript: &mut Transcript,
        settings: &TurnSettings,
        cancel: &CancellationToken,
    ) -> OrchestrationResult<TurnOutcome> {
        transcript.validate()?;
        settings
            .generate
            .validate()
            .map_err(OrchestrationError::InvalidSettings)?;

        let user_text = transcript
            .last()
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        self.log(|l| l.log_turn_start(&settings.conversation_id, user_text));

        let descriptors = self.registry.list_descriptors();
        let mut coordinator = ToolCoordinator::new();
        let mut state = TurnState::AwaitingCompletion;

        let result = loop {
            debug!(conversation = %settings.conversation_id, state = ?state, "turn state");

            state = match state {
                TurnState::AwaitingCompletion => {
                    match self.complete(transcript, settings, &descriptors, cancel).await {
                        Ok(CompletionOutcome::Answer(text)) => TurnState::Terminated(text),
                        Ok(CompletionOutcome::ToolRequest(request)) => TurnState::Dispatching(request),
                        Err(e) => break Err(e),
                    }
                }
                TurnState::Dispatching(request) => {
                    transcript.push(request.to_message());
                    match self.dispatch(&request, &mut coordinator, cancel).await {
                        Ok(content) => {
                            transcript.push(Message::function_result(request.name(), content));
                            TurnState::AwaitingCompletion
                        }
                        Err(e) => break Err(e),
                    }
                }
                TurnState::Terminated(answer) => {
                    transcript.push(Message::assistant_answer(answer.clone()));
                    break Ok(answer);
                }
            };
        };

        match result {
            Ok(answer) => {
                let transcript_json = transcript.to_json()?;
                let tool_calls = coordinator.into_history();
                info!(
                    conversation = %settings.conversation_id,
                    tool_calls = tool_calls.len(),
                    "turn completed"
                );
                self.log(|l| l.log_answer(&answer, tool_calls.len()));
                Ok(TurnOutcome {
                    answer,
                    transcript_json,
                    tool_calls,
                })
            }
            Err(e) => {
                self.log(|l| l.log_error(&e.to_string(), Some(settings.conversation_id.as_str())));
                Err(e)
            }
        }
    }

    async fn complete(
        &self,
        transcript: &Transcript,
        settings: &TurnSettings,
        descriptors: &[ToolDescriptor],
        cancel: &CancellationToken,
    ) -> OrchestrationResult<CompletionOutcome> {
        if self.logger.is_some() {
            let messages = transcript.to_request_messages(&settings.system_prompt);
            self.log(|l| l.log_completion_request(&messages, &settings.generate.model));
        }

        let request = CompletionRequest {
            system_prompt: &settings.system_prompt,
            transcript,
            tools: descriptors,
            config: &settings.generate,
        };
        let deadline = self.config.completion_timeout;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(OrchestrationError::Cancelled),
            result = tokio::time::timeout(deadline, self.provider.complete(request)) => match result {
                Ok(outcome) => Ok(outcome?),
                Err(_) => {
                    warn!(provider = self.provider.provider_name(), "completion deadline exceeded");
                    Err(crate::provider::ProviderError::Timeout(deadline).into())
                }
            },
        }
    }

    /// Run the requested tool and return the content for its function entry.
    async fn dispatch(
        &self,
        request: &ToolRequest,
        coordinator: &mut ToolCoordinator,
        cancel: &CancellationToken,
    ) -> OrchestrationResult<String> {
        let limit = self.config.max_tool_calls;
        if coordinator.limit_reached(limit) {
            warn!(tool = request.name(), limit, "tool call limit reached");
            return Err(OrchestrationError::ToolCallLimitExceeded { limit });
        }

        let args = parse_arguments(request)?;
        let tool = self
            .registry
            .resolve(request.name())
            .map_err(|_| OrchestrationError::UnknownToolRequested(request.name().to_string()))?;
        check_arguments(tool, args.as_ref())?;

        info!(tool = request.name(), "dispatching tool");
        let (content, success) = self.invoke(tool, args, cancel).await?;

        self.log(|l| l.log_tool_execution(request.name(), request.arguments(), &content, success));
        coordinator.record_invocation(ToolExecutionResult {
            tool_name: request.name().to_string(),
            arguments: request.arguments().to_string(),
            content: content.clone(),
            success,
        });

        Ok(content)
    }

    /// Handler failures and timeouts become error content; only cancellation
    /// is returned as an error.
    async fn invoke(
        &self,
        tool: &RegisteredTool,
        args: Option<Value>,
        cancel: &CancellationToken,
    ) -> OrchestrationResult<(String, bool)> {
        let deadline = self.config.tool_timeout;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(OrchestrationError::Cancelled),
            result = tokio::time::timeout(deadline, tool.call(args)) => Ok(match result {
                Ok(Ok(output)) => (output.into_content(), true),
                Ok(Err(e)) => {
                    warn!(tool = tool.name(), "tool failed: {}", e);
                    (error_content(&e.to_string()), false)
                }
                Err(_) => {
                    warn!(tool = tool.name(), "tool timed out after {:?}", deadline);
                    (error_content(&format!("tool timed out after {:?}", deadline)), false)
                }
            }),
        }
    }

    fn log(&self, entry: impl FnOnce(&Logger) -> anyhow::Result<()>) {
        if let Some(logger) = &self.logger {
            if let Err(e) = entry(logger) {
                warn!("failed to write session log: {:#}", e);
            }
        }
    }
}

/// Blank arguments mean the tool was called without any.
fn parse_arguments(request: &ToolRequest) -> OrchestrationResult<Option<Value>> {
    let raw = request.arguments().trim();
    if raw.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Null) => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(e) => Err(OrchestrationError::MalformedToolArguments {
            tool: request.name().to_string(),
            reason: e.to_string(),
        }),
    }
}

fn check_arguments(tool: &RegisteredTool, args: Option<&Value>) -> OrchestrationResult<()> {
    let empty = json!({});
    tool.descriptor()
        .check_arguments(args.unwrap_or(&empty))
        .map_err(|e| OrchestrationError::MalformedToolArguments {
            tool: tool.name().to_string(),
            reason: e.to_string(),
        })
}

fn error_content(message: &str) -> String {
    json!({ "error": message }).to_string()
}
