//! Completion provider abstraction.
//!
//! A provider encapsulates exactly one request/response exchange with a
//! chat-completion service: it receives the system prompt, the transcript and
//! the tool catalogue, and returns either a final answer or a tool request.

use crate::provider::error::ProviderResult;
use crate::types::{FunctionCall, GenerateConfig, Message, ToolDescriptor, Transcript};

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequest {
    /// Requested function name and raw JSON arguments
    pub call: FunctionCall,
    /// Text the model sent alongside the request (often empty)
    pub content: String,
    /// `name` field the model reported on its message (often empty)
    pub reported_name: String,
}

impl ToolRequest {
    /// Create a tool request with no accompanying content.
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            call: FunctionCall::new(name, arguments),
            content: String::new(),
            reported_name: String::new(),
        }
    }

    /// Requested tool name.
    pub fn name(&self) -> &str {
        &self.call.name
    }

    /// Raw JSON arguments.
    pub fn arguments(&self) -> &str {
        &self.call.arguments
    }

    /// Assistant transcript entry recording exactly what was requested.
    pub fn to_message(&self) -> Message {
        Message::function_request(
            self.reported_name.clone(),
            self.content.clone(),
            self.call.clone(),
        )
    }
}

/// Result of one completion exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The model answered in plain text
    Answer(String),
    /// The model asked for a tool to be run
    ToolRequest(ToolRequest),
}

/// Everything one completion exchange needs.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    /// Instruction sent as the first (system) entry
    pub system_prompt: &'a str,
    /// Conversation so far, replayed verbatim
    pub transcript: &'a Transcript,
    /// Tool catalogue advertised to the model
    pub tools: &'a [ToolDescriptor],
    /// Model, temperature, token limit and optional per-request key
    pub config: &'a GenerateConfig,
}

/// Core trait that every completion provider implements.
///
/// # Example
///
/// ```ignore
/// use polaris_assist::provider::{CompletionOutcome, CompletionProvider, CompletionRequest};
///
/// async fn ask(provider: &dyn CompletionProvider, request: CompletionRequest<'_>) {
///     match provider.complete(request).await {
///         Ok(CompletionOutcome::Answer(text)) => println!("{}", text),
///         Ok(CompletionOutcome::ToolRequest(req)) => println!("wants {}", req.name()),
///         Err(e) => eprintln!("{}", e),
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run one non-streaming completion exchange.
    ///
    /// # Returns
    /// Either the answer text or the requested tool invocation
    async fn complete(&self, request: CompletionRequest<'_>) -> ProviderResult<CompletionOutcome>;

    /// Provider identifier for logging (e.g. "openai", "azure")
    fn provider_name(&self) -> &str;
}
