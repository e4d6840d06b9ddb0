//! Transcript entries in the chat-completion wire format.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Initial instruction; prepended per request, never stored in a transcript.
    System,
    /// Human input
    User,
    /// Model output: a final answer or a function request
    Assistant,
    /// Result of a tool invocation
    Function,
}

impl Role {
    /// Get the wire representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Function => "function",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A function invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the requested tool
    pub name: String,
    /// JSON-encoded argument object, kept exactly as the model produced it
    #[serde(default)]
    pub arguments: String,
}

impl FunctionCall {
    /// Create a new function call.
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Entry author
    pub role: Role,
    /// Tool name for function entries; otherwise usually empty
    #[serde(default, skip_serializing_if = "String::is_empty", deserialize_with = "null_as_empty")]
    pub name: String,
    /// Textual payload; may be empty when `function_call` is set
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    /// Tool request carried by an assistant entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Violations of the transcript entry invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// A function entry without the name of the tool that produced it.
    #[error("function entry at position {0} has no tool name")]
    MissingFunctionName(usize),

    /// A function call attached to something other than an assistant entry.
    #[error("{role} entry at position {index} carries a function_call")]
    UnexpectedFunctionCall {
        /// Position in the transcript
        index: usize,
        /// Offending role
        role: Role,
    },

    /// A system entry stored inside the transcript.
    #[error("system entry at position {0}; the system prompt is supplied per request")]
    StoredSystemPrompt(usize),
}

impl Message {
    /// System instruction entry.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            name: String::new(),
            content: content.into(),
            function_call: None,
        }
    }

    /// User entry.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            name: String::new(),
            content: content.into(),
            function_call: None,
        }
    }

    /// Final answer entry appended when a turn terminates.
    pub fn assistant_answer(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            name: "assistant".to_string(),
            content: content.into(),
            function_call: None,
        }
    }

    /// Assistant entry recording a tool request exactly as the model reported it.
    pub fn function_request(
        name: impl Into<String>,
        content: impl Into<String>,
        call: FunctionCall,
    ) -> Self {
        Self {
            role: Role::Assistant,
            name: name.into(),
            content: content.into(),
            function_call: Some(call),
        }
    }

    /// Function entry holding a stringified tool result.
    pub fn function_result(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Function,
            name: name.into(),
            content: content.into(),
            function_call: None,
        }
    }

    /// Whether this entry requests a tool invocation.
    pub fn is_function_request(&self) -> bool {
        self.function_call.is_some()
    }

    fn validate_at(&self, index: usize) -> Result<(), MessageError> {
        match self.role {
            Role::Function if self.name.is_empty() => {
                Err(MessageError::MissingFunctionName(index))
            }
            Role::Assistant => Ok(()),
            role if self.function_call.is_some() => {
                Err(MessageError::UnexpectedFunctionCall { index, role })
            }
            _ => Ok(()),
        }
    }

    /// Check the single-entry invariants.
    pub fn validate(&self) -> Result<(), MessageError> {
        self.validate_at(0)
    }
}

/// Ordered conversation history replayed to the provider on every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript has no entries.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Iterate over entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Borrow all entries.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Validate every entry, reporting the first violation.
    pub fn validate(&self) -> Result<(), MessageError> {
        for (index, message) in self.messages.iter().enumerate() {
            if message.role == Role::System {
                return Err(MessageError::StoredSystemPrompt(index));
            }
            message.validate_at(index)?;
        }
        Ok(())
    }

    /// Messages for one completion request: the system prompt followed by the
    /// transcript as-is.
    pub fn to_request_messages(&self, system_prompt: &str) -> Vec<Message> {
        let mut out = Vec::with_capacity(self.messages.len() + 1);
        out.push(Message::system(system_prompt));
        out.extend(self.messages.iter().cloned());
        out
    }

    /// Serialize to the JSON array handed back to callers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a transcript previously produced by [`Transcript::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<Vec<Message>> for Transcript {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

impl IntoIterator for Transcript {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
