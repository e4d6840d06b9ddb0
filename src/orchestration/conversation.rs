//! In-memory conversation record

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::error::OrchestrationResult;
use super::runtime::{Orchestrator, TurnOutcome, TurnSettings};
use crate::types::{GenerateConfig, Message, Transcript};

/// One conversation thread: settings plus its transcript.
///
/// Turns take `&mut self`, so a conversation never runs two turns at once.
/// Nothing is persisted; dropping the value discards the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    id: Uuid,
    name: String,
    prompt: String,
    #[serde(flatten)]
    generate: GenerateConfig,
    transcript: Transcript,
}

impl Conversation {
    /// Start an empty conversation
    pub fn new(name: impl Into<String>, prompt: impl Into<String>, generate: GenerateConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            prompt: prompt.into(),
            generate,
            transcript: Transcript::new(),
        }
    }

    /// Conversation id
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// System prompt
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Model identifier
    pub fn model(&self) -> &str {
        &self.generate.model
    }

    /// Sampling temperature
    pub fn temperature(&self) -> f32 {
        self.generate.temperature
    }

    /// History so far
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Rename the conversation
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Drop the history, keeping id and settings
    pub fn reset(&mut self) {
        self.transcript.clear();
    }

    /// Settings for the next turn
    pub fn turn_settings(&self) -> TurnSettings {
        TurnSettings::new(self.prompt.clone(), self.generate.clone())
            .with_conversation_id(self.id.to_string())
    }

    /// Append a user message and resolve one turn.
    ///
    /// On failure the transcript keeps the user message and anything the
    /// turn appended before the error.
    pub async fn send(
        &mut self,
        user_text: impl Into<String>,
        orchestrator: &Orchestrator,
        cancel: &CancellationToken,
    ) -> OrchestrationResult<TurnOutcome> {
        let settings = self.turn_settings();
        self.transcript.push(Message::user(user_text));
        orchestrator.run_turn(&mut self.transcript, &settings, cancel).await
    }
}
