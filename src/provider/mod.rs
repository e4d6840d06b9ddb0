//! Completion provider abstraction module
//!
//! This module provides the [`CompletionProvider`] trait, an OpenAI/Azure
//! implementation, and a factory that builds one from configuration.

pub mod error;
pub mod factory;
pub mod openai;
pub mod traits;

// Re-export main types
pub use error::{ProviderError, ProviderResult};
pub use factory::ProviderFactory;
pub use openai::{ApiType, OpenAiProvider, ProviderSettings};
pub use traits::{CompletionOutcome, CompletionProvider, CompletionRequest, ToolRequest};
