//! Polaris Assist - function-calling chat assistant
//!
//! Polaris Assist forwards a running transcript to a chat-completion service,
//! runs the tools the model asks for (a Polaris component search and mobile
//! screen documentation lookups), folds their results back into the
//! transcript and repeats until the model answers. It is organised as
//! feature-gated modules:
//!
//! - **`types`** - transcript entries, tool descriptors and request settings (always on)
//! - **`config`** - TOML configuration and `.env` environment loading
//! - **`observability`** - markdown session log mirrored to `tracing`
//! - **`provider`** - completion provider trait and the OpenAI/Azure client
//! - **`registry`** - name-keyed tool registry
//! - **`tools`** - the built-in tools
//! - **`orchestration`** - the bounded turn loop and conversations
//! - **`cli`** - the `polaris-assist` command-line front-end
//!
//! # Features
//!
//! ```toml
//! [dependencies]
//! polaris-assist = { version = "0.3", default-features = false, features = ["orchestration"] }
//! ```
//!
//! # Example: resolving a turn
//!
//! ```ignore
//! use polaris_assist::config::{ConfigurationLoader, EnvironmentLoader};
//! use polaris_assist::orchestration::{Conversation, Orchestrator, RuntimeConfig};
//! use polaris_assist::provider::ProviderFactory;
//! use polaris_assist::tools::builtin_registry;
//! use polaris_assist::types::GenerateConfig;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! let config = ConfigurationLoader::new(None)?.config;
//! let env = EnvironmentLoader::new(None);
//!
//! let provider = ProviderFactory::create(&config.llm, &env)?;
//! let registry = Arc::new(builtin_registry(&config.tools)?);
//! let orchestrator = Orchestrator::new(provider, registry, RuntimeConfig::from(&config.execution));
//!
//! let mut conversation = Conversation::new(
//!     "New Conversation",
//!     config.assistant.system_prompt.clone(),
//!     GenerateConfig::new(config.llm.model.clone()),
//! );
//! let outcome = conversation
//!     .send("find me a button", &orchestrator, &CancellationToken::new())
//!     .await?;
//! println!("{}", outcome.answer);
//! ```

#![warn(missing_docs)]

/// Transcript and tool types
pub mod types;

/// Configuration management (enabled with the `config` feature)
#[cfg(feature = "config")]
pub mod config;

/// Observability utilities (enabled with the `observability` feature)
#[cfg(feature = "observability")]
pub mod observability;

/// Completion provider abstraction (enabled with the `provider` feature)
#[cfg(feature = "provider")]
pub mod provider;

/// Tool registry (enabled with the `registry` feature)
#[cfg(feature = "registry")]
pub mod registry;

/// Built-in tools (enabled with the `tools` feature)
#[cfg(feature = "tools")]
pub mod tools;

/// Turn orchestration (enabled with the `orchestration` feature)
#[cfg(feature = "orchestration")]
pub mod orchestration;

/// Command-line front-end (enabled with the `cli` feature)
#[cfg(feature = "cli")]
pub mod cli;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::{FunctionCall, GenerateConfig, Message, Role, ToolDescriptor, ToolOutput, Transcript};

    #[cfg(feature = "config")]
    pub use crate::config::{
        Configuration, ConfigurationLoader, EnvironmentLoader, ToolsConfig, DEFAULT_SYSTEM_PROMPT,
    };

    #[cfg(feature = "observability")]
    pub use crate::observability::Logger;

    #[cfg(feature = "provider")]
    pub use crate::provider::{
        CompletionOutcome, CompletionProvider, CompletionRequest, OpenAiProvider, ProviderError,
        ProviderFactory, ProviderSettings, ToolRequest,
    };

    #[cfg(feature = "registry")]
    pub use crate::registry::{FnHandler, RegistryError, ToolError, ToolHandler, ToolRegistry};

    #[cfg(feature = "tools")]
    pub use crate::tools::{builtin_registry, BuiltinTool};

    #[cfg(feature = "orchestration")]
    pub use crate::orchestration::{
        Conversation, OrchestrationError, Orchestrator, RuntimeConfig, TurnOutcome, TurnSettings,
    };
}
