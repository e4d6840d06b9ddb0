//! Configuration management for the assistant.
//!
//! This module provides configuration loading through TOML files and
//! environment variable management via `.env` files.
//!
//! # Example
//!
//! ```no_run
//! use polaris_assist::config::{ConfigurationLoader, EnvironmentLoader};
//! use std::path::Path;
//!
//! let env = EnvironmentLoader::new(Some(Path::new(".env")));
//! let mut loader = ConfigurationLoader::new(Some(Path::new("config/assistant.toml"))).unwrap();
//! env.apply_to(&mut loader.config.llm);
//!
//! println!("Max tool calls per turn: {}", loader.config.execution.max_tool_calls);
//! println!("Model: {}", loader.config.llm.model);
//! ```

#[allow(clippy::module_inception)]
pub mod config;
pub mod environment;

// Re-export main types for convenience
pub use self::config::{
    AssistantConfig, Configuration, ConfigurationLoader, ExecutionConfig, LlmConfig,
    LoggingConfig, ToolsConfig, DEFAULT_SYSTEM_PROMPT,
};
pub use self::environment::EnvironmentLoader;
