//! Tool Registry Module
//!
//! A fixed, name-keyed table of tools. Each entry pairs the
//! [`ToolDescriptor`](crate::types::ToolDescriptor) advertised to the
//! completion provider with the [`ToolHandler`] that executes it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use polaris_assist::registry::{FnHandler, ToolRegistry};
//! use polaris_assist::types::{ToolDescriptor, ToolOutput};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let mut registry = ToolRegistry::new();
//! registry.register(
//!     ToolDescriptor::new("search", "Search components", json!({"type": "object"})),
//!     Arc::new(FnHandler::new(|_| async { Ok(ToolOutput::from("<Button/>")) })),
//! )?;
//!
//! let tool = registry.resolve("search")?;
//! ```

mod error;
mod registered;
mod registry;

pub use error::{RegistryError, RegistryResult, ToolError, ToolResult};
pub use registered::{FnHandler, RegisteredTool, ToolHandler};
pub use registry::ToolRegistry;
