//! Built-in tools
//!
//! The closed set of tools the assistant advertises: a component search
//! backed by the Polaris search service, and zero-argument lookups of mobile
//! screen documentation.
//!
//! # Example
//!
//! ```rust,ignore
//! use polaris_assist::config::ToolsConfig;
//! use polaris_assist::tools::builtin_registry;
//!
//! let registry = builtin_registry(&ToolsConfig::default())?;
//! assert!(registry.contains("search_component"));
//! ```

pub mod docs;
pub mod search;

use std::sync::Arc;

pub use docs::{DocTopic, DocumentationTool};
pub use search::{ComponentSearchClient, SEARCH_TOOL_NAME};

use crate::config::ToolsConfig;
use crate::registry::{RegistryError, RegistryResult, ToolHandler, ToolRegistry};
use crate::types::ToolDescriptor;

/// One built-in tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTool {
    /// `search_component`
    SearchComponent,
    /// One of the documentation lookups
    Documentation(DocTopic),
}

impl BuiltinTool {
    /// Every built-in tool in registration order.
    pub fn all() -> Vec<BuiltinTool> {
        std::iter::once(BuiltinTool::SearchComponent)
            .chain(DocTopic::ALL.into_iter().map(BuiltinTool::Documentation))
            .collect()
    }

    /// Find a built-in tool by its advertised name.
    pub fn from_name(name: &str) -> Option<BuiltinTool> {
        Self::all().into_iter().find(|t| t.name() == name)
    }

    /// Advertised name.
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinTool::SearchComponent => SEARCH_TOOL_NAME,
            BuiltinTool::Documentation(topic) => topic.tool_name(),
        }
    }

    /// Descriptor advertised to the model.
    pub fn descriptor(&self) -> ToolDescriptor {
        match self {
            BuiltinTool::SearchComponent => ComponentSearchClient::descriptor(),
            BuiltinTool::Documentation(topic) => topic.descriptor(),
        }
    }

    /// Handler executing this tool.
    pub fn handler(&self, config: &ToolsConfig) -> RegistryResult<Arc<dyn ToolHandler>> {
        match self {
            BuiltinTool::SearchComponent => {
                let client = ComponentSearchClient::from_config(config).map_err(|e| {
                    RegistryError::HandlerUnavailable {
                        name: SEARCH_TOOL_NAME.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                Ok(Arc::new(client))
            }
            BuiltinTool::Documentation(topic) => Ok(Arc::new(DocumentationTool::new(*topic))),
        }
    }
}

/// Build a registry containing every built-in tool.
pub fn builtin_registry(config: &ToolsConfig) -> RegistryResult<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    for tool in BuiltinTool::all() {
        registry.register(tool.descriptor(), tool.handler(config)?)?;
    }
    tracing::info!(tools = registry.len(), "built-in tools registered");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_order() {
        let registry = builtin_registry(&ToolsConfig::default()).unwrap();
        assert_eq!(
            registry.tool_names(),
            vec![
                "search_component",
                "get_screen_file_structure_documentation",
                "get_shared_state_documentation",
                "get_use_actions_documentation",
                "get_screen_navigation_setup_documentation",
                "get_list_with_source_documentation",
            ]
        );
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            BuiltinTool::from_name("search_component"),
            Some(BuiltinTool::SearchComponent)
        );
        assert_eq!(
            BuiltinTool::from_name("get_shared_state_documentation"),
            Some(BuiltinTool::Documentation(DocTopic::SharedState))
        );
        assert_eq!(BuiltinTool::from_name("search_for_polaris_component"), None);
    }
}
