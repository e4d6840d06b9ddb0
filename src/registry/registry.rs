//! Fixed tool registry built once at startup.

use std::collections::HashMap;
use std::sync::Arc;

use super::{RegisteredTool, RegistryError, RegistryResult, ToolHandler};
use crate::types::ToolDescriptor;

/// Name-keyed table of tools.
///
/// The registry is populated with `&mut self` during startup and then shared
/// read-only, typically as `Arc<ToolRegistry>`. Lookups never mutate it, so
/// independent conversations can use one registry concurrently.
///
/// # Example
///
/// ```rust,ignore
/// use polaris_assist::registry::{FnHandler, ToolRegistry};
/// use polaris_assist::types::{ToolDescriptor, ToolOutput};
/// use std::sync::Arc;
///
/// let mut registry = ToolRegistry::new();
/// registry.register(
///     ToolDescriptor::without_parameters("ping", "Reply with pong"),
///     Arc::new(FnHandler::new(|_| async { Ok(ToolOutput::from("pong")) })),
/// )?;
///
/// let registry = Arc::new(registry);
/// let descriptors = registry.list_descriptors();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    /// Tools in registration order.
    tools: Vec<RegisteredTool>,

    /// Index from tool name to position in tools vector.
    name_index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a tool name.
    ///
    /// Tool names must be non-empty and contain only alphanumeric
    /// characters, underscores, or hyphens.
    pub(crate) fn validate_name(name: &str) -> RegistryResult<()> {
        if name.is_empty() {
            return Err(RegistryError::InvalidName(name.to_string()));
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(RegistryError::InvalidName(name.to_string()));
        }

        Ok(())
    }

    /// Register a tool.
    ///
    /// Returns an error if the name is invalid, already taken, or the
    /// parameter schema is not a JSON Schema object.
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        handler: Arc<dyn ToolHandler>,
    ) -> RegistryResult<()> {
        Self::validate_name(&descriptor.name)?;

        if self.name_index.contains_key(&descriptor.name) {
            return Err(RegistryError::Conflict {
                name: descriptor.name,
            });
        }

        descriptor
            .validate()
            .map_err(|reason| RegistryError::InvalidSchema {
                name: descriptor.name.clone(),
                reason,
            })?;

        tracing::debug!(tool = %descriptor.name, "registering tool");

        let idx = self.tools.len();
        self.name_index.insert(descriptor.name.clone(), idx);
        self.tools.push(RegisteredTool::new(descriptor, handler));

        Ok(())
    }

    /// Descriptors in registration order, as advertised to the provider.
    pub fn list_descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|rt| rt.descriptor().clone()).collect()
    }

    /// Look up a tool by name.
    pub fn resolve(&self, name: &str) -> RegistryResult<&RegisteredTool> {
        self.name_index
            .get(name)
            .map(|&idx| &self.tools[idx])
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Get the total number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// List all tool names in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|rt| rt.name()).collect()
    }

    /// Check if a tool with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FnHandler;
    use crate::types::ToolOutput;
    use serde_json::{json, Value};

    fn echo() -> Arc<dyn ToolHandler> {
        Arc::new(FnHandler::new(|args: Option<Value>| async move {
            Ok::<_, crate::registry::ToolError>(ToolOutput::Structured(args.unwrap_or(Value::Null)))
        }))
    }

    fn sample_tool(name: &str) -> ToolDescriptor {
        ToolDescriptor::new(
            name,
            format!("Tool: {}", name),
            json!({
                "type": "object",
                "properties": {}
            }),
        )
    }

    #[test]
    fn test_register() {
        let mut registry = ToolRegistry::new();

        registry.register(sample_tool("tool_a"), echo()).unwrap();
        registry.register(sample_tool("tool_b"), echo()).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("tool_a"));
        assert!(registry.contains("tool_b"));
    }

    #[test]
    fn test_conflict_detection() {
        let mut registry = ToolRegistry::new();

        registry.register(sample_tool("duplicate"), echo()).unwrap();
        let err = registry.register(sample_tool("duplicate"), echo()).unwrap_err();

        assert!(matches!(err, RegistryError::Conflict { .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_invalid_name() {
        let mut registry = ToolRegistry::new();

        let err = registry
            .register(ToolDescriptor::new("", "Empty", json!({"type": "object"})), echo())
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidName(_)));

        let err = registry
            .register(ToolDescriptor::new("bad name", "Spaces", json!({"type": "object"})), echo())
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidName(_)));
    }

    #[test]
    fn test_invalid_schema() {
        let mut registry = ToolRegistry::new();

        let err = registry
            .register(ToolDescriptor::new("no_type", "Schema", json!({"properties": {}})), echo())
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidSchema { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_resolve() {
        let mut registry = ToolRegistry::new();
        registry.register(sample_tool("findme"), echo()).unwrap();

        assert_eq!(registry.resolve("findme").unwrap().name(), "findme");
        assert!(matches!(
            registry.resolve("notfound"),
            Err(RegistryError::NotFound(name)) if name == "notfound"
        ));
    }

    #[test]
    fn test_list_descriptors_keeps_registration_order() {
        let mut registry = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(sample_tool(name), echo()).unwrap();
        }

        let names: Vec<String> = registry
            .list_descriptors()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(registry.tool_names(), vec!["zeta", "alpha", "mid"]);
    }

    #[tokio::test]
    async fn test_shared_dispatch() {
        let mut registry = ToolRegistry::new();
        registry.register(sample_tool("echo"), echo()).unwrap();
        let registry = Arc::new(registry);

        let shared = Arc::clone(&registry);
        let handle = tokio::spawn(async move {
            shared
                .resolve("echo")
                .unwrap()
                .call(Some(json!({"n": 1})))
                .await
                .unwrap()
                .into_content()
        });

        let local = registry.resolve("echo").unwrap().call(None).await.unwrap();
        assert_eq!(local.into_content(), "null");
        assert_eq!(handle.await.unwrap(), r#"{"n":1}"#);
    }
}
