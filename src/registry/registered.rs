//! Registered tool: a descriptor paired with its handler.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use super::error::ToolResult;
use crate::types::{ToolDescriptor, ToolOutput};

/// Executable side of a tool.
///
/// Handlers receive the parsed argument object, or `None` when the model sent
/// no arguments.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run the tool.
    async fn call(&self, args: Option<Value>) -> ToolResult<ToolOutput>;
}

/// Adapter turning an async closure into a [`ToolHandler`].
///
/// # Example
///
/// ```rust,ignore
/// use polaris_assist::registry::FnHandler;
/// use polaris_assist::types::ToolOutput;
///
/// let handler = FnHandler::new(|_args| async { Ok(ToolOutput::from("pong")) });
/// ```
pub struct FnHandler<F> {
    func: F,
}

impl<F> FnHandler<F> {
    /// Wrap a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait::async_trait]
impl<F, Fut> ToolHandler for FnHandler<F>
where
    F: Fn(Option<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = ToolResult<ToolOutput>> + Send + 'static,
{
    async fn call(&self, args: Option<Value>) -> ToolResult<ToolOutput> {
        (self.func)(args).await
    }
}

/// A tool descriptor with the handler that executes it.
#[derive(Clone)]
pub struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

impl RegisteredTool {
    /// Create a new registered tool.
    pub fn new(descriptor: ToolDescriptor, handler: Arc<dyn ToolHandler>) -> Self {
        Self { descriptor, handler }
    }

    /// Get the advertised descriptor.
    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    /// Get the handler.
    pub fn handler(&self) -> &Arc<dyn ToolHandler> {
        &self.handler
    }

    /// Get the tool name.
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Get the tool description.
    pub fn description(&self) -> &str {
        &self.descriptor.description
    }

    /// Invoke the handler.
    pub async fn call(&self, args: Option<Value>) -> ToolResult<ToolOutput> {
        self.handler.call(args).await
    }
}

impl fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ToolError;
    use serde_json::json;

    #[tokio::test]
    async fn test_fn_handler_call() {
        let tool = RegisteredTool::new(
            ToolDescriptor::without_parameters("ping", "Reply with pong"),
            Arc::new(FnHandler::new(|args: Option<Value>| async move {
                match args {
                    None => Ok(ToolOutput::from("pong")),
                    Some(_) => Err(ToolError::InvalidArguments("ping takes none".to_string())),
                }
            })),
        );

        assert_eq!(tool.name(), "ping");
        assert_eq!(tool.call(None).await.unwrap().into_content(), "pong");
        assert!(tool.call(Some(json!({"x": 1}))).await.is_err());
        assert!(format!("{:?}", tool).contains("ping"));
    }
}
