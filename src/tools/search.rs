//! Component search tool backed by the Polaris search service.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::ToolsConfig;
use crate::registry::{ToolError, ToolHandler, ToolResult};
use crate::types::{ToolDescriptor, ToolOutput};

/// Name under which the search tool is advertised.
pub const SEARCH_TOOL_NAME: &str = "search_component";

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    #[serde(rename = "inputText")]
    input_text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "componentContent")]
    component_content: Option<String>,
}

/// HTTP client for the component search service.
///
/// Posts `{"inputText": ...}` and returns the `componentContent` field of the
/// response.
#[derive(Debug, Clone)]
pub struct ComponentSearchClient {
    client: reqwest::Client,
    url: String,
}

impl ComponentSearchClient {
    /// Create a client for the given endpoint.
    pub fn new(url: impl Into<String>, timeout: Duration) -> ToolResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ToolError::Failed(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Create a client from the `[tools]` configuration section.
    pub fn from_config(config: &ToolsConfig) -> ToolResult<Self> {
        Self::new(
            config.search_url.clone(),
            Duration::from_secs(config.search_timeout_seconds.max(1)),
        )
    }

    /// Endpoint this client posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Descriptor advertised to the model.
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            SEARCH_TOOL_NAME,
            "To build the UI, get the Polaris UI Component that corresponds to the given description",
            json!({
                "type": "object",
                "properties": {
                    "description": {
                        "type": "string",
                        "description": "The description or name of the Polaris UI component you are looking for."
                    }
                },
                "required": ["description"]
            }),
        )
    }

    /// Look up the component matching `description`.
    pub async fn search(&self, description: &str) -> ToolResult<String> {
        tracing::debug!(url = %self.url, "searching components for {:?}", description);

        let response = self
            .client
            .post(&self.url)
            .json(&SearchRequest {
                input_text: description,
            })
            .send()
            .await
            .map_err(|e| ToolError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::UnexpectedResponse(format!(
                "search service returned {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| ToolError::UnexpectedResponse(format!("invalid search response: {}", e)))?;

        parsed.component_content.ok_or_else(|| {
            ToolError::UnexpectedResponse("search response has no componentContent".to_string())
        })
    }
}

#[async_trait::async_trait]
impl ToolHandler for ComponentSearchClient {
    async fn call(&self, args: Option<Value>) -> ToolResult<ToolOutput> {
        let description = args
            .as_ref()
            .and_then(|a| a.get("description"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ToolError::InvalidArguments("'description' must be a string".to_string())
            })?;

        self.search(description).await.map(ToolOutput::Text)
    }
}
