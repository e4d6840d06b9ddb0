//! OpenAI-compatible chat completions provider.
//!
//! Speaks the `functions` flavour of the chat completions API against either
//! api.openai.com (or a compatible host) or an Azure OpenAI deployment.

use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::provider::error::{ProviderError, ProviderResult};
use crate::provider::traits::{CompletionOutcome, CompletionProvider, CompletionRequest, ToolRequest};
use crate::types::FunctionCall;

/// Which flavour of the chat completions API to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiType {
    /// api.openai.com or a compatible host
    OpenAi,
    /// Azure OpenAI deployment
    Azure,
}

impl ApiType {
    /// Identifier used in configuration and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiType::OpenAi => "openai",
            ApiType::Azure => "azure",
        }
    }
}

impl FromStr for ApiType {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "" => Ok(ApiType::OpenAi),
            "azure" => Ok(ApiType::Azure),
            other => Err(ProviderError::Configuration(format!(
                "unknown api type '{}', expected 'openai' or 'azure'",
                other
            ))),
        }
    }
}

/// Connection settings for [`OpenAiProvider`].
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// API flavour
    pub api_type: ApiType,
    /// Base URL without trailing path, e.g. `https://api.openai.com`
    pub api_host: String,
    /// Default API key; a per-request key takes precedence
    pub api_key: Option<String>,
    /// Azure `api-version` query parameter
    pub api_version: String,
    /// Azure deployment identifier
    pub deployment_id: Option<String>,
    /// OpenAI organization header (OpenAI flavour only)
    pub organization: Option<String>,
    /// HTTP timeout for one exchange
    pub timeout: Duration,
}

impl ProviderSettings {
    /// Settings for api.openai.com with the given key.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            api_type: ApiType::OpenAi,
            api_host: "https://api.openai.com".to_string(),
            api_key: Some(api_key.into()),
            api_version: "2023-07-01-preview".to_string(),
            deployment_id: None,
            organization: None,
            timeout: Duration::from_secs(60),
        }
    }

    /// Override the base URL.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }
}

/// Chat completions client.
pub struct OpenAiProvider {
    client: reqwest::Client,
    settings: ProviderSettings,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    function_call: Option<FunctionCall>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default)]
    param: Option<String>,
    #[serde(default)]
    code: Option<Value>,
}

impl OpenAiProvider {
    /// Create a provider from settings.
    ///
    /// Fails when an Azure provider has no deployment id or the HTTP client
    /// cannot be built.
    pub fn new(settings: ProviderSettings) -> ProviderResult<Self> {
        if settings.api_type == ApiType::Azure
            && settings.deployment_id.as_deref().map_or(true, str::is_empty)
        {
            return Err(ProviderError::Configuration(
                "azure requires a deployment id".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ProviderError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, settings })
    }

    /// Settings this provider was built with.
    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    /// Full URL of the chat completions endpoint.
    pub fn endpoint_url(&self) -> String {
        let host = self.settings.api_host.trim_end_matches('/');
        match self.settings.api_type {
            ApiType::OpenAi => format!("{}/v1/chat/completions", host),
            ApiType::Azure => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                host,
                self.settings.deployment_id.as_deref().unwrap_or_default(),
                self.settings.api_version
            ),
        }
    }

    /// JSON request body for one exchange.
    pub fn build_body(&self, request: &CompletionRequest<'_>) -> Value {
        let messages = request.transcript.to_request_messages(request.system_prompt);
        let mut body = json!({
            "messages": messages,
            "temperature": request.config.temperature,
            "stream": false,
        });

        if self.settings.api_type == ApiType::OpenAi {
            body["model"] = json!(request.config.model);
        }
        if let Some(max_tokens) = request.config.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if !request.tools.is_empty() {
            body["functions"] = json!(request.tools);
        }
        body
    }

    fn headers(&self, request: &CompletionRequest<'_>) -> ProviderResult<HeaderMap> {
        let key = request
            .config
            .api_key
            .as_deref()
            .or(self.settings.api_key.as_deref())
            .ok_or_else(|| ProviderError::Configuration("no API key configured".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        match self.settings.api_type {
            ApiType::OpenAi => {
                headers.insert("Authorization", header_value(&format!("Bearer {}", key))?);
                if let Some(org) = self.settings.organization.as_deref().filter(|o| !o.is_empty()) {
                    headers.insert("OpenAI-Organization", header_value(org)?);
                }
            }
            ApiType::Azure => {
                headers.insert("api-key", header_value(key)?);
            }
        }
        Ok(headers)
    }

    fn map_send_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.settings.timeout)
        } else {
            ProviderError::transport(err)
        }
    }
}

fn header_value(value: &str) -> ProviderResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ProviderError::Configuration(format!("invalid header value: {}", e)))
}

fn error_from_response(status: u16, body: &str) -> ProviderError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => ProviderError::Api {
            status,
            message: envelope.error.message,
            error_type: envelope.error.error_type,
            param: envelope.error.param,
            code: envelope.error.code.and_then(|c| match c {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => Some(other.to_string()),
            }),
        },
        Err(_) => ProviderError::transport(format!(
            "OpenAI API returned an error: {} {}",
            status,
            body.trim()
        )),
    }
}

fn outcome_from_response(body: &str) -> ProviderResult<CompletionOutcome> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let message = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| ProviderError::MalformedResponse("response has no choices".to_string()))?;

    let content = message.content.unwrap_or_default();
    match message.function_call {
        Some(call) if call.name.is_empty() => Err(ProviderError::MalformedResponse(
            "function_call without a name".to_string(),
        )),
        Some(call) => Ok(CompletionOutcome::ToolRequest(ToolRequest {
            call,
            content,
            reported_name: message.name.unwrap_or_default(),
        })),
        None => Ok(CompletionOutcome::Answer(content)),
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, request: CompletionRequest<'_>) -> ProviderResult<CompletionOutcome> {
        let url = self.endpoint_url();
        let headers = self.headers(&request)?;
        let body = self.build_body(&request);

        tracing::debug!(
            provider = self.provider_name(),
            url = %url,
            messages = request.transcript.len() + 1,
            functions = request.tools.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "completion request failed");
            return Err(error_from_response(status.as_u16(), &text));
        }

        outcome_from_response(&text)
    }

    fn provider_name(&self) -> &str {
        self.settings.api_type.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GenerateConfig, ToolDescriptor, Transcript, Message};

    fn azure_settings() -> ProviderSettings {
        ProviderSettings {
            api_type: ApiType::Azure,
            api_host: "https://example.openai.azure.com/".to_string(),
            api_key: Some("azure-key".to_string()),
            api_version: "2023-07-01-preview".to_string(),
            deployment_id: Some("gpt35".to_string()),
            organization: None,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_api_type_parsing() {
        assert_eq!("openai".parse::<ApiType>().unwrap(), ApiType::OpenAi);
        assert_eq!("Azure".parse::<ApiType>().unwrap(), ApiType::Azure);
        assert!("bedrock".parse::<ApiType>().is_err());
    }

    #[test]
    fn test_endpoint_urls() {
        let openai = OpenAiProvider::new(ProviderSettings::openai("k").with_host("http://localhost:1234/")).unwrap();
        assert_eq!(openai.endpoint_url(), "http://localhost:1234/v1/chat/completions");

        let azure = OpenAiProvider::new(azure_settings()).unwrap();
        assert_eq!(
            azure.endpoint_url(),
            "https://example.openai.azure.com/openai/deployments/gpt35/chat/completions?api-version=2023-07-01-preview"
        );
    }

    #[test]
    fn test_azure_requires_deployment() {
        let mut settings = azure_settings();
        settings.deployment_id = None;
        assert!(matches!(
            OpenAiProvider::new(settings),
            Err(ProviderError::Configuration(_))
        ));
    }

    #[test]
    fn test_body_shape() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("find me a button"));
        let tools = vec![ToolDescriptor::without_parameters("get_use_actions_documentation", "docs")];
        let config = GenerateConfig::new("gpt-4").with_temperature(0.5);
        let request = CompletionRequest {
            system_prompt: "be helpful",
            transcript: &transcript,
            tools: &tools,
            config: &config,
        };

        let openai = OpenAiProvider::new(ProviderSettings::openai("k")).unwrap();
        let body = openai.build_body(&request);
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["stream"], false);
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "find me a button");
        assert_eq!(body["functions"][0]["name"], "get_use_actions_documentation");

        let azure = OpenAiProvider::new(azure_settings()).unwrap();
        let body = azure.build_body(&CompletionRequest { tools: &[], ..request });
        assert!(body.get("model").is_none());
        assert!(body.get("functions").is_none());
    }

    #[test]
    fn test_error_mapping() {
        let err = error_from_response(
            400,
            r#"{"error":{"message":"bad","type":"invalid_request_error","param":null,"code":42}}"#,
        );
        match err {
            ProviderError::Api { status, message, error_type, param, code } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad");
                assert_eq!(error_type.as_deref(), Some("invalid_request_error"));
                assert_eq!(param, None);
                assert_eq!(code.as_deref(), Some("42"));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let err = error_from_response(502, "Bad Gateway");
        assert!(matches!(err, ProviderError::Transport { ref detail } if detail.contains("502")));
    }

    #[test]
    fn test_outcome_parsing() {
        let answer = outcome_from_response(
            r#"{"choices":[{"message":{"role":"assistant","content":"Hi"}}]}"#,
        )
        .unwrap();
        assert_eq!(answer, CompletionOutcome::Answer("Hi".to_string()));

        let request = outcome_from_response(
            r#"{"choices":[{"message":{"role":"assistant","content":null,"function_call":{"name":"search_component","arguments":"{\"description\":\"button\"}"}}}]}"#,
        )
        .unwrap();
        match request {
            CompletionOutcome::ToolRequest(req) => {
                assert_eq!(req.name(), "search_component");
                assert_eq!(req.content, "");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        assert!(matches!(
            outcome_from_response(r#"{"choices":[]}"#),
            Err(ProviderError::MalformedResponse(_))
        ));
        assert!(matches!(
            outcome_from_response("not json"),
            Err(ProviderError::MalformedResponse(_))
        ));
    }
}
