//! TOML configuration parsing and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default system prompt for the assistant.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an assistant that helps engineers build mobile screens with Polaris components. \
Use the available functions to look up components and internal documentation before answering. \
Respond using markdown.";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    /// Identity and system prompt
    pub assistant: AssistantConfig,
    /// Completion provider
    #[serde(default)]
    pub llm: LlmConfig,
    /// Per-turn limits
    #[serde(default)]
    pub execution: ExecutionConfig,
    /// Built-in tools
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Session log
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Assistant identity and prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Display name
    pub name: String,
    /// Prompt sent as the system entry of every request
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

/// Completion provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai" or "azure"
    #[serde(default = "default_api_type")]
    pub api_type: String,
    /// Base URL of the completions service
    #[serde(default = "default_api_host")]
    pub api_host: String,
    /// Azure `api-version`
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Azure deployment
    #[serde(default)]
    pub deployment_id: Option<String>,
    /// OpenAI organization
    #[serde(default)]
    pub organization: Option<String>,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Completion token limit
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// HTTP timeout
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,
}

fn default_api_type() -> String {
    "openai".to_string()
}

fn default_api_host() -> String {
    "https://api.openai.com".to_string()
}

fn default_api_version() -> String {
    "2023-07-01-preview".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo-0613".to_string()
}

fn default_temperature() -> f32 {
    1.0
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_llm_timeout() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_type: default_api_type(),
            api_host: default_api_host(),
            api_version: default_api_version(),
            deployment_id: None,
            organization: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_llm_timeout(),
        }
    }
}

/// Turn execution limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Tool dispatches allowed per turn
    #[serde(default = "default_max_tool_calls")]
    pub max_tool_calls: u32,
    /// Deadline for one completion exchange
    #[serde(default = "default_completion_timeout")]
    pub completion_timeout_seconds: u64,
    /// Deadline for one tool invocation
    #[serde(default = "default_tool_timeout")]
    pub tool_timeout_seconds: u64,
}

fn default_max_tool_calls() -> u32 {
    8
}

fn default_completion_timeout() -> u64 {
    60
}

fn default_tool_timeout() -> u64 {
    30
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            max_tool_calls: default_max_tool_calls(),
            completion_timeout_seconds: default_completion_timeout(),
            tool_timeout_seconds: default_tool_timeout(),
        }
    }
}

/// Built-in tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Component search endpoint
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// Component search HTTP timeout
    #[serde(default = "default_search_timeout")]
    pub search_timeout_seconds: u64,
}

fn default_search_url() -> String {
    "http://localhost:8000/search".to_string()
}

fn default_search_timeout() -> u64 {
    20
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            search_timeout_seconds: default_search_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Markdown session log; None disables the file log
    #[serde(default)]
    pub log_file: Option<String>,
    /// DEBUG writes full request messages
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "INFO".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            log_level: default_log_level(),
        }
    }
}

/// Loads and manages TOML configuration.
#[derive(Debug)]
pub struct ConfigurationLoader {
    pub config_path: PathBuf,
    pub config: Configuration,
}

impl ConfigurationLoader {
    /// Initialize configuration loader.
    ///
    /// # Arguments
    /// * `config_path` - Path to TOML config file. If None, uses `config/assistant.toml`
    ///   when present and the built-in defaults otherwise.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let explicit = config_path.is_some();
        let config_path = config_path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("config/assistant.toml"));

        let config = if config_path.exists() {
            Self::load_config(&config_path)?
        } else if explicit {
            anyhow::bail!("Config file not found: {}", config_path.display());
        } else {
            Self::get_default_config()
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Create a configuration loader from a pre-parsed Configuration.
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config_path: PathBuf::from("config/assistant.toml"),
            config,
        }
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = toml::from_str(content).context("Failed to parse TOML config")?;
        Ok(Self::from_config(config))
    }

    /// Load configuration from TOML file.
    fn load_config(path: &Path) -> Result<Configuration> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }

    /// Get default configuration.
    pub fn get_default_config() -> Configuration {
        Configuration {
            assistant: AssistantConfig {
                name: "polaris-assist".to_string(),
                system_prompt: default_system_prompt(),
            },
            llm: LlmConfig::default(),
            execution: ExecutionConfig::default(),
            tools: ToolsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Get configuration value by dot-notation key.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match key {
            "assistant.name" => Some(self.config.assistant.name.clone()),
            "assistant.system_prompt" => Some(self.config.assistant.system_prompt.clone()),
            "llm.api_type" => Some(self.config.llm.api_type.clone()),
            "llm.api_host" => Some(self.config.llm.api_host.clone()),
            "llm.api_version" => Some(self.config.llm.api_version.clone()),
            "llm.deployment_id" => self.config.llm.deployment_id.clone(),
            "llm.organization" => self.config.llm.organization.clone(),
            "llm.model" => Some(self.config.llm.model.clone()),
            "tools.search_url" => Some(self.config.tools.search_url.clone()),
            "logging.log_file" => self.config.logging.log_file.clone(),
            "logging.log_level" => Some(self.config.logging.log_level.clone()),
            _ => None,
        }
    }

    /// Get numeric configuration value.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        match key {
            "llm.max_tokens" => Some(self.config.llm.max_tokens as u64),
            "llm.timeout_seconds" => Some(self.config.llm.timeout_seconds),
            "execution.max_tool_calls" => Some(self.config.execution.max_tool_calls as u64),
            "execution.completion_timeout_seconds" => {
                Some(self.config.execution.completion_timeout_seconds)
            }
            "execution.tool_timeout_seconds" => Some(self.config.execution.tool_timeout_seconds),
            "tools.search_timeout_seconds" => Some(self.config.tools.search_timeout_seconds),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConfigurationLoader::get_default_config();
        assert_eq!(config.assistant.name, "polaris-assist");
        assert_eq!(config.llm.api_type, "openai");
        assert_eq!(config.llm.max_tokens, 1000);
        assert_eq!(config.execution.max_tool_calls, 8);
        assert_eq!(config.tools.search_url, "http://localhost:8000/search");
        assert!(config.logging.log_file.is_none());
    }

    #[test]
    fn test_get_methods() {
        let loader = ConfigurationLoader::from_config(ConfigurationLoader::get_default_config());
        assert_eq!(
            loader.get_string("assistant.name"),
            Some("polaris-assist".to_string())
        );
        assert_eq!(loader.get_string("llm.deployment_id"), None);
        assert_eq!(loader.get_u64("execution.max_tool_calls"), Some(8));
        assert_eq!(loader.get_u64("execution.tool_timeout_seconds"), Some(30));
        assert_eq!(loader.get_u64("nope"), None);
    }

    #[test]
    fn test_minimal_toml_uses_section_defaults() {
        let loader = ConfigurationLoader::from_toml_str(
            r#"
[assistant]
name = "test"
"#,
        )
        .unwrap();

        assert_eq!(loader.config.assistant.name, "test");
        assert_eq!(loader.config.assistant.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(loader.config.llm.model, "gpt-3.5-turbo-0613");
        assert_eq!(loader.config.execution.completion_timeout_seconds, 60);
    }

    #[test]
    fn test_azure_config_from_toml() {
        use std::fs;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[assistant]
name = "test"
system_prompt = "Be brief."

[llm]
api_type = "azure"
api_host = "https://example.openai.azure.com"
deployment_id = "gpt35"
temperature = 0.2

[execution]
max_tool_calls = 3

[tools]
search_url = "http://search.internal/search"

[logging]
log_file = "/tmp/polaris-test.md"
log_level = "DEBUG"
"#;

        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), toml_content).unwrap();

        let loader = ConfigurationLoader::new(Some(temp_file.path())).unwrap();
        assert_eq!(loader.get_string("llm.api_type"), Some("azure".to_string()));
        assert_eq!(loader.get_string("llm.deployment_id"), Some("gpt35".to_string()));
        assert_eq!(loader.config.llm.temperature, 0.2);
        assert_eq!(loader.get_u64("execution.max_tool_calls"), Some(3));
        assert_eq!(
            loader.get_string("logging.log_file"),
            Some("/tmp/polaris-test.md".to_string())
        );
        assert_eq!(loader.config.assistant.system_prompt, "Be brief.");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = ConfigurationLoader::new(Some(Path::new("/nonexistent/assistant.toml")))
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(ConfigurationLoader::from_toml_str("[assistant").is_err());
    }
}
