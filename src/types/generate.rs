//! Per-request generation settings.

use serde::{Deserialize, Serialize};

/// Configuration for a completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Model identifier (omitted on the wire for deployment-scoped routing)
    pub model: String,
    /// Temperature for sampling (0.0 = deterministic, 2.0 = very random)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Per-request API key overriding the configured one
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

impl GenerateConfig {
    /// Create a new configuration for the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: 1.0,
            max_tokens: Some(1000),
            api_key: None,
        }
    }

    /// Set the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set a per-request API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = if key.is_empty() { None } else { Some(key) };
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("Temperature must be between 0.0 and 2.0".to_string());
        }

        if self.max_tokens == Some(0) {
            return Err("Max tokens must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self::new("gpt-3.5-turbo-0613")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = GenerateConfig::new("gpt-4")
            .with_temperature(0.5)
            .with_max_tokens(Some(2000))
            .with_api_key("sk-test");

        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.max_tokens, Some(2000));
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_empty_key_means_no_override() {
        let config = GenerateConfig::default().with_api_key("");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_validation() {
        assert!(GenerateConfig::default().validate().is_ok());
        assert!(GenerateConfig::default().with_temperature(-0.1).validate().is_err());
        assert!(GenerateConfig::default().with_temperature(2.1).validate().is_err());
        assert!(GenerateConfig::default().with_max_tokens(Some(0)).validate().is_err());
    }

    #[test]
    fn test_api_key_never_serialized() {
        let config = GenerateConfig::default().with_api_key("secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
