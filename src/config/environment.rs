//! Environment variable loading and management.
//!
//! Provider credentials and endpoint selection live in the environment (or a
//! `.env` file). They are read here, at the edge, and handed to the provider
//! factory as explicit values; nothing below this layer touches `std::env`.

use std::env;
use std::path::Path;

use super::config::LlmConfig;

/// Loads environment variables from .env file and system environment.
#[derive(Debug, Clone)]
pub struct EnvironmentLoader {
    env_file: Option<String>,
}

impl EnvironmentLoader {
    /// Initialize the environment loader.
    ///
    /// # Arguments
    /// * `env_file` - Path to .env file. Only an explicitly provided file is loaded.
    pub fn new(env_file: Option<&Path>) -> Self {
        if let Some(path) = env_file {
            if path.exists() {
                if let Err(e) = dotenv::from_path(path) {
                    tracing::warn!("Failed to load .env file {}: {}", path.display(), e);
                }
            } else {
                tracing::warn!(".env file not found: {}", path.display());
            }
        }

        Self {
            env_file: env_file.map(|p| p.to_string_lossy().to_string()),
        }
    }

    /// Path of the loaded .env file, if any.
    pub fn env_file(&self) -> Option<&str> {
        self.env_file.as_deref()
    }

    fn non_empty(key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.trim().is_empty())
    }

    /// API key used when a request does not carry its own.
    pub fn api_key(&self) -> Option<String> {
        Self::non_empty("OPENAI_API_KEY")
    }

    /// Provider host override.
    pub fn api_host(&self) -> Option<String> {
        Self::non_empty("OPENAI_API_HOST")
    }

    /// Provider type override ("openai" or "azure").
    pub fn api_type(&self) -> Option<String> {
        Self::non_empty("OPENAI_API_TYPE")
    }

    /// API version override for deployment-scoped routing.
    pub fn api_version(&self) -> Option<String> {
        Self::non_empty("OPENAI_API_VERSION")
    }

    /// Deployment identifier for deployment-scoped routing.
    pub fn deployment_id(&self) -> Option<String> {
        Self::non_empty("AZURE_DEPLOYMENT_ID")
    }

    /// Organization header value.
    pub fn organization(&self) -> Option<String> {
        Self::non_empty("OPENAI_ORGANIZATION")
    }

    /// Default model override.
    pub fn default_model(&self) -> Option<String> {
        Self::non_empty("DEFAULT_MODEL")
    }

    /// Apply environment overrides on top of file configuration.
    pub fn apply_to(&self, llm: &mut LlmConfig) {
        if let Some(v) = self.api_type() {
            llm.api_type = v;
        }
        if let Some(v) = self.api_host() {
            llm.api_host = v;
        }
        if let Some(v) = self.api_version() {
            llm.api_version = v;
        }
        if let Some(v) = self.deployment_id() {
            llm.deployment_id = Some(v);
        }
        if let Some(v) = self.organization() {
            llm.organization = Some(v);
        }
        if let Some(v) = self.default_model() {
            llm.model = v;
        }
    }
}

impl Default for EnvironmentLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the process-wide environment is not mutated concurrently.
    #[test]
    fn test_overrides_and_env_file() {
        use std::io::Write;

        for key in [
            "OPENAI_API_KEY",
            "OPENAI_API_HOST",
            "OPENAI_API_TYPE",
            "OPENAI_API_VERSION",
            "AZURE_DEPLOYMENT_ID",
            "OPENAI_ORGANIZATION",
            "DEFAULT_MODEL",
        ] {
            env::remove_var(key);
        }

        let loader = EnvironmentLoader::default();
        assert!(loader.env_file().is_none());
        assert_eq!(loader.api_key(), None);

        let mut llm = LlmConfig::default();
        loader.apply_to(&mut llm);
        assert_eq!(llm.api_type, "openai");

        env::set_var("OPENAI_API_TYPE", "azure");
        env::set_var("AZURE_DEPLOYMENT_ID", "gpt35");
        env::set_var("OPENAI_ORGANIZATION", "  ");
        loader.apply_to(&mut llm);
        assert_eq!(llm.api_type, "azure");
        assert_eq!(llm.deployment_id.as_deref(), Some("gpt35"));
        assert!(llm.organization.is_none());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "OPENAI_API_KEY=sk-from-file").unwrap();
        let loader = EnvironmentLoader::new(Some(file.path()));
        assert!(loader.env_file().is_some());
        assert_eq!(loader.api_key(), Some("sk-from-file".to_string()));

        for key in ["OPENAI_API_KEY", "OPENAI_API_TYPE", "AZURE_DEPLOYMENT_ID", "OPENAI_ORGANIZATION"] {
            env::remove_var(key);
        }
    }
}
