//! Provider factory for creating completion providers from configuration.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::config::{EnvironmentLoader, LlmConfig};
use crate::provider::error::{ProviderError, ProviderResult};
use crate::provider::openai::{ApiType, OpenAiProvider, ProviderSettings};
use crate::provider::traits::CompletionProvider;

/// Factory for creating completion providers.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Resolve connection settings from the `[llm]` configuration section.
    ///
    /// # Arguments
    /// * `llm` - LLM configuration (already merged with environment overrides)
    /// * `api_key` - Default API key, usually from `OPENAI_API_KEY`
    pub fn settings(llm: &LlmConfig, api_key: Option<String>) -> ProviderResult<ProviderSettings> {
        let api_type: ApiType = llm.api_type.parse()?;

        if llm.api_host.trim().is_empty() {
            return Err(ProviderError::Configuration("api_host is empty".to_string()));
        }

        Ok(ProviderSettings {
            api_type,
            api_host: llm.api_host.clone(),
            api_key: api_key.filter(|k| !k.is_empty()),
            api_version: llm.api_version.clone(),
            deployment_id: llm.deployment_id.clone(),
            organization: llm.organization.clone(),
            timeout: Duration::from_secs(llm.timeout_seconds.max(1)),
        })
    }

    /// Create a provider from configuration and environment.
    ///
    /// Environment overrides are applied on top of `llm` before the settings
    /// are resolved.
    pub fn create(
        llm: &LlmConfig,
        env: &EnvironmentLoader,
    ) -> ProviderResult<Arc<dyn CompletionProvider>> {
        let mut llm = llm.clone();
        env.apply_to(&mut llm);

        let settings = Self::settings(&llm, env.api_key())?;
        debug!(
            "Creating {} provider for host {}",
            settings.api_type.as_str(),
            settings.api_host
        );

        Ok(Arc::new(OpenAiProvider::new(settings)?))
    }
}
