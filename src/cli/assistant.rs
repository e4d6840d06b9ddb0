//! Wiring configuration, environment and arguments into a running assistant

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cli::args::CliArgs;
use crate::cli::error::{CliError, CliResult};
use crate::config::{Configuration, ConfigurationLoader, EnvironmentLoader};
use crate::observability::Logger;
use crate::orchestration::{Conversation, Orchestrator, RuntimeConfig, TurnOutcome};
use crate::provider::ProviderFactory;
use crate::tools::builtin_registry;
use crate::types::GenerateConfig;

/// One orchestrator and the conversation it serves.
pub struct Assistant {
    orchestrator: Orchestrator,
    conversation: Conversation,
}

impl Assistant {
    /// Build from command-line arguments.
    ///
    /// Precedence, lowest first: built-in defaults, TOML file, environment,
    /// command-line flags.
    pub fn from_args(args: &CliArgs) -> CliResult<Self> {
        let env = EnvironmentLoader::new(args.env_file.as_deref());
        let loader = ConfigurationLoader::new(args.config.as_deref())?;
        Self::from_config(loader.config, &env, args)
    }

    /// Build from an already loaded configuration.
    pub fn from_config(
        mut config: Configuration,
        env: &EnvironmentLoader,
        args: &CliArgs,
    ) -> CliResult<Self> {
        env.apply_to(&mut config.llm);

        if let Some(model) = &args.model {
            config.llm.model = model.clone();
        }
        if let Some(temperature) = args.temperature {
            config.llm.temperature = temperature;
        }
        let prompt = args
            .prompt
            .clone()
            .unwrap_or_else(|| config.assistant.system_prompt.clone());

        let provider = ProviderFactory::create(&config.llm, env)?;
        let registry = Arc::new(builtin_registry(&config.tools)?);

        let mut orchestrator =
            Orchestrator::new(provider, registry, RuntimeConfig::from(&config.execution));
        if let Some(log_file) = &config.logging.log_file {
            let logger = Logger::new(Some(Path::new(log_file)), Some(&config.logging.log_level))?;
            orchestrator = orchestrator.with_logger(Arc::new(logger));
        }

        let generate = GenerateConfig::new(config.llm.model.clone())
            .with_temperature(config.llm.temperature)
            .with_max_tokens(Some(config.llm.max_tokens));
        generate.validate().map_err(CliError::InvalidInput)?;

        let conversation = Conversation::new(config.assistant.name.clone(), prompt, generate);

        Ok(Self {
            orchestrator,
            conversation,
        })
    }

    /// The conversation held by this assistant.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Clear the conversation history.
    pub fn reset(&mut self) {
        self.conversation.reset();
    }

    /// Send one user message; Ctrl-C cancels the turn.
    pub async fn ask(&mut self, message: &str) -> CliResult<TurnOutcome> {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                trigger.cancel();
            }
        });

        let result = self
            .conversation
            .send(message, &self.orchestrator, &cancel)
            .await;
        watcher.abort();

        Ok(result?)
    }
}
