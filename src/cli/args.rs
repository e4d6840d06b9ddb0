//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

/// Chat with the Polaris component assistant
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "polaris-assist", version, about)]
pub struct CliArgs {
    /// TOML configuration file (defaults to config/assistant.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// .env file with OPENAI_* variables
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Override the system prompt
    #[arg(long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Sampling temperature
    #[arg(short, long, value_name = "F")]
    pub temperature: Option<f32>,

    /// Model identifier
    #[arg(short, long, value_name = "ID")]
    pub model: Option<String>,

    /// Ask a single question and exit
    #[arg(value_name = "MESSAGE")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_shot() {
        let args = CliArgs::parse_from([
            "polaris-assist",
            "--config",
            "custom.toml",
            "-t",
            "0.3",
            "--model",
            "gpt-4",
            "find me a button",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(args.temperature, Some(0.3));
        assert_eq!(args.model.as_deref(), Some("gpt-4"));
        assert_eq!(args.message.as_deref(), Some("find me a button"));
    }

    #[test]
    fn test_parse_interactive() {
        let args = CliArgs::parse_from(["polaris-assist"]);
        assert!(args.message.is_none());
        assert!(args.prompt.is_none());
    }
}
