use clap::Parser;
use tracing_subscriber::EnvFilter;

use polaris_assist::cli::{display_error_with_suggestions, run, CliArgs};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    if let Err(e) = run(args).await {
        display_error_with_suggestions(&e, "polaris-assist failed");
        std::process::exit(1);
    }
}
