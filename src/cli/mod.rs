//! CLI feature - interactive front-end for the assistant
//!
//! Loads configuration, builds the provider, the built-in tool registry and
//! the orchestrator, then either answers a single message or runs a
//! read-eval-print loop over one in-memory conversation.
//!
//! # Example
//!
//! ```rust,ignore
//! use clap::Parser;
//! use polaris_assist::cli::{run, CliArgs};
//!
//! #[tokio::main]
//! async fn main() {
//!     let args = CliArgs::parse();
//!     run(args).await.unwrap();
//! }
//! ```

pub mod args;
pub mod assistant;
pub mod error;
pub mod session;
pub mod utils;

// Re-exports for convenience
pub use args::CliArgs;
pub use assistant::Assistant;
pub use error::{CliError, CliResult};
pub use session::{run, ReplCommand};
pub use utils::{display_error_with_suggestions, print_answer, truncate_with_ellipsis};
