//! Single-shot and interactive sessions

use colored::*;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cli::args::CliArgs;
use crate::cli::assistant::Assistant;
use crate::cli::error::CliResult;
use crate::cli::utils::{display_error_with_suggestions, print_answer};

/// Slash commands understood by the interactive loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    /// Clear the conversation history
    Reset,
    /// Print the serialized transcript
    Transcript,
    /// Leave the loop
    Quit,
    /// List commands
    Help,
}

impl ReplCommand {
    /// Parse a line starting with `/`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "/reset" => Some(ReplCommand::Reset),
            "/transcript" => Some(ReplCommand::Transcript),
            "/quit" | "/exit" => Some(ReplCommand::Quit),
            "/help" => Some(ReplCommand::Help),
            _ => None,
        }
    }
}

/// Run the CLI: one turn when a message was given, otherwise a REPL.
pub async fn run(args: CliArgs) -> CliResult<()> {
    let mut assistant = Assistant::from_args(&args)?;

    match &args.message {
        Some(message) => {
            let outcome = assistant.ask(message).await?;
            print_answer(&outcome);
            Ok(())
        }
        None => interactive(&mut assistant).await,
    }
}

async fn interactive(assistant: &mut Assistant) -> CliResult<()> {
    let conversation = assistant.conversation();
    println!(
        "{} {} ({})",
        "🤖".blue(),
        conversation.name().bold(),
        conversation.model().dimmed()
    );
    println!("{}", "Type /help for commands.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('/') {
            match ReplCommand::parse(line) {
                Some(ReplCommand::Quit) => break,
                Some(ReplCommand::Reset) => {
                    assistant.reset();
                    println!("{}", "Conversation cleared.".green());
                }
                Some(ReplCommand::Transcript) => {
                    let json = serde_json::to_string_pretty(assistant.conversation().transcript())?;
                    println!("{}", json);
                }
                Some(ReplCommand::Help) => {
                    println!("/reset       clear the conversation");
                    println!("/transcript  print the transcript as JSON");
                    println!("/quit        exit");
                }
                None => println!("{} {}", "Unknown command:".yellow(), line),
            }
            continue;
        }

        match assistant.ask(line).await {
            Ok(outcome) => print_answer(&outcome),
            Err(e) => display_error_with_suggestions(&e, "turn failed"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("/reset"), Some(ReplCommand::Reset));
        assert_eq!(ReplCommand::parse(" /transcript "), Some(ReplCommand::Transcript));
        assert_eq!(ReplCommand::parse("/exit"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("/nope"), None);
    }
}
