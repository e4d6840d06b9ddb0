//! Terminal output helpers

use colored::*;

use crate::orchestration::TurnOutcome;

/// Display a user-friendly error message with suggestions
pub fn display_error_with_suggestions<E: std::fmt::Display>(error: &E, context: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), context);
    eprintln!("   {}", error.to_string().red());

    // Provide contextual suggestions based on error type
    let error_str = error.to_string().to_lowercase();
    if error_str.contains("api key") || error_str.contains("http 401") {
        eprintln!("{}", "💡 Suggestions:".blue());
        eprintln!("   • Set OPENAI_API_KEY in the environment or a .env file");
        eprintln!("   • For Azure, also set OPENAI_API_TYPE=azure and AZURE_DEPLOYMENT_ID");
    } else if error_str.contains("deployment") {
        eprintln!("{}", "💡 Suggestions:".blue());
        eprintln!("   • Set AZURE_DEPLOYMENT_ID or llm.deployment_id in the config file");
    } else if error_str.contains("config file not found") {
        eprintln!("{}", "💡 Suggestions:".blue());
        eprintln!("   • Check the --config path");
        eprintln!("   • Omit --config to use config/assistant.toml or built-in defaults");
    } else if error_str.contains("timed out")
        || error_str.contains("connection")
        || error_str.contains("transport")
    {
        eprintln!("{}", "💡 Suggestions:".blue());
        eprintln!("   • Check OPENAI_API_HOST and your network connection");
        eprintln!("   • Raise llm.timeout_seconds or execution.completion_timeout_seconds");
    } else if error_str.contains("tool call limit") {
        eprintln!("{}", "💡 Suggestions:".blue());
        eprintln!("   • Rephrase the question or raise execution.max_tool_calls");
    }
}

/// Print the answer of a turn, preceded by the tools it used
pub fn print_answer(outcome: &TurnOutcome) {
    for call in &outcome.tool_calls {
        let marker = if call.success { "✓".green() } else { "✗".red() };
        println!(
            "{} {} {}",
            marker,
            call.tool_name.cyan(),
            truncate_with_ellipsis(&call.arguments, 60).dimmed()
        );
    }
    println!("{}", outcome.answer);
}

/// Truncate text with ellipsis if it exceeds max length in characters
pub fn truncate_with_ellipsis(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("a longer line of text", 10), "a longe...");
        assert_eq!(truncate_with_ellipsis("ééééééé", 5), "éé...");
    }
}
