//! Markdown session log for assistant turns.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::types::{Message, Role};

/// Logger for conversation turns, completion requests, and tool executions.
///
/// Each entry is appended to a markdown file and mirrored as a `tracing`
/// event, so the same run can be read back as a document or followed live
/// with `RUST_LOG`.
#[derive(Debug)]
pub struct Logger {
    log_file: PathBuf,
    log_level: String,
    // Serializes appends from concurrent conversations sharing one logger.
    write_lock: Mutex<()>,
}

impl Logger {
    /// Initialize logger.
    ///
    /// # Arguments
    /// * `log_file` - Path to log file. If None, creates a timestamped file in temp directory.
    /// * `log_level` - Logging level (defaults to "INFO").
    pub fn new(log_file: Option<&Path>, log_level: Option<&str>) -> Result<Self> {
        let log_file = match log_file {
            Some(p) => p.to_path_buf(),
            None => {
                let mut dir = std::env::temp_dir();
                dir.push("polaris-assist-logs");
                let filename = format!(
                    "session_{}_{}.md",
                    Utc::now().timestamp_millis(),
                    std::process::id()
                );
                dir.join(filename)
            }
        };

        if let Some(parent) = log_file.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }

        let logger = Self {
            log_file,
            log_level: log_level.unwrap_or("INFO").to_uppercase(),
            write_lock: Mutex::new(()),
        };

        if !logger.log_file.exists() {
            logger.initialize_log_file()?;
        }

        Ok(logger)
    }

    fn initialize_log_file(&self) -> Result<()> {
        let mut file = File::create(&self.log_file)
            .with_context(|| format!("Failed to create log file: {}", self.log_file.display()))?;

        let now: DateTime<Utc> = Utc::now();

        writeln!(file, "# Assistant Session Log\n")?;
        writeln!(file, "Log started: {}\n", now.to_rfc3339())?;
        writeln!(file, "---\n")?;

        Ok(())
    }

    fn append_to_log(&self, content: &str) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("Log writer lock poisoned"))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .with_context(|| format!("Failed to open log file: {}", self.log_file.display()))?;

        write!(file, "{}", content).with_context(|| "Failed to write to log file")?;

        Ok(())
    }

    fn is_debug(&self) -> bool {
        matches!(self.log_level.as_str(), "DEBUG" | "TRACE")
    }

    /// Log the start of a conversation turn.
    ///
    /// # Arguments
    /// * `conversation_id` - Identifier of the conversation the turn belongs to.
    /// * `user_message` - The user input that opened the turn.
    pub fn log_turn_start(&self, conversation_id: &str, user_message: &str) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let content = format!(
            "## Turn Started - {}\n\n**Conversation:** {}\n\n**User:**\n```\n{}\n```\n\n",
            now.to_rfc3339(),
            conversation_id,
            user_message
        );

        self.append_to_log(&content)?;
        tracing::info!(conversation = conversation_id, "turn started");
        Ok(())
    }

    /// Log a completion request.
    ///
    /// In DEBUG mode the full request messages are written; otherwise only a
    /// per-role summary.
    pub fn log_completion_request(&self, messages: &[Message], model: &str) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();

        let body = if self.is_debug() {
            let json = serde_json::to_string_pretty(messages)
                .unwrap_or_else(|_| format!("[{} messages]", messages.len()));
            format!("**Messages:**\n```json\n{}\n```\n\n", json)
        } else {
            let count = |role: Role| messages.iter().filter(|m| m.role == role).count();
            format!(
                "**Messages:** {} total ({} user, {} assistant, {} function)\n\n",
                messages.len(),
                count(Role::User),
                count(Role::Assistant),
                count(Role::Function)
            )
        };

        let content = format!(
            "### Completion Request - {}\n\n**Model:** {}\n\n{}",
            now.to_rfc3339(),
            model,
            body
        );

        self.append_to_log(&content)?;
        tracing::debug!(model, messages = messages.len(), "completion request logged");
        Ok(())
    }

    /// Log tool execution with detailed results.
    ///
    /// # Arguments
    /// * `tool_name` - Name of the tool executed.
    /// * `tool_args` - Raw arguments passed to the tool.
    /// * `result` - Content folded into the transcript.
    /// * `success` - Whether the tool execution was successful.
    pub fn log_tool_execution(
        &self,
        tool_name: &str,
        tool_args: &str,
        result: &str,
        success: bool,
    ) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let status = if success { "Result" } else { "Error" };

        let content = format!(
            "### Tool Execution - {}\n\n**Tool:** {}\n**Args:** {}\n**{}:**\n```\n{}\n```\n\n",
            now.to_rfc3339(),
            tool_name,
            if tool_args.is_empty() { "(none)" } else { tool_args },
            status,
            result
        );

        self.append_to_log(&content)?;
        if success {
            tracing::info!(tool = tool_name, bytes = result.len(), "tool executed");
        } else {
            tracing::warn!(tool = tool_name, "tool failed: {}", result);
        }
        Ok(())
    }

    /// Log the final answer of a turn.
    pub fn log_answer(&self, answer: &str, tool_calls: usize) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let content = format!(
            "### Answer - {}\n\n**Tool calls:** {}\n\n```\n{}\n```\n\n---\n\n",
            now.to_rfc3339(),
            tool_calls,
            answer
        );

        self.append_to_log(&content)?;
        tracing::info!(tool_calls, "turn answered");
        Ok(())
    }

    /// Log error with context.
    pub fn log_error(&self, error: &str, context: Option<&str>) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let mut content = format!("### Error - {}\n\n**Error:** {}\n\n", now.to_rfc3339(), error);

        if let Some(ctx) = context {
            content.push_str(&format!("**Context:** {}\n\n", ctx));
        }

        self.append_to_log(&content)?;
        tracing::error!(context = context.unwrap_or(""), "{}", error);
        Ok(())
    }

    /// Get the log file path.
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Get the log level.
    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}
