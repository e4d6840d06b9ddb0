//! Observability utilities for the assistant.
//!
//! This module provides a markdown session log whose entries are mirrored as
//! `tracing` events.
//!
//! # Example
//!
//! ```no_run
//! use polaris_assist::observability::Logger;
//!
//! let logger = Logger::new(None, Some("DEBUG")).unwrap();
//! logger.log_turn_start("conversation-1", "find me a button").unwrap();
//! logger.log_answer("Here is a Button component.", 1).unwrap();
//! ```

pub mod logger;

// Re-export main types for convenience
pub use logger::Logger;
