//! Core transcript and tool types shared by every other module.
//!
//! These types mirror the wire shape used by chat-completion providers with
//! function calling, so a [`Transcript`] can be replayed verbatim on each
//! completion request and serialized back to the caller at the end of a turn.

pub mod generate;
pub mod message;
pub mod tools;

pub use generate::GenerateConfig;
pub use message::{FunctionCall, Message, MessageError, Role, Transcript};
pub use tools::{ArgumentError, ToolDescriptor, ToolOutput};
