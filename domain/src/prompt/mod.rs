//! Prompt domain
//!
//! The classification prompt (taxonomy system message + claim user message) and
//! the chat templates that combine them into a single generation input.

mod chat;
mod template;

pub use chat::ChatTemplate;
pub use template::ClassificationPrompt;
