//! Domain layer for narrative-classifier
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Taxonomy
//!
//! Eight fixed climate-narrative categories, coded 0-7. See [`Category`].
//!
//! ## Answer Protocol Codec
//!
//! [`AnswerCodec`] turns a [`Claim`] into a chat-formatted prompt and turns the
//! model's raw completion back into a [`ClassificationResult`]. It is pure and
//! stateless, so it can be tested with canned completions and no model at all.

pub mod classification;
pub mod config;
pub mod core;
pub mod feedback;
pub mod prompt;
pub mod taxonomy;

// Re-export commonly used types
pub use classification::{
    codec::AnswerCodec,
    parsing::{ROLE_MARKER, extract_category, isolate_answer},
    result::{ClassificationResult, DecodedAnswer},
};
pub use config::validation::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{claim::Claim, error::DomainError, model::ModelIdentity};
pub use feedback::FeedbackRecord;
pub use prompt::{ChatTemplate, ClassificationPrompt};
pub use taxonomy::Category;
