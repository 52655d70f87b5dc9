//! Answer protocol codec.
//!
//! `encode` builds the prompt for a claim, `decode` parses the completion the
//! generation service returns for it. Both are pure functions of their input
//! and the configured [`ChatTemplate`], so one codec is shared by every
//! request without locking.

use super::parsing::{extract_category, isolate_answer};
use super::result::{ClassificationResult, DecodedAnswer};
use crate::core::claim::Claim;
use crate::core::error::DomainError;
use crate::prompt::{ChatTemplate, ClassificationPrompt};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerCodec {
    template: ChatTemplate,
}

impl AnswerCodec {
    pub fn new(template: ChatTemplate) -> Self {
        Self { template }
    }

    pub fn template(&self) -> ChatTemplate {
        self.template
    }

    /// Build the formatted prompt for a claim.
    pub fn encode(&self, claim: &Claim) -> String {
        self.template.render(
            &ClassificationPrompt::system(),
            &ClassificationPrompt::user(claim.content()),
        )
    }

    /// Parse a raw completion (prompt echo + answer) into a code and explanation.
    ///
    /// # Errors
    ///
    /// [`DomainError::MalformedCompletion`] when the role marker is missing.
    /// An answer without a digit is not an error.
    pub fn decode(&self, raw_completion: &str) -> Result<DecodedAnswer, DomainError> {
        let answer = isolate_answer(raw_completion)?;
        Ok(extract_category(answer))
    }

    /// [`decode`](Self::decode) followed by validation against the taxonomy.
    pub fn classify(&self, raw_completion: &str) -> Result<ClassificationResult, DomainError> {
        self.decode(raw_completion).map(ClassificationResult::from)
    }
}
