//! Classifier parameters: generation control for [`ClassifyClaimUseCase`].
//!
//! [`ClassifyClaimUseCase`]: crate::use_cases::classify_claim::ClassifyClaimUseCase

/// Parameters passed to the text generation service with every claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierParams {
    /// Maximum number of tokens the model may generate for an answer.
    pub max_new_tokens: u32,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 128,
        }
    }
}

impl ClassifierParams {
    pub fn with_max_new_tokens(mut self, max: u32) -> Self {
        self.max_new_tokens = max;
        self
    }
}
