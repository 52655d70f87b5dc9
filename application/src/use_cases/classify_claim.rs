//! Classify Claim use case.
//!
//! Prompts the model with a claim and parses its answer into a
//! [`ClassificationResult`]. One generation call per request, no retries.

use crate::config::ClassifierParams;
use crate::ports::prediction_logger::{NoPredictionLogger, PredictionLogger, PredictionRecord};
use crate::ports::text_generator::{GenerationError, TextGenerator};
use narrative_domain::{
    AnswerCodec, Category, Claim, ClassificationResult, DomainError, ModelIdentity,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while classifying a claim.
#[derive(Error, Debug)]
pub enum ClassifyClaimError {
    #[error("Invalid claim: {0}")]
    InvalidClaim(DomainError),

    #[error("Error during generation: {0}")]
    Generation(#[from] GenerationError),

    #[error("{0}")]
    MalformedCompletion(DomainError),
}

/// Input for the [`ClassifyClaimUseCase`].
#[derive(Debug, Clone)]
pub struct ClassifyClaimInput {
    /// The claim as received; trimmed and validated by the use case.
    pub user_claim: String,
}

impl ClassifyClaimInput {
    pub fn new(user_claim: impl Into<String>) -> Self {
        Self {
            user_claim: user_claim.into(),
        }
    }
}

/// Output of the [`ClassifyClaimUseCase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyClaimOutput {
    pub result: ClassificationResult,
    pub model: ModelIdentity,
}

/// Use case for classifying a single claim.
///
/// 1. Validate the claim
/// 2. Encode it into a prompt with the [`AnswerCodec`]
/// 3. Generate a completion
/// 4. Decode the completion; a missing role marker fails the request
#[derive(Clone)]
pub struct ClassifyClaimUseCase {
    generator: Arc<dyn TextGenerator>,
    codec: AnswerCodec,
    params: ClassifierParams,
    prediction_logger: Arc<dyn PredictionLogger>,
}

impl ClassifyClaimUseCase {
    pub fn new(generator: Arc<dyn TextGenerator>, codec: AnswerCodec) -> Self {
        Self {
            generator,
            codec,
            params: ClassifierParams::default(),
            prediction_logger: Arc::new(NoPredictionLogger),
        }
    }

    pub fn with_params(mut self, params: ClassifierParams) -> Self {
        self.params = params;
        self
    }

    /// Create with a prediction logger.
    pub fn with_prediction_logger(mut self, logger: Arc<dyn PredictionLogger>) -> Self {
        self.prediction_logger = logger;
        self
    }

    pub fn model(&self) -> &ModelIdentity {
        self.generator.model()
    }

    pub async fn execute(
        &self,
        input: ClassifyClaimInput,
    ) -> Result<ClassifyClaimOutput, ClassifyClaimError> {
        let claim = Claim::new(&input.user_claim).map_err(ClassifyClaimError::InvalidClaim)?;
        let model = self.generator.model().clone();

        info!(model = %model, "Classifying claim ({} chars)", claim.content().len());

        let prompt = self.codec.encode(&claim);
        debug!(template = %self.codec.template(), "Prompt: {}", prompt);

        let completion = self
            .generator
            .generate(&prompt, self.params.max_new_tokens)
            .await?;
        debug!("Completion: {}", completion);

        let result = match self.codec.decode(&completion) {
            Ok(decoded) => {
                if let Some(code) = decoded.category_code
                    && code > Category::MAX_CODE
                {
                    warn!(code, "Model answered with a code outside the taxonomy");
                }
                ClassificationResult::from(decoded)
            }
            Err(e) => {
                warn!("Could not parse completion: {}", e);
                self.prediction_logger
                    .record(&PredictionRecord::malformed_completion(&claim, &completion, &model));
                return Err(ClassifyClaimError::MalformedCompletion(e));
            }
        };

        match result.category {
            Some(category) => info!(category = category.code(), "Claim classified"),
            None => info!("Model gave no category for the claim"),
        }

        self.prediction_logger
            .record(&PredictionRecord::classification(&claim, &result, &model));

        Ok(ClassifyClaimOutput { result, model })
    }
}
