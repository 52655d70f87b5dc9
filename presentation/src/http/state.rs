//! Shared handler state

use narrative_application::{ClassifyClaimUseCase, SubmitFeedbackUseCase, TextGenerator};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub classify: ClassifyClaimUseCase,
    pub feedback: SubmitFeedbackUseCase,
    /// Probed by `/health`
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        classify: ClassifyClaimUseCase,
        feedback: SubmitFeedbackUseCase,
    ) -> Self {
        Self {
            classify,
            feedback,
            generator,
        }
    }
}
