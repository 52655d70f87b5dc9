//! Text generation port
//!
//! Defines the interface for the service that runs the language model.

use async_trait::async_trait;
use narrative_domain::ModelIdentity;
use thiserror::Error;

/// Errors that can occur while generating text
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Text generation capability
///
/// Implementations return the formatted prompt followed by the generated
/// answer, as one string, without further post-processing.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// The model answering requests
    fn model(&self) -> &ModelIdentity;

    /// Generate a completion for an already formatted prompt
    async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String, GenerationError>;

    /// Check that the service is reachable and ready
    async fn health(&self) -> Result<(), GenerationError> {
        Ok(())
    }
}
