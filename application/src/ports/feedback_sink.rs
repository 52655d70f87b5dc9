//! Feedback sink port
//!
//! Defines where labeled feedback records are appended.

use async_trait::async_trait;
use narrative_domain::FeedbackRecord;
use thiserror::Error;

/// Errors that can occur while appending feedback
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Record rejected: {0}")]
    Rejected(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Feedback sink not configured")]
    NotConfigured,
}

/// Append-only destination for feedback records
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// Append one record. Implementations must not retry.
    async fn append(&self, record: &FeedbackRecord) -> Result<(), SinkError>;
}
