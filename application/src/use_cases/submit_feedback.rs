//! Submit Feedback use case.
//!
//! Validates a user's correction of a prediction and appends it to the
//! [`FeedbackSink`] exactly once.

use crate::ports::feedback_sink::{FeedbackSink, SinkError};
use chrono::{DateTime, Utc};
use narrative_domain::{DomainError, FeedbackRecord};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while submitting feedback.
#[derive(Error, Debug)]
pub enum SubmitFeedbackError {
    #[error("Invalid feedback: {0}")]
    Invalid(#[from] DomainError),

    #[error("Could not store feedback: {0}")]
    Sink(#[from] SinkError),
}

/// Input for the [`SubmitFeedbackUseCase`].
///
/// Category codes are raw integers so out-of-range values reach validation.
#[derive(Debug, Clone)]
pub struct SubmitFeedbackInput {
    pub user_claim: String,
    pub predicted_category: i64,
    pub correct_category: i64,
    /// Defaults to the time of submission.
    pub timestamp: Option<DateTime<Utc>>,
}

impl SubmitFeedbackInput {
    pub fn new(user_claim: impl Into<String>, predicted_category: i64, correct_category: i64) -> Self {
        Self {
            user_claim: user_claim.into(),
            predicted_category,
            correct_category,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Use case for recording feedback on a prediction.
#[derive(Clone)]
pub struct SubmitFeedbackUseCase {
    sink: Arc<dyn FeedbackSink>,
}

impl SubmitFeedbackUseCase {
    pub fn new(sink: Arc<dyn FeedbackSink>) -> Self {
        Self { sink }
    }

    /// Validate and append. Returns the stored record.
    pub async fn execute(
        &self,
        input: SubmitFeedbackInput,
    ) -> Result<FeedbackRecord, SubmitFeedbackError> {
        let timestamp = input.timestamp.unwrap_or_else(Utc::now);
        let record = FeedbackRecord::new(
            timestamp,
            &input.user_claim,
            input.predicted_category,
            input.correct_category,
        )
        .inspect_err(|e| warn!("Rejected feedback: {}", e))?;

        self.sink.append(&record).await.inspect_err(|e| {
            warn!("Feedback sink rejected record: {}", e);
        })?;

        info!(
            predicted = record.predicted_category.code(),
            correct = record.correct_category.code(),
            "Feedback recorded"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use narrative_domain::Category;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    #[derive(Default)]
    struct MemorySink {
        records: Mutex<Vec<FeedbackRecord>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl FeedbackSink for MemorySink {
        async fn append(&self, record: &FeedbackRecord) -> Result<(), SinkError> {
            if let Some(reason) = &self.fail_with {
                return Err(SinkError::Rejected(reason.clone()));
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_valid_feedback_appended_once() {
        let sink = Arc::new(MemorySink::default());
        let use_case = SubmitFeedbackUseCase::new(sink.clone());
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();

        let record = use_case
            .execute(SubmitFeedbackInput::new("It's just a natural cycle", 0, 2).with_timestamp(at))
            .await
            .unwrap();

        assert_eq!(record.timestamp, at);
        assert_eq!(record.correct_category, Category::AttributionDenial);

        let records = sink.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], record);
    }

    #[tokio::test]
    async fn test_out_of_range_never_reaches_sink() {
        let sink = Arc::new(MemorySink::default());
        let use_case = SubmitFeedbackUseCase::new(sink.clone());

        for correct in [0, 3, 7, 99] {
            let err = use_case
                .execute(SubmitFeedbackInput::new("claim", 9, correct))
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                SubmitFeedbackError::Invalid(DomainError::OutOfRangeCategory {
                    field: "predicted_category",
                    value: 9
                })
            ));
        }

        let err = use_case
            .execute(SubmitFeedbackInput::new("claim", 1, 8))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("correct_category"));

        assert!(sink.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_claim_rejected() {
        let sink = Arc::new(MemorySink::default());
        let use_case = SubmitFeedbackUseCase::new(sink.clone());
        let err = use_case
            .execute(SubmitFeedbackInput::new("  ", 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitFeedbackError::Invalid(DomainError::EmptyClaim)));
    }

    #[tokio::test]
    async fn test_sink_failure_surfaces() {
        let sink = Arc::new(MemorySink {
            fail_with: Some("table not found".to_string()),
            ..Default::default()
        });
        let use_case = SubmitFeedbackUseCase::new(sink);
        let err = use_case
            .execute(SubmitFeedbackInput::new("claim", 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitFeedbackError::Sink(SinkError::Rejected(_))));
        assert!(err.to_string().contains("table not found"));
    }
}
