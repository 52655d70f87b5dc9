//! Prediction log port
//!
//! Every classification attempt is kept as a [`PredictionRecord`] so answers
//! can be reviewed and labeled later. This is separate from `tracing`, which
//! carries the operational logs.

use chrono::{DateTime, Utc};
use narrative_domain::{Category, Claim, ClassificationResult, ModelIdentity};
use serde::Serialize;

/// Outcome of one classification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionKind {
    /// The completion was parsed (with or without a category)
    Classification,
    /// The completion had no role marker
    MalformedCompletion,
}

/// One logged prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionRecord {
    pub kind: PredictionKind,
    pub timestamp: DateTime<Utc>,
    pub claim: String,
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub model: String,
    /// Raw model output, kept only when it could not be parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<String>,
}

impl PredictionRecord {
    pub fn classification(
        claim: &Claim,
        result: &ClassificationResult,
        model: &ModelIdentity,
    ) -> Self {
        Self {
            kind: PredictionKind::Classification,
            timestamp: Utc::now(),
            claim: claim.content().to_string(),
            category: result.category,
            explanation: Some(result.explanation.clone()),
            model: model.to_string(),
            completion: None,
        }
    }

    pub fn malformed_completion(claim: &Claim, completion: &str, model: &ModelIdentity) -> Self {
        Self {
            kind: PredictionKind::MalformedCompletion,
            timestamp: Utc::now(),
            claim: claim.content().to_string(),
            category: None,
            explanation: None,
            model: model.to_string(),
            completion: Some(completion.to_string()),
        }
    }
}

/// Destination for prediction records.
///
/// Recording never fails the request; implementations report their own
/// write errors.
pub trait PredictionLogger: Send + Sync {
    fn record(&self, record: &PredictionRecord);
}

/// Logger used when no prediction log is configured.
pub struct NoPredictionLogger;

impl PredictionLogger for NoPredictionLogger {
    fn record(&self, _record: &PredictionRecord) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim() -> Claim {
        Claim::new("The sun is causing warming").unwrap()
    }

    #[test]
    fn test_classification_record_json() {
        let result = ClassificationResult {
            category: Category::from_code(2),
            explanation: "blames the sun".to_string(),
        };
        let record = PredictionRecord::classification(
            &claim(),
            &result,
            &ModelIdentity::new("base").with_adapter("lora"),
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "classification");
        assert_eq!(json["category"], 2);
        assert_eq!(json["explanation"], "blames the sun");
        assert_eq!(json["model"], "base+lora");
        assert!(json.get("completion").is_none());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_malformed_record_keeps_completion() {
        let record =
            PredictionRecord::malformed_completion(&claim(), "3 no marker", &ModelIdentity::new("base"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "malformed_completion");
        assert!(json["category"].is_null());
        assert!(json.get("explanation").is_none());
        assert_eq!(json["completion"], "3 no marker");
    }
}
