//! Request and response bodies

use chrono::{DateTime, Utc};
use narrative_application::ClassifyClaimOutput;
use narrative_domain::Category;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    #[serde(alias = "claim")]
    pub user_claim: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifyResponse {
    /// Taxonomy code, or null when the model gave none
    pub category: Option<Category>,
    pub explanation: String,
    pub model: String,
}

impl From<ClassifyClaimOutput> for ClassifyResponse {
    fn from(output: ClassifyClaimOutput) -> Self {
        Self {
            category: output.result.category,
            explanation: output.result.explanation,
            model: output.model.to_string(),
        }
    }
}

/// Codes are taken as raw integers and range-checked by the use case
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub user_claim: String,
    pub predicted_category: i64,
    pub correct_category: i64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: String,
    /// "ok", or the reason the generation server is not ready
    pub generator: String,
}

/// Body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
}
