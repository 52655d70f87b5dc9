//! Unified API error handling
//!
//! Every handler returns `Result<T, ApiError>`; errors render as
//! [`ErrorResponse`] JSON with a matching status code.

use super::dto::ErrorResponse;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use narrative_application::{ClassifyClaimError, SinkError, SubmitFeedbackError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body missing, not JSON, or the wrong shape
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },

    /// Well-formed request with invalid values (422)
    #[error("{0}")]
    Validation(String),

    /// Model output could not be turned into a classification (500)
    #[error("{0}")]
    Classification(String),

    /// Generation server failed (500)
    #[error("{0}")]
    Generation(String),

    /// Feedback store failed (502)
    #[error("{0}")]
    Sink(String),

    /// Feature disabled by configuration (503)
    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody { status, .. } => *status,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Classification(_) | ApiError::Generation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Sink(_) => StatusCode::BAD_GATEWAY,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::InvalidBody { .. } => "invalid_body",
            ApiError::Validation(_) => "validation_error",
            ApiError::Classification(_) => "classification_error",
            ApiError::Generation(_) => "generation_error",
            ApiError::Sink(_) => "feedback_sink_error",
            ApiError::Unavailable(_) => "unavailable",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<ClassifyClaimError> for ApiError {
    fn from(e: ClassifyClaimError) -> Self {
        match e {
            ClassifyClaimError::InvalidClaim(_) => ApiError::Validation(e.to_string()),
            ClassifyClaimError::MalformedCompletion(_) => ApiError::Classification(e.to_string()),
            ClassifyClaimError::Generation(_) => ApiError::Generation(e.to_string()),
        }
    }
}

impl From<SubmitFeedbackError> for ApiError {
    fn from(e: SubmitFeedbackError) -> Self {
        match e {
            SubmitFeedbackError::Invalid(_) => ApiError::Validation(e.to_string()),
            SubmitFeedbackError::Sink(SinkError::NotConfigured) => {
                ApiError::Unavailable(e.to_string())
            }
            SubmitFeedbackError::Sink(_) => ApiError::Sink(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error_type = self.error_type(), status = status.as_u16(), "{}", self);
        } else {
            tracing::debug!(error_type = self.error_type(), status = status.as_u16(), "{}", self);
        }

        let body = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use narrative_application::GenerationError;
    use narrative_domain::DomainError;

    #[test]
    fn test_classify_error_statuses() {
        let invalid: ApiError = ClassifyClaimError::InvalidClaim(DomainError::EmptyClaim).into();
        assert_eq!(invalid.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let malformed: ApiError = ClassifyClaimError::MalformedCompletion(
            DomainError::MalformedCompletion { marker: "assistant" },
        )
        .into();
        assert_eq!(malformed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(malformed.error_type(), "classification_error");

        let generation: ApiError = ClassifyClaimError::Generation(GenerationError::Timeout).into();
        assert_eq!(generation.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_feedback_error_statuses() {
        let invalid: ApiError = SubmitFeedbackError::Invalid(DomainError::OutOfRangeCategory {
            field: "predicted_category",
            value: 9,
        })
        .into();
        assert_eq!(invalid.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(invalid.to_string().contains("predicted_category"));

        let rejected: ApiError =
            SubmitFeedbackError::Sink(SinkError::Rejected("bad row".to_string())).into();
        assert_eq!(rejected.status_code(), StatusCode::BAD_GATEWAY);

        let disabled: ApiError = SubmitFeedbackError::Sink(SinkError::NotConfigured).into();
        assert_eq!(disabled.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
