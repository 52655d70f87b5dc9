//! API routes

use super::dto::{
    ClassifyRequest, ClassifyResponse, FeedbackRequest, HealthResponse, StatusResponse,
};
use super::error::ApiError;
use super::state::AppState;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use narrative_application::{ClassifyClaimInput, SubmitFeedbackInput};
use std::sync::Arc;
use tracing::warn;

type AppStateArc = Arc<AppState>;

// ============================================================================
// Status Routes
// ============================================================================

pub fn status_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
    })
}

async fn health(State(state): State<AppStateArc>) -> (StatusCode, Json<HealthResponse>) {
    let (status, code, generator) = match state.generator.health().await {
        Ok(()) => ("ok", StatusCode::OK, "ok".to_string()),
        Err(e) => {
            warn!("Generation server not ready: {}", e);
            ("unavailable", StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            model: state.generator.model().to_string(),
            generator,
        }),
    )
}

// ============================================================================
// Classification Routes
// ============================================================================

pub fn classification_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/classify", post(classify))
        .route("/feedback", post(feedback))
}

async fn classify(
    State(state): State<AppStateArc>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let Json(request) = payload?;
    let output = state
        .classify
        .execute(ClassifyClaimInput::new(request.user_claim))
        .await?;
    Ok(Json(output.into()))
}

async fn feedback(
    State(state): State<AppStateArc>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    let mut input = SubmitFeedbackInput::new(
        request.user_claim,
        request.predicted_category,
        request.correct_category,
    );
    if let Some(timestamp) = request.timestamp {
        input = input.with_timestamp(timestamp);
    }

    state.feedback.execute(input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::super::dto::ErrorResponse;
    use super::super::router;
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, header};
    use narrative_application::{
        ClassifyClaimUseCase, FeedbackSink, GenerationError, SinkError, SubmitFeedbackUseCase,
        TextGenerator,
    };
    use narrative_domain::{AnswerCodec, Category, ChatTemplate, FeedbackRecord, ModelIdentity};
    use std::sync::Mutex;
    use tower::ServiceExt;

    // ==================== Test Mocks ====================

    /// Echoes the prompt followed by a canned answer; `None` means unreachable
    struct CannedGenerator {
        model: ModelIdentity,
        answer: Option<String>,
        echo_prompt: bool,
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        fn model(&self) -> &ModelIdentity {
            &self.model
        }

        async fn generate(&self, prompt: &str, _max: u32) -> Result<String, GenerationError> {
            let answer = self
                .answer
                .clone()
                .ok_or_else(|| GenerationError::ConnectionError("refused".to_string()))?;
            Ok(if self.echo_prompt {
                format!("{}{}", prompt, answer)
            } else {
                answer
            })
        }

        async fn health(&self) -> Result<(), GenerationError> {
            match self.answer {
                Some(_) => Ok(()),
                None => Err(GenerationError::ConnectionError("refused".to_string())),
            }
        }
    }

    #[derive(Default)]
    struct MemorySink {
        records: Mutex<Vec<FeedbackRecord>>,
        disabled: bool,
    }

    #[async_trait]
    impl FeedbackSink for MemorySink {
        async fn append(&self, record: &FeedbackRecord) -> Result<(), SinkError> {
            if self.disabled {
                return Err(SinkError::NotConfigured);
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn app_with(answer: Option<&str>, echo_prompt: bool, sink: Arc<MemorySink>) -> Router {
        let generator: Arc<dyn TextGenerator> = Arc::new(CannedGenerator {
            model: ModelIdentity::new("base").with_adapter("lora"),
            answer: answer.map(str::to_string),
            echo_prompt,
        });
        let classify =
            ClassifyClaimUseCase::new(generator.clone(), AnswerCodec::new(ChatTemplate::Plain));
        let feedback = SubmitFeedbackUseCase::new(sink);
        router(AppState::new(generator, classify, feedback))
    }

    fn app(answer: &str) -> Router {
        app_with(Some(answer), true, Arc::new(MemorySink::default()))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ==================== Status ====================

    #[tokio::test]
    async fn test_root() {
        let response = app("1").oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: StatusResponse = body_json(response).await;
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn test_health_ready() {
        let response = app("1").oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: HealthResponse = body_json(response).await;
        assert_eq!(body.model, "base+lora");
        assert_eq!(body.generator, "ok");
    }

    #[tokio::test]
    async fn test_health_generator_down() {
        let app = app_with(None, true, Arc::new(MemorySink::default()));
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: HealthResponse = body_json(response).await;
        assert_eq!(body.status, "unavailable");
    }

    // ==================== Classify ====================

    #[tokio::test]
    async fn test_classify() {
        let response = app("Category: 3 - this denies human causation.")
            .oneshot(post_json("/classify", r#"{"user_claim": "It's the sun"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: ClassifyResponse = body_json(response).await;
        assert_eq!(
            body,
            ClassifyResponse {
                category: Some(Category::from_code(3).unwrap()),
                explanation: "- this denies human causation.".to_string(),
                model: "base+lora".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_classify_accepts_claim_alias() {
        let response = app("0")
            .oneshot(post_json("/classify", r#"{"claim": "Storms are normal"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = body_json(response).await;
        assert_eq!(body["category"], 0);
    }

    #[tokio::test]
    async fn test_classify_without_digit_has_null_category() {
        let response = app("I cannot tell.")
            .oneshot(post_json("/classify", r#"{"user_claim": "hmm"}"#))
            .await
            .unwrap();
        let body: serde_json::Value = body_json(response).await;
        assert!(body["category"].is_null());
        // Verbatim, including the whitespace after the role marker
        assert_eq!(body["explanation"], "\n\nI cannot tell.");
    }

    #[tokio::test]
    async fn test_classify_empty_claim_is_422() {
        let response = app("1")
            .oneshot(post_json("/classify", r#"{"user_claim": "   "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorResponse = body_json(response).await;
        assert_eq!(body.error, "validation_error");
    }

    #[tokio::test]
    async fn test_classify_missing_marker_is_500() {
        let app = app_with(Some("3 - no chat format"), false, Arc::new(MemorySink::default()));
        let response = app
            .oneshot(post_json("/classify", r#"{"user_claim": "x"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = body_json(response).await;
        assert_eq!(body.error, "classification_error");
        assert!(body.message.contains("assistant"));
    }

    #[tokio::test]
    async fn test_classify_generator_down_is_500() {
        let app = app_with(None, true, Arc::new(MemorySink::default()));
        let response = app
            .oneshot(post_json("/classify", r#"{"user_claim": "x"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = body_json(response).await;
        assert_eq!(body.error, "generation_error");
    }

    #[tokio::test]
    async fn test_classify_malformed_json_is_json_error() {
        let response = app("1")
            .oneshot(post_json("/classify", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = body_json(response).await;
        assert_eq!(body.error, "invalid_body");
    }

    // ==================== Feedback ====================

    #[tokio::test]
    async fn test_feedback_recorded() {
        let sink = Arc::new(MemorySink::default());
        let app = app_with(Some("1"), true, sink.clone());
        let response = app
            .oneshot(post_json(
                "/feedback",
                r#"{
                    "user_claim": "Glaciers are growing",
                    "predicted_category": 0,
                    "correct_category": 1,
                    "timestamp": "2025-03-01T12:00:00Z"
                }"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let records = sink.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].correct_category.code(), 1);
        assert_eq!(records[0].timestamp.to_rfc3339(), "2025-03-01T12:00:00+00:00");
    }

    #[tokio::test]
    async fn test_feedback_out_of_range_is_422() {
        let sink = Arc::new(MemorySink::default());
        let app = app_with(Some("1"), true, sink.clone());
        let response = app
            .oneshot(post_json(
                "/feedback",
                r#"{"user_claim": "x", "predicted_category": 9, "correct_category": 1}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(sink.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_feedback_missing_field_is_422() {
        let response = app("1")
            .oneshot(post_json("/feedback", r#"{"user_claim": "x", "predicted_category": 1}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorResponse = body_json(response).await;
        assert_eq!(body.error, "invalid_body");
    }

    #[tokio::test]
    async fn test_feedback_without_warehouse_is_503() {
        let sink = Arc::new(MemorySink {
            disabled: true,
            ..Default::default()
        });
        let response = app_with(Some("1"), true, sink)
            .oneshot(post_json(
                "/feedback",
                r#"{"user_claim": "x", "predicted_category": 1, "correct_category": 1}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
