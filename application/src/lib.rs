//! Application layer for narrative-classifier
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ClassifierParams;
pub use ports::{
    adapter_store::{AdapterStore, StoreError},
    feedback_sink::{FeedbackSink, SinkError},
    prediction_logger::{NoPredictionLogger, PredictionKind, PredictionLogger, PredictionRecord},
    text_generator::{GenerationError, TextGenerator},
};
pub use use_cases::classify_claim::{
    ClassifyClaimError, ClassifyClaimInput, ClassifyClaimOutput, ClassifyClaimUseCase,
};
pub use use_cases::prepare_adapter::{
    PrepareAdapterError, PrepareAdapterInput, PrepareAdapterUseCase, PreparedAdapter,
};
pub use use_cases::submit_feedback::{
    SubmitFeedbackError, SubmitFeedbackInput, SubmitFeedbackUseCase,
};
