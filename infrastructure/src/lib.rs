//! Infrastructure layer for narrative-classifier
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod auth;
pub mod config;
pub mod generation;
pub mod logging;
pub mod storage;
pub mod warehouse;

// Re-export commonly used types
pub use auth::{AccessTokenSource, TokenError, cloud_http_client};
pub use config::{
    ConfigLoader, FileAuthConfig, FileConfig, FileGenerationConfig, FileLoggingConfig,
    FileModelConfig, FileServerConfig, FileStorageConfig, FileWarehouseConfig,
};
pub use generation::TgiTextGenerator;
pub use logging::JsonlPredictionLogger;
pub use storage::GcsAdapterStore;
pub use warehouse::{BigQueryFeedbackSink, DisabledFeedbackSink};
