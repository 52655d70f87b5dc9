//! Prediction log writers.
//!
//! Provides [`JsonlPredictionLogger`], a JSONL file writer that implements
//! the [`PredictionLogger`](narrative_application::PredictionLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlPredictionLogger;
