//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod adapter_store;
pub mod feedback_sink;
pub mod prediction_logger;
pub mod text_generator;
