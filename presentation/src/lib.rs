//! Presentation layer for narrative-classifier
//!
//! This crate contains the HTTP API (routes, request/response bodies,
//! error mapping) and the CLI definition.

pub mod cli;
pub mod http;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use http::{ApiError, AppState, router, serve};
