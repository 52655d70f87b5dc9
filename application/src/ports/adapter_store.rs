//! Adapter store port
//!
//! Defines the object store holding fine-tuned adapter weights.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while talking to the adapter store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only access to an object store
#[async_trait]
pub trait AdapterStore: Send + Sync {
    /// Human-readable location (e.g. `gs://bucket`) for logs
    fn location(&self) -> String;

    /// List object names directly under `prefix` (not recursive)
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    /// Download one object to `destination`, returning the number of bytes written
    async fn download(&self, name: &str, destination: &Path) -> Result<u64, StoreError>;
}
