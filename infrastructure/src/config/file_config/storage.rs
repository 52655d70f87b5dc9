//! Adapter storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};

/// Cloud Storage bucket holding adapter weights
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Bucket name (also read from `$GCS_BUCKET_NAME`); empty disables the fetch
    pub bucket: String,
    /// Cloud Storage JSON API endpoint
    pub endpoint: String,
    /// Local directory the adapter is downloaded into
    pub destination_dir: String,
    /// Maximum concurrent object downloads
    pub concurrency: usize,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            endpoint: "https://storage.googleapis.com".to_string(),
            destination_dir: "adapters".to_string(),
            concurrency: 4,
        }
    }
}

impl FileStorageConfig {
    pub fn is_enabled(&self) -> bool {
        !self.bucket.trim().is_empty()
    }
}
