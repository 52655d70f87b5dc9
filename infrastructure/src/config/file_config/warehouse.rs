//! Feedback warehouse configuration from TOML (`[warehouse]` section)

use serde::{Deserialize, Serialize};

/// BigQuery table receiving feedback records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWarehouseConfig {
    /// Cloud project id (also read from `$GCP_PROJECT_ID`); empty disables feedback
    pub project_id: String,
    pub dataset: String,
    pub table: String,
    /// BigQuery REST endpoint
    pub endpoint: String,
}

impl Default for FileWarehouseConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "climate_narratives".to_string(),
            table: "feedback".to_string(),
            endpoint: "https://bigquery.googleapis.com".to_string(),
        }
    }
}

impl FileWarehouseConfig {
    pub fn is_enabled(&self) -> bool {
        !self.project_id.trim().is_empty()
    }
}
