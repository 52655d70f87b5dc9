//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod auth;
mod generation;
mod logging;
mod model;
mod server;
mod storage;
mod warehouse;

pub use auth::FileAuthConfig;
pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use model::FileModelConfig;
pub use server::FileServerConfig;
pub use storage::FileStorageConfig;
pub use warehouse::FileWarehouseConfig;

use narrative_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP listener
    pub server: FileServerConfig,
    /// Base model, adapter and prompt format
    pub model: FileModelConfig,
    /// Text generation server
    pub generation: FileGenerationConfig,
    /// Adapter weights bucket
    pub storage: FileStorageConfig,
    /// Feedback table
    pub warehouse: FileWarehouseConfig,
    /// Cloud credentials
    pub auth: FileAuthConfig,
    /// Log outputs
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.model.validate();

        // 1. URLs
        let urls = [
            ("generation.url", &self.generation.url),
            ("storage.endpoint", &self.storage.endpoint),
            ("warehouse.endpoint", &self.warehouse.endpoint),
            ("auth.metadata_endpoint", &self.auth.metadata_endpoint),
        ];
        for (field, value) in urls {
            if reqwest::Url::parse(value).is_err() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidUrl {
                        field: field.to_string(),
                        value: value.clone(),
                    },
                    format!("{}: '{}' is not a valid URL", field, value),
                ));
            }
        }

        // 2. Optional integrations
        if !self.storage.is_enabled() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingValue {
                    field: "storage.bucket".to_string(),
                },
                "storage.bucket is not configured; adapter weights will not be fetched",
            ));
        } else if self.model.adapter.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingValue {
                    field: "model.adapter".to_string(),
                },
                "model.adapter is empty; the whole bucket root would be fetched",
            ));
        }

        if !self.warehouse.is_enabled() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingValue {
                    field: "warehouse.project_id".to_string(),
                },
                "warehouse.project_id is not configured; feedback will be refused",
            ));
        } else {
            for (field, value) in [
                ("warehouse.dataset", &self.warehouse.dataset),
                ("warehouse.table", &self.warehouse.table),
            ] {
                if value.trim().is_empty() {
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::MissingValue {
                            field: field.to_string(),
                        },
                        format!("{} cannot be empty", field),
                    ));
                }
            }
        }

        for (field, value) in [
            ("auth.timeout_secs", self.auth.timeout_secs),
            ("auth.connect_timeout_secs", self.auth.connect_timeout_secs),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::OutOfRange {
                        field: field.to_string(),
                    },
                    format!("{} must be at least 1", field),
                ));
            }
        }

        if self.storage.concurrency == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "storage.concurrency".to_string(),
                },
                "storage.concurrency is 0; using 1",
            ));
        }

        issues
    }
}
