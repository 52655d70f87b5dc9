//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily-rolling operation logs, in addition to stderr
    pub dir: Option<String>,
    /// JSONL file recording every prediction
    pub predictions_file: Option<String>,
}
