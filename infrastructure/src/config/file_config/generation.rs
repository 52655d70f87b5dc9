//! Text generation server configuration from TOML (`[generation]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Base URL of the text-generation-inference server
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Send the adapter name as `adapter_id` with each request
    pub use_adapter_id: bool,
    /// Strip chat-template special tokens from the echoed prompt
    pub skip_special_tokens: bool,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:3000".to_string(),
            timeout_secs: 120,
            use_adapter_id: true,
            skip_special_tokens: true,
        }
    }
}
