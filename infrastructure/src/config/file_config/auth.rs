//! Cloud credentials configuration from TOML (`[auth]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuthConfig {
    /// Environment variable holding an OAuth access token
    pub access_token_env: String,
    /// Direct access token (prefer the env var)
    pub access_token: Option<String>,
    /// Fall back to the metadata server when no token is given
    pub use_metadata_server: bool,
    /// Metadata server base URL
    pub metadata_endpoint: String,
    /// Whole-request timeout for Storage, BigQuery and metadata calls
    pub timeout_secs: u64,
    /// TCP connect timeout for the same calls
    pub connect_timeout_secs: u64,
}

impl Default for FileAuthConfig {
    fn default() -> Self {
        Self {
            access_token_env: "GOOGLE_OAUTH_ACCESS_TOKEN".to_string(),
            access_token: None,
            use_metadata_server: true,
            metadata_endpoint: "http://metadata.google.internal".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 5,
        }
    }
}
