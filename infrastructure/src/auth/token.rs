//! OAuth access token source
//!
//! Resolution order: a token given in config, a token in the configured
//! environment variable, the instance metadata server, or no token at all
//! (public buckets only).

use crate::config::FileAuthConfig;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use thiserror::Error;
use std::time::Duration as StdDuration;
use tokio::sync::Mutex;
use tracing::debug;

/// Tokens are refreshed this long before they expire
const EXPIRY_MARGIN_SECS: i64 = 60;

const METADATA_TOKEN_PATH: &str =
    "/computeMetadata/v1/instance/service-accounts/default/token";

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Metadata server unreachable: {0}")]
    Unreachable(String),

    #[error("Metadata server returned HTTP {0}")]
    Status(u16),

    #[error("Invalid token response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenMode {
    Static(String),
    MetadataServer { endpoint: String },
    Anonymous,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
    expires_in: i64,
}

/// HTTP client shared by the metadata server, Storage and BigQuery calls
pub fn cloud_http_client(config: &FileAuthConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(StdDuration::from_secs(config.connect_timeout_secs))
        .timeout(StdDuration::from_secs(config.timeout_secs))
        .build()
}

/// Supplies bearer tokens for Google Cloud REST calls
pub struct AccessTokenSource {
    client: reqwest::Client,
    mode: TokenMode,
    cached: Mutex<Option<CachedToken>>,
}

impl AccessTokenSource {
    pub fn from_config(config: &FileAuthConfig, client: reqwest::Client) -> Self {
        let from_env = std::env::var(&config.access_token_env)
            .ok()
            .filter(|t| !t.trim().is_empty());

        let mode = match (config.access_token.clone(), from_env) {
            (Some(token), _) if !token.trim().is_empty() => TokenMode::Static(token),
            (_, Some(token)) => TokenMode::Static(token),
            _ if config.use_metadata_server => TokenMode::MetadataServer {
                endpoint: config.metadata_endpoint.trim_end_matches('/').to_string(),
            },
            _ => TokenMode::Anonymous,
        };

        Self {
            client,
            mode,
            cached: Mutex::new(None),
        }
    }

    /// A source that never sends credentials
    pub fn anonymous() -> Self {
        Self {
            client: reqwest::Client::new(),
            mode: TokenMode::Anonymous,
            cached: Mutex::new(None),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self.mode {
            TokenMode::Static(_) => "static token",
            TokenMode::MetadataServer { .. } => "metadata server",
            TokenMode::Anonymous => "anonymous",
        }
    }

    /// Current token, fetching or refreshing it when needed
    pub async fn token(&self) -> Result<Option<String>, TokenError> {
        match &self.mode {
            TokenMode::Static(token) => Ok(Some(token.clone())),
            TokenMode::Anonymous => Ok(None),
            TokenMode::MetadataServer { endpoint } => {
                if let Some(token) = self.cached.lock().await.as_ref()
                    && token.expires_at > Utc::now()
                {
                    return Ok(Some(token.value.clone()));
                }

                // Lock released during the fetch; concurrent misses may each refresh
                let fresh = self.fetch_metadata_token(endpoint).await?;
                let value = fresh.value.clone();
                *self.cached.lock().await = Some(fresh);
                Ok(Some(value))
            }
        }
    }

    /// Attach the bearer token to a request, if there is one
    pub async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, TokenError> {
        Ok(match self.token().await? {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn fetch_metadata_token(&self, endpoint: &str) -> Result<CachedToken, TokenError> {
        debug!("Fetching access token from metadata server");
        let response = self
            .client
            .get(format!("{}{}", endpoint, METADATA_TOKEN_PATH))
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| TokenError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TokenError::Status(status.as_u16()));
        }

        let token: MetadataToken = response
            .json()
            .await
            .map_err(|e| TokenError::InvalidResponse(e.to_string()))?;

        Ok(cache_entry(token, Utc::now()))
    }
}

fn cache_entry(token: MetadataToken, now: DateTime<Utc>) -> CachedToken {
    let lifetime = (token.expires_in - EXPIRY_MARGIN_SECS).max(0);
    CachedToken {
        value: token.access_token,
        expires_at: now + Duration::seconds(lifetime),
    }
}
