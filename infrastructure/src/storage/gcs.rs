//! Cloud Storage adapter store
//!
//! Uses the JSON API directly: `GET /storage/v1/b/{bucket}/o` to list and
//! `GET /storage/v1/b/{bucket}/o/{object}?alt=media` to download.

use crate::auth::AccessTokenSource;
use crate::config::FileStorageConfig;
use async_trait::async_trait;
use narrative_application::ports::adapter_store::{AdapterStore, StoreError};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectList {
    #[serde(default)]
    items: Vec<ObjectEntry>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectEntry {
    name: String,
}

/// [`AdapterStore`] over one Cloud Storage bucket
pub struct GcsAdapterStore {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
    tokens: Arc<AccessTokenSource>,
}

impl GcsAdapterStore {
    pub fn new(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        client: reqwest::Client,
        tokens: Arc<AccessTokenSource>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            tokens,
        }
    }

    pub fn from_config(
        config: &FileStorageConfig,
        client: reqwest::Client,
        tokens: Arc<AccessTokenSource>,
    ) -> Self {
        Self::new(&config.endpoint, config.bucket.trim(), client, tokens)
    }

    /// `{endpoint}/storage/v1/b/{bucket}/o[/{object}]` with each part escaped
    fn object_url(&self, object: Option<&str>) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| StoreError::RequestFailed(format!("Invalid endpoint: {}", e)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::RequestFailed("Endpoint cannot be a base".to_string()))?;
            segments.pop_if_empty();
            segments.extend(["storage", "v1", "b", self.bucket.as_str(), "o"]);
            if let Some(object) = object {
                segments.push(object);
            }
        }
        Ok(url)
    }

    fn list_url(&self, prefix: &str, page_token: Option<&str>) -> Result<Url, StoreError> {
        let mut url = self.object_url(None)?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("prefix", prefix)
                .append_pair("delimiter", "/")
                .append_pair("fields", "items(name),nextPageToken");
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }
        Ok(url)
    }

    fn media_url(&self, name: &str) -> Result<Url, StoreError> {
        let mut url = self.object_url(Some(name))?;
        url.query_pairs_mut().append_pair("alt", "media");
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, StoreError> {
        let request = self
            .tokens
            .authorize(self.client.get(url))
            .await
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        request
            .send()
            .await
            .map_err(|e| StoreError::ConnectionError(e.to_string()))
    }
}

fn status_error(status: StatusCode, what: &str) -> StoreError {
    if status == StatusCode::NOT_FOUND {
        StoreError::NotFound(what.to_string())
    } else {
        StoreError::RequestFailed(format!("HTTP {} for {}", status.as_u16(), what))
    }
}

/// Object names from one listing page, without "directory" placeholders
fn page_names(page: ObjectList) -> (Vec<String>, Option<String>) {
    let names = page
        .items
        .into_iter()
        .map(|item| item.name)
        .filter(|name| !name.ends_with('/'))
        .collect();
    (names, page.next_page_token.filter(|t| !t.is_empty()))
}

#[async_trait]
impl AdapterStore for GcsAdapterStore {
    fn location(&self) -> String {
        format!("gs://{}", self.bucket)
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let url = self.list_url(prefix, page_token.as_deref())?;
            debug!(%url, "Listing objects");
            let response = self.get(url).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(status_error(status, &self.location()));
            }

            let page: ObjectList = response
                .json()
                .await
                .map_err(|e| StoreError::RequestFailed(format!("Invalid listing: {}", e)))?;
            let (mut batch, next) = page_names(page);
            names.append(&mut batch);

            match next {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(names)
    }

    async fn download(&self, name: &str, destination: &Path) -> Result<u64, StoreError> {
        let mut response = self.get(self.media_url(name)?).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, name));
        }

        let mut file = tokio::fs::File::create(destination).await?;
        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}
