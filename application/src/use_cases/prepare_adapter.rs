//! Prepare Adapter use case.
//!
//! Fetches fine-tuned adapter weights from the [`AdapterStore`] into a local
//! directory at startup. Individual object failures are logged and skipped;
//! when nothing can be fetched, a previously downloaded copy is used instead.

use crate::ports::adapter_store::{AdapterStore, StoreError};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors that can occur while preparing the adapter.
#[derive(Error, Debug)]
pub enum PrepareAdapterError {
    #[error("No files found under '{prefix}' in {location}")]
    NoFiles { prefix: String, location: String },

    #[error("All {0} adapter files failed to download")]
    AllDownloadsFailed(usize),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("No cached adapter at {0}")]
    NoCache(PathBuf),
}

/// Input for the [`PrepareAdapterUseCase`].
#[derive(Debug, Clone)]
pub struct PrepareAdapterInput {
    /// Adapter name; objects are listed under `<adapter_name>/`.
    pub adapter_name: String,
    /// Local root; objects land at `<destination>/<object name>`.
    pub destination: PathBuf,
    /// Maximum concurrent downloads.
    pub concurrency: usize,
}

impl PrepareAdapterInput {
    pub fn new(adapter_name: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            adapter_name: adapter_name.into(),
            destination: destination.into(),
            concurrency: 4,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Directory the adapter files end up in.
    pub fn adapter_dir(&self) -> PathBuf {
        self.destination.join(&self.adapter_name)
    }

    fn prefix(&self) -> String {
        format!("{}/", self.adapter_name)
    }
}

/// Outcome of preparing the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedAdapter {
    pub directory: PathBuf,
    pub downloaded: usize,
    /// Object names that could not be fetched.
    pub failed: Vec<String>,
    /// True when the store was unusable and an existing local copy was kept.
    pub from_cache: bool,
}

/// Use case for fetching adapter weights.
#[derive(Clone)]
pub struct PrepareAdapterUseCase {
    store: Arc<dyn AdapterStore>,
}

impl PrepareAdapterUseCase {
    pub fn new(store: Arc<dyn AdapterStore>) -> Self {
        Self { store }
    }

    /// Download every object under the adapter prefix.
    pub async fn execute(
        &self,
        input: &PrepareAdapterInput,
    ) -> Result<PreparedAdapter, PrepareAdapterError> {
        let prefix = input.prefix();
        let location = self.store.location();
        info!(%location, %prefix, "Looking for adapter files");

        let names = self.store.list(&prefix).await?;
        info!("Number of adapter files found: {}", names.len());
        if names.is_empty() {
            return Err(PrepareAdapterError::NoFiles { prefix, location });
        }

        let total = names.len();
        let results: Vec<(String, Result<u64, StoreError>)> = stream::iter(names)
            .map(|name| async move {
                let target = input.destination.join(&name);
                let result = self.download_one(&name, &target).await;
                (name, result)
            })
            .buffer_unordered(input.concurrency.max(1))
            .collect()
            .await;

        let mut downloaded = 0;
        let mut failed = Vec::new();
        for (name, result) in results {
            match result {
                Ok(bytes) => {
                    info!(bytes, "Downloaded {}", input.destination.join(&name).display());
                    downloaded += 1;
                }
                Err(e) => {
                    error!("Failed to download {} due to: {}", name, e);
                    failed.push(name);
                }
            }
        }

        if downloaded == 0 {
            return Err(PrepareAdapterError::AllDownloadsFailed(total));
        }

        failed.sort();
        info!(downloaded, failed = failed.len(), "Adapter fetched from {}", location);

        Ok(PreparedAdapter {
            directory: input.adapter_dir(),
            downloaded,
            failed,
            from_cache: false,
        })
    }

    /// [`execute`](Self::execute), falling back to a non-empty local copy on failure.
    pub async fn execute_or_cached(
        &self,
        input: &PrepareAdapterInput,
    ) -> Result<PreparedAdapter, PrepareAdapterError> {
        match self.execute(input).await {
            Ok(prepared) => Ok(prepared),
            Err(e) => {
                warn!("Error loading adapter from store: {}. Will try to load from cache.", e);
                Self::cached(input).await
            }
        }
    }

    /// Look for a previously downloaded adapter directory.
    pub async fn cached(input: &PrepareAdapterInput) -> Result<PreparedAdapter, PrepareAdapterError> {
        let directory = input.adapter_dir();
        if !dir_has_entries(&directory).await {
            return Err(PrepareAdapterError::NoCache(directory));
        }
        info!("Using cached adapter at {}", directory.display());
        Ok(PreparedAdapter {
            directory,
            downloaded: 0,
            failed: Vec::new(),
            from_cache: true,
        })
    }

    async fn download_one(&self, name: &str, target: &Path) -> Result<u64, StoreError> {
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        self.store.download(name, target).await
    }
}

async fn dir_has_entries(path: &Path) -> bool {
    match tokio::fs::read_dir(path).await {
        Ok(mut entries) => matches!(entries.next_entry().await, Ok(Some(_))),
        Err(_) => false,
    }
}
