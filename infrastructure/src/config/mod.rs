//! Configuration file loading for narrative-classifier
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `NARRATIVE_<SECTION>__<KEY>`, `GCP_PROJECT_ID`, `GCS_BUCKET_NAME`, `PORT`
//! 2. `--config <path>` specified file
//! 3. Project root: `./narrative.toml` or `./.narrative.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/narrative-classifier/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAuthConfig, FileConfig, FileGenerationConfig, FileLoggingConfig, FileModelConfig,
    FileServerConfig, FileStorageConfig, FileWarehouseConfig,
};
pub use loader::ConfigLoader;
