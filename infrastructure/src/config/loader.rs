//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Application directory name under the platform config dir
const APP_DIR: &str = "narrative-classifier";

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["narrative.toml", ".narrative.toml"];

/// Prefix for environment overrides (`NARRATIVE_MODEL__ADAPTER=...`)
const ENV_PREFIX: &str = "NARRATIVE_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment (`NARRATIVE_*`, plus `GCP_PROJECT_ID`, `GCS_BUCKET_NAME`, `PORT`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./narrative.toml` or `./.narrative.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/narrative-classifier/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Load defaults plus environment only (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Self::env())
            .extract()
            .map_err(Box::new)
    }

    /// Build the layered figment without extracting it
    pub fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Self::env())
    }

    /// Environment provider: prefixed keys plus the well-known cloud variables
    fn env() -> Figment {
        let legacy = Env::raw()
            .only(&["GCP_PROJECT_ID", "GCS_BUCKET_NAME", "PORT"])
            .map(|key| {
                match key.as_str().to_ascii_uppercase().as_str() {
                    "GCP_PROJECT_ID" => "warehouse.project_id",
                    "GCS_BUCKET_NAME" => "storage.bucket",
                    _ => "server.port",
                }
                .into()
            });

        Figment::new()
            .merge(legacy)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/narrative-classifier/config.toml if set,
    /// otherwise falls back to ~/.config/narrative-classifier/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] {}* / GCP_PROJECT_ID / GCS_BUCKET_NAME / PORT", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./narrative.toml or ./.narrative.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
