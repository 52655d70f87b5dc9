//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for narrative-classifier
#[derive(Parser, Debug)]
#[command(name = "narrative-classifier")]
#[command(author, version, about = "Classify climate-change claims into contrarian narratives")]
#[command(long_about = r#"
Serves a fine-tuned language model that sorts climate-change claims into one
of eight narrative categories, and records user corrections for retraining.

At startup the adapter weights are fetched from the configured bucket, then
an HTTP API is served:
  POST /classify   {"user_claim": "..."}
  POST /feedback   {"user_claim", "predicted_category", "correct_category"}
  GET  /health

Configuration files are loaded from (in priority order):
1. Environment          NARRATIVE_<SECTION>__<KEY>, GCP_PROJECT_ID, GCS_BUCKET_NAME, PORT
2. --config <path>      Explicit config file
3. ./narrative.toml     Project-level config
4. ~/.config/narrative-classifier/config.toml   Global config

Example:
  narrative-classifier --port 9000 -v
  GCS_BUCKET_NAME=my-models narrative-classifier --config prod.toml
"#)]
pub struct Cli {
    /// Interface to bind (overrides [server] host)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides [server] port and $PORT)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Do not fetch adapter weights at startup
    #[arg(long)]
    pub skip_adapter_fetch: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Default log filter for the verbosity count
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::parse_from([
            "narrative-classifier",
            "--host",
            "127.0.0.1",
            "-p",
            "9000",
            "--skip-adapter-fetch",
            "-vv",
        ]);
        assert_eq!(cli.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(cli.port, Some(9000));
        assert!(cli.skip_adapter_fetch);
        assert_eq!(cli.log_level(), "debug");
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["narrative-classifier"]);
        assert_eq!(cli.log_level(), "warn");
        assert!(cli.port.is_none());
        assert!(!cli.no_config);
    }
}
