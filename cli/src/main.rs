//! CLI entrypoint for narrative-classifier
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then serves the HTTP API until interrupted.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use narrative_application::{
    ClassifierParams, ClassifyClaimUseCase, FeedbackSink, PrepareAdapterInput,
    PrepareAdapterUseCase, SubmitFeedbackUseCase, TextGenerator,
};
use narrative_domain::{AnswerCodec, ConfigIssue, Severity};
use narrative_infrastructure::{
    AccessTokenSource, BigQueryFeedbackSink, ConfigLoader, DisabledFeedbackSink, FileConfig,
    FileLoggingConfig, GcsAdapterStore, JsonlPredictionLogger, TgiTextGenerator,
    cloud_http_client,
};
use narrative_presentation::{AppState, Cli, serve};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;
    apply_cli_overrides(&mut config, &cli);

    let _log_guard = init_logging(&cli, &config.logging)?;
    info!("Starting narrative-classifier v{}", env!("CARGO_PKG_VERSION"));

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => error!("{}", issue),
            Severity::Warning => warn!("{}", issue),
        }
    }
    if ConfigIssue::has_errors(&issues) {
        bail!("Configuration has errors, see above");
    }

    // === Dependency Injection ===
    let http = cloud_http_client(&config.auth).context("Failed to create cloud HTTP client")?;
    let tokens = Arc::new(AccessTokenSource::from_config(&config.auth, http.clone()));
    info!(credentials = tokens.describe(), "Cloud credentials resolved");

    if cli.skip_adapter_fetch {
        info!("Adapter fetch skipped");
    } else if config.storage.is_enabled() {
        fetch_adapter(&config, http.clone(), tokens.clone()).await;
    }

    let generator: Arc<dyn TextGenerator> = Arc::new(
        TgiTextGenerator::from_config(&config.generation, &config.model)
            .context("Failed to create generation client")?,
    );
    if let Err(e) = generator.health().await {
        warn!("Generation server at {} is not ready yet: {}", config.generation.url, e);
    }

    let (template, _) = config.model.parse_chat_template();
    let mut classify = ClassifyClaimUseCase::new(generator.clone(), AnswerCodec::new(template))
        .with_params(ClassifierParams::default().with_max_new_tokens(config.model.max_new_tokens));
    if let Some(path) = &config.logging.predictions_file {
        match JsonlPredictionLogger::open(path) {
            Ok(logger) => {
                info!("Recording predictions to {}", logger.path().display());
                classify = classify.with_prediction_logger(Arc::new(logger));
            }
            Err(e) => warn!("Prediction log disabled, cannot open {}: {}", path, e),
        }
    }

    let sink: Arc<dyn FeedbackSink> = if config.warehouse.is_enabled() {
        let sink = BigQueryFeedbackSink::from_config(&config.warehouse, http, tokens);
        info!(table = %sink.table_id(), "Feedback sink ready");
        Arc::new(sink)
    } else {
        Arc::new(DisabledFeedbackSink)
    };
    let feedback = SubmitFeedbackUseCase::new(sink);

    let state = AppState::new(generator, classify, feedback);

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_signal(shutdown.clone()));

    serve(listener, state, async move { shutdown.cancelled().await }).await?;
    info!("Server stopped");
    Ok(())
}

fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
}

/// Log to stderr, and to a daily-rolling file when `[logging] dir` is set.
///
/// `RUST_LOG` overrides the `-v` level. The returned guard flushes the file on drop.
fn init_logging(cli: &Cli, logging: &FileLoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    let (file_layer, guard) = match &logging.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir))?;
            let appender = tracing_appender::rolling::daily(dir, "narrative-classifier.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Download adapter weights, falling back to a cached copy. Never fatal.
async fn fetch_adapter(
    config: &FileConfig,
    http: reqwest::Client,
    tokens: Arc<AccessTokenSource>,
) {
    let store = GcsAdapterStore::from_config(&config.storage, http, tokens);
    let use_case = PrepareAdapterUseCase::new(Arc::new(store));
    let input = PrepareAdapterInput::new(config.model.adapter.trim(), &config.storage.destination_dir)
        .with_concurrency(config.storage.concurrency);

    match use_case.execute_or_cached(&input).await {
        Ok(prepared) if prepared.from_cache => {
            warn!("Using cached adapter at {}", prepared.directory.display());
        }
        Ok(prepared) => {
            if !prepared.failed.is_empty() {
                warn!("{} adapter files could not be fetched", prepared.failed.len());
            }
            info!(
                "Adapter ready at {} ({} files)",
                prepared.directory.display(),
                prepared.downloaded
            );
        }
        Err(e) => warn!("Continuing without local adapter files: {}", e),
    }
}

/// Cancel on Ctrl-C, or SIGTERM on Unix
async fn cancel_on_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
    token.cancel();
}
