use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use opensound_analytics::config::{AppConfig, CliConfig, FileConfig, SourceKind};
use opensound_analytics::pipeline::{spawn_periodic_refresh, SnapshotStore};
use opensound_analytics::server::{self, run_server, RequestsLoggingLevel};
use opensound_analytics::source::{resolve_query, DEFAULT_PAGE_SIZE};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override the CLI flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 8000)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// The maximum age in seconds of cacheable responses.
    #[clap(long, default_value_t = 3600)]
    pub content_cache_age_sec: usize,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Origin allowed to call the API from a browser. Can be repeated.
    #[clap(long = "cors-origin")]
    pub cors_origins: Vec<String>,

    /// Where track batches are fetched from.
    #[clap(long, value_enum, default_value_t = SourceKind::Deezer)]
    pub source: SourceKind,

    /// Base URL of the Deezer API.
    #[clap(long)]
    pub deezer_base_url: Option<String>,

    /// Directory of `<term>.json` files, used by the file source.
    #[clap(long, value_parser = parse_path)]
    pub data_dir: Option<PathBuf>,

    /// Number of tracks fetched per ETL run.
    #[clap(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Timeout in seconds for catalog requests.
    #[clap(long, default_value_t = 30)]
    pub request_timeout_sec: u64,

    /// Interval in seconds between scheduled refreshes. Set to 0 to disable.
    #[clap(long, default_value_t = 0)]
    pub refresh_interval_sec: u64,

    /// Search term or genre preset refreshed on schedule.
    #[clap(long)]
    pub refresh_term: Option<String>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            port: self.port,
            metrics_port: self.metrics_port,
            logging_level: self.logging_level.clone(),
            content_cache_age_sec: self.content_cache_age_sec,
            frontend_dir_path: self.frontend_dir_path.clone(),
            cors_origins: self.cors_origins.clone(),
            source: self.source,
            deezer_base_url: self.deezer_base_url.clone(),
            data_dir: self.data_dir.clone(),
            page_size: self.page_size,
            request_timeout_sec: self.request_timeout_sec,
            refresh_interval_sec: self.refresh_interval_sec,
            refresh_term: self.refresh_term.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    // Initialize metrics system
    info!("Initializing metrics...");
    server::metrics::init_metrics();

    let source = config.source.build()?;
    let snapshots = Arc::new(SnapshotStore::new());

    // Spawn background task for scheduled refresh if enabled
    if config.refresh.enabled() {
        let term = resolve_query(&config.refresh.term).to_string();
        spawn_periodic_refresh(
            source.clone(),
            snapshots.clone(),
            term,
            config.source.page_size(),
            Duration::from_secs(config.refresh.interval_sec),
        );
    }

    info!("Ready to serve at port {}!", config.port);
    info!("Metrics available at port {}!", config.metrics_port);
    run_server(config.server_config(), source, snapshots).await
}
