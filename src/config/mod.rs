mod file_config;

pub use file_config::{FileConfig, RefreshConfig, SourceConfig};

use crate::server::{RequestsLoggingLevel, ServerConfig};
use crate::source::{
    CatalogSource, DeezerClient, FileCatalogSource, DEEZER_API_BASE, DEFAULT_PAGE_SIZE,
};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Largest batch the Deezer search endpoint returns in one page.
pub const MAX_PAGE_SIZE: usize = 100;

/// Origin of the dashboard's development server.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SourceKind {
    #[default]
    Deezer,
    File,
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
    pub cors_origins: Vec<String>,
    pub source: SourceKind,
    pub deezer_base_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub page_size: usize,
    pub request_timeout_sec: u64,
    pub refresh_interval_sec: u64,
    pub refresh_term: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Server settings
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
    pub cors_origins: Vec<String>,

    // Feature configs (with defaults)
    pub source: SourceSettings,
    pub refresh: RefreshSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceSettings {
    Deezer {
        base_url: String,
        page_size: usize,
        request_timeout_sec: u64,
    },
    File {
        data_dir: PathBuf,
        page_size: usize,
    },
}

impl SourceSettings {
    pub fn page_size(&self) -> usize {
        match self {
            SourceSettings::Deezer { page_size, .. } => *page_size,
            SourceSettings::File { page_size, .. } => *page_size,
        }
    }

    /// Instantiates the configured catalog source.
    pub fn build(&self) -> Result<Arc<dyn CatalogSource>> {
        let source: Arc<dyn CatalogSource> = match self {
            SourceSettings::Deezer {
                base_url,
                request_timeout_sec,
                ..
            } => {
                info!("Using Deezer catalog at {}", base_url);
                Arc::new(DeezerClient::new(base_url, *request_timeout_sec)?)
            }
            SourceSettings::File { data_dir, .. } => {
                info!("Using file catalog in {:?}", data_dir);
                Arc::new(FileCatalogSource::new(data_dir.clone()))
            }
        };
        Ok(source)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshSettings {
    /// 0 disables the scheduled refresh.
    pub interval_sec: u64,
    pub term: String,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_sec: 0,
            term: "pop".to_string(),
        }
    }
}

impl RefreshSettings {
    pub fn enabled(&self) -> bool {
        self.interval_sec > 0
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);
        if port != 0 && port == metrics_port {
            bail!("port and metrics_port must differ (both are {})", port);
        }

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let content_cache_age_sec = file
            .content_cache_age_sec
            .unwrap_or(cli.content_cache_age_sec);
        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let cors_origins = match file.cors_origins {
            Some(origins) => origins,
            None if cli.cors_origins.is_empty() => vec![DEFAULT_CORS_ORIGIN.to_string()],
            None => cli.cors_origins.clone(),
        };

        let source = resolve_source(cli, file.source.unwrap_or_default())?;

        let refresh_file = file.refresh.unwrap_or_default();
        let refresh = RefreshSettings {
            interval_sec: refresh_file
                .interval_sec
                .unwrap_or(cli.refresh_interval_sec),
            term: refresh_file
                .term
                .or_else(|| cli.refresh_term.clone())
                .unwrap_or_else(|| RefreshSettings::default().term),
        };
        if refresh.term.trim().is_empty() {
            bail!("refresh term must not be empty");
        }

        Ok(Self {
            port,
            metrics_port,
            logging_level,
            content_cache_age_sec,
            frontend_dir_path,
            cors_origins,
            source,
            refresh,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            port: self.port,
            metrics_port: self.metrics_port,
            content_cache_age_sec: self.content_cache_age_sec,
            frontend_dir_path: self.frontend_dir_path.clone(),
            cors_origins: self.cors_origins.clone(),
            page_size: self.source.page_size(),
        }
    }
}

fn resolve_source(cli: &CliConfig, file: SourceConfig) -> Result<SourceSettings> {
    let kind = match file.kind {
        Some(kind) => match parse_source_kind(&kind) {
            Some(kind) => kind,
            None => bail!("Unknown source kind: {:?}", kind),
        },
        None => cli.source,
    };

    let page_size = file.page_size.unwrap_or(cli.page_size);
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        bail!(
            "page_size must be between 1 and {}, got {}",
            MAX_PAGE_SIZE,
            page_size
        );
    }

    match kind {
        SourceKind::Deezer => {
            let request_timeout_sec = file
                .request_timeout_sec
                .unwrap_or(cli.request_timeout_sec);
            if request_timeout_sec == 0 {
                bail!("request_timeout_sec must be positive");
            }
            Ok(SourceSettings::Deezer {
                base_url: file
                    .deezer_base_url
                    .or_else(|| cli.deezer_base_url.clone())
                    .unwrap_or_else(|| DEEZER_API_BASE.to_string()),
                page_size,
                request_timeout_sec,
            })
        }
        SourceKind::File => {
            let data_dir = file
                .data_dir
                .map(PathBuf::from)
                .or_else(|| cli.data_dir.clone())
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "data_dir must be specified via --data-dir or in config file when using the file source"
                    )
                })?;

            if !data_dir.exists() {
                bail!("Data directory does not exist: {:?}", data_dir);
            }
            if !data_dir.is_dir() {
                bail!("data_dir is not a directory: {:?}", data_dir);
            }
            Ok(SourceSettings::File {
                data_dir,
                page_size,
            })
        }
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

fn parse_source_kind(s: &str) -> Option<SourceKind> {
    SourceKind::from_str(s, true).ok()
}

/// Default values used by the binaries when building a [`CliConfig`].
pub fn default_cli_config() -> CliConfig {
    CliConfig {
        port: 8000,
        metrics_port: 9091,
        logging_level: RequestsLoggingLevel::Path,
        content_cache_age_sec: 3600,
        page_size: DEFAULT_PAGE_SIZE,
        request_timeout_sec: 30,
        ..Default::default()
    }
}
