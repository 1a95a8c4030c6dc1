use super::RequestsLoggingLevel;
use crate::config::DEFAULT_CORS_ORIGIN;
use crate::source::DEFAULT_PAGE_SIZE;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    pub metrics_port: u16,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
    /// Origins allowed to call the API from a browser.
    pub cors_origins: Vec<String>,
    /// Batch size requested from the catalog on each ETL run.
    pub page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 8000,
            metrics_port: 9091,
            content_cache_age_sec: 3600,
            frontend_dir_path: None,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
