//! Deezer search API client.

use super::{parse_search_body, CatalogSource, SourceError};
use crate::catalog::RawRecord;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

pub const DEEZER_API_BASE: &str = "https://api.deezer.com";

/// HTTP client for the Deezer public search endpoint.
pub struct DeezerClient {
    client: reqwest::Client,
    base_url: String,
}

impl DeezerClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "https://api.deezer.com")
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(base_url: &str, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, term: &str, limit: usize) -> String {
        format!(
            "{}/search?q={}&limit={}",
            self.base_url,
            urlencoding::encode(term),
            limit
        )
    }
}

#[async_trait]
impl CatalogSource for DeezerClient {
    fn name(&self) -> &'static str {
        "deezer"
    }

    async fn search(&self, term: &str, limit: usize) -> Result<Vec<RawRecord>, SourceError> {
        let url = self.search_url(term, limit);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let mut records = parse_search_body(&body)?;
        records.truncate(limit);
        Ok(records)
    }
}
