//! Upstream catalog lookups.
//!
//! A [`CatalogSource`] answers a search term with one bounded batch of raw
//! track records. The term is opaque: a genre keyword, an artist name, or
//! `"top"` for the unfiltered default.

mod deezer;
mod file;
pub mod genres;

pub use deezer::{DeezerClient, DEEZER_API_BASE};
pub use file::FileCatalogSource;
pub use genres::{resolve_query, Genre, GENRES};

use crate::catalog::RawRecord;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Errors returned by catalog sources.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Request to catalog failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog responded with status {0}")]
    Status(u16),

    #[error("Catalog API error ({kind}): {message}")]
    Api { kind: String, message: String },

    #[error("Failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No catalog data for term '{0}'")]
    NotFound(String),
}

/// A catalog that can be searched by term.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Fetches at most `limit` records matching `term`.
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<RawRecord>, SourceError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SearchBody {
    Envelope(SearchEnvelope),
    Bare(Vec<Value>),
}

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    data: Option<Vec<Value>>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Parses a search response body.
///
/// Accepts the `{"data": [...]}` envelope used by Deezer (including its
/// `{"error": {...}}` form) or a bare JSON array of records. Array entries
/// that are not JSON objects are skipped.
pub(crate) fn parse_search_body(body: &str) -> Result<Vec<RawRecord>, SourceError> {
    let entries = match serde_json::from_str::<SearchBody>(body)? {
        SearchBody::Envelope(SearchEnvelope {
            error: Some(error), ..
        }) => {
            return Err(SourceError::Api {
                kind: error.kind.unwrap_or_else(|| "Unknown".to_string()),
                message: error.message.unwrap_or_default(),
            })
        }
        SearchBody::Envelope(envelope) => envelope.data.unwrap_or_default(),
        SearchBody::Bare(entries) => entries,
    };

    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        if !entry.is_object() {
            warn!("Skipping non-object catalog entry: {}", entry);
            continue;
        }
        records.push(serde_json::from_value(entry)?);
    }
    Ok(records)
}
