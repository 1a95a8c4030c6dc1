//! Catalog source backed by JSON files on disk.
//!
//! Each term maps to `<dir>/<term>.json`, holding either a search response
//! envelope or a bare array of records. Useful for offline runs and tests.

use super::{parse_search_body, CatalogSource, SourceError};
use crate::catalog::RawRecord;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

pub struct FileCatalogSource {
    dir: PathBuf,
}

impl FileCatalogSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding the records for `term`.
    ///
    /// Characters outside `[A-Za-z0-9_-]` are replaced with `_` so a term
    /// can never escape the data directory.
    pub fn file_for_term(&self, term: &str) -> PathBuf {
        let stem: String = term
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", stem))
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn search(&self, term: &str, limit: usize) -> Result<Vec<RawRecord>, SourceError> {
        let path = self.file_for_term(term);
        debug!("Reading catalog records from {:?}", path);

        let body = match tokio::fs::read_to_string(&path).await {
            Ok(body) => body,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound(term.to_string()))
            }
            Err(err) => return Err(err.into()),
        };

        let mut records = parse_search_body(&body)?;
        records.truncate(limit);
        Ok(records)
    }
}
