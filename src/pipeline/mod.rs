//! Extract, transform, aggregate.
//!
//! [`run_etl`] fetches one batch from a [`CatalogSource`], normalizes it and
//! computes its [`Stats`]. [`refresh`] wraps it with the [`SnapshotStore`]
//! bookkeeping so that only the latest request is ever published.

mod scheduler;
mod snapshot_store;

pub use scheduler::spawn_periodic_refresh;
pub use snapshot_store::{PublishOutcome, RequestTicket, SnapshotStore};

use crate::analytics::{aggregate, Stats};
use crate::catalog::{normalize, RawRecord, Track};
use crate::server::metrics;
use crate::source::{CatalogSource, SourceError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Result of one pipeline run. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtlSnapshot {
    /// Search term the batch was fetched for.
    pub term: String,
    pub fetched_at: DateTime<Utc>,
    pub tracks: Vec<Track>,
    /// `None` when the batch was empty.
    pub stats: Option<Stats>,
}

impl EtlSnapshot {
    /// Normalizes and aggregates an already fetched batch.
    pub fn from_records(term: &str, records: &[RawRecord]) -> Self {
        let tracks = normalize(records);
        let stats = aggregate(&tracks);
        Self {
            term: term.to_string(),
            fetched_at: Utc::now(),
            tracks,
            stats,
        }
    }
}

/// Runs the whole pipeline for `term`.
pub async fn run_etl(
    source: &dyn CatalogSource,
    term: &str,
    limit: usize,
) -> Result<EtlSnapshot, SourceError> {
    let start = Instant::now();

    let records = match source.search(term, limit).await {
        Ok(records) => records,
        Err(err) => {
            metrics::record_etl_run(source.name(), "failed", start.elapsed());
            warn!("Fetching '{}' from {} failed: {}", term, source.name(), err);
            return Err(err);
        }
    };

    let snapshot = EtlSnapshot::from_records(term, &records);
    let elapsed = start.elapsed();
    metrics::record_etl_run(source.name(), "success", elapsed);
    metrics::record_tracks_ingested(snapshot.tracks.len());

    info!(
        "ETL for '{}' via {}: {} tracks in {}ms",
        term,
        source.name(),
        snapshot.tracks.len(),
        elapsed.as_millis()
    );
    Ok(snapshot)
}

/// Outcome of a [`refresh`] that reached the catalog successfully.
#[derive(Debug)]
pub enum RefreshOutcome {
    Published(Arc<EtlSnapshot>),
    /// A newer refresh was requested while this one was running.
    Superseded(RequestTicket),
}

/// Runs the pipeline and publishes the result to `store`, unless a newer
/// request has been started in the meantime. On error the store is left
/// untouched.
pub async fn refresh(
    source: &dyn CatalogSource,
    store: &SnapshotStore,
    term: &str,
    limit: usize,
) -> Result<RefreshOutcome, SourceError> {
    let ticket = store.begin();
    let snapshot = run_etl(source, term, limit).await?;

    match store.publish(ticket, snapshot) {
        PublishOutcome::Published(snapshot) => {
            metrics::set_snapshot_tracks(snapshot.tracks.len());
            Ok(RefreshOutcome::Published(snapshot))
        }
        PublishOutcome::Superseded { ticket, latest } => {
            metrics::record_superseded_run();
            info!(
                "Result for '{}' (request {}) superseded by request {}",
                term,
                ticket.seq(),
                latest.seq()
            );
            Ok(RefreshOutcome::Superseded(ticket))
        }
    }
}
