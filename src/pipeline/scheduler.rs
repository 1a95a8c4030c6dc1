use super::{refresh, RefreshOutcome, SnapshotStore};
use crate::source::CatalogSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Spawns a task that refreshes `term` every `interval`, starting immediately.
///
/// Runs go through the same [`SnapshotStore`] as on-demand requests, so a
/// user request issued while a scheduled run is in flight wins over it.
pub fn spawn_periodic_refresh(
    source: Arc<dyn CatalogSource>,
    store: Arc<SnapshotStore>,
    term: String,
    limit: usize,
    interval: Duration,
) -> JoinHandle<()> {
    info!(
        "Scheduled refresh enabled: '{}' every {}s",
        term,
        interval.as_secs()
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match refresh(source.as_ref(), &store, &term, limit).await {
                Ok(RefreshOutcome::Published(snapshot)) => {
                    info!(
                        "Scheduled refresh of '{}' published {} tracks",
                        term,
                        snapshot.tracks.len()
                    );
                }
                Ok(RefreshOutcome::Superseded(_)) => {}
                Err(e) => {
                    error!("Scheduled refresh of '{}' failed: {}", term, e);
                }
            }
        }
    })
}
