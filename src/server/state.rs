use axum::extract::FromRef;

use crate::pipeline::SnapshotStore;
use crate::source::CatalogSource;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedCatalogSource = Arc<dyn CatalogSource>;
pub type GuardedSnapshotStore = Arc<SnapshotStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub source: GuardedCatalogSource,
    pub snapshots: GuardedSnapshotStore,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        source: GuardedCatalogSource,
        snapshots: GuardedSnapshotStore,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            source,
            snapshots,
        }
    }
}

impl FromRef<ServerState> for GuardedCatalogSource {
    fn from_ref(input: &ServerState) -> Self {
        input.source.clone()
    }
}

impl FromRef<ServerState> for GuardedSnapshotStore {
    fn from_ref(input: &ServerState) -> Self {
        input.snapshots.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
