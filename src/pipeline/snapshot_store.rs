//! Holder of the latest published snapshot.
//!
//! Every pipeline run takes a [`RequestTicket`] before fetching. When the run
//! completes, its snapshot is published only if no newer ticket was issued in
//! the meantime: the last request wins and out-of-order completions are
//! dropped. Failed runs never publish, so the previous snapshot stays visible.

use super::EtlSnapshot;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub enum PublishOutcome {
    Published(Arc<EtlSnapshot>),
    /// A newer request was issued; the snapshot was discarded.
    Superseded {
        ticket: RequestTicket,
        latest: RequestTicket,
    },
}

#[derive(Default)]
pub struct SnapshotStore {
    issued: AtomicU64,
    current: Mutex<Option<Arc<EtlSnapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new request. Any request begun earlier is now stale.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Publishes `snapshot` if `ticket` is still the latest request.
    pub fn publish(&self, ticket: RequestTicket, snapshot: EtlSnapshot) -> PublishOutcome {
        let mut current = self.current.lock().unwrap();

        let latest = RequestTicket(self.issued.load(Ordering::SeqCst));
        if latest != ticket {
            debug!(
                "Discarding snapshot for '{}' from request {} (latest is {})",
                snapshot.term, ticket.0, latest.0
            );
            return PublishOutcome::Superseded { ticket, latest };
        }

        let snapshot = Arc::new(snapshot);
        *current = Some(snapshot.clone());
        PublishOutcome::Published(snapshot)
    }

    /// The current snapshot, if any run has published one.
    pub fn current(&self) -> Option<Arc<EtlSnapshot>> {
        self.current.lock().unwrap().clone()
    }
}
