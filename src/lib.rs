//! OpenSound Analytics Library
//!
//! Fetches track batches from a music catalog, normalizes them and computes
//! dashboard statistics. The modules are exposed for the binaries and tests.

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod pipeline;
pub mod server;
pub mod source;

// Re-export commonly used types for convenience
pub use analytics::{aggregate, Stats};
pub use catalog::{normalize, RawRecord, Track};
pub use pipeline::{run_etl, EtlSnapshot, SnapshotStore};
pub use server::{run_server, RequestsLoggingLevel};
pub use source::{CatalogSource, DeezerClient, FileCatalogSource, SourceError};
