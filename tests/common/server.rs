//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own data directory and
//! snapshot store.

use super::constants::*;
use super::fixtures::create_test_data_dir;
use opensound_analytics::pipeline::SnapshotStore;
use opensound_analytics::server::{make_app, RequestsLoggingLevel, ServerConfig};
use opensound_analytics::source::{CatalogSource, FileCatalogSource};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with an isolated file-backed catalog
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Snapshot store shared with the server, for direct inspection in tests
    pub snapshots: Arc<SnapshotStore>,

    // Private fields - keep resources alive until drop
    _temp_data_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port, backed by the fixture files
    ///
    /// # Panics
    ///
    /// Panics if fixture creation or port binding fails, or if the server
    /// doesn't become ready within timeout.
    pub async fn spawn() -> Self {
        Self::spawn_with(|dir| Arc::new(FileCatalogSource::new(dir)) as Arc<dyn CatalogSource>)
            .await
    }

    /// Spawns a test server whose catalog source is built from the fixture directory
    ///
    /// Lets tests wrap the file source, e.g. to inject latency.
    pub async fn spawn_with<F>(make_source: F) -> Self
    where
        F: FnOnce(&std::path::Path) -> Arc<dyn CatalogSource>,
    {
        let temp_data_dir = create_test_data_dir().expect("Failed to create test data dir");
        let source = make_source(temp_data_dir.path());
        let snapshots = Arc::new(SnapshotStore::new());

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            metrics_port: 0,
            requests_logging_level: RequestsLoggingLevel::None,
            content_cache_age_sec: 0, // Disable caching in tests
            frontend_dir_path: None,
            ..Default::default()
        };

        let app = make_app(config, source, snapshots.clone()).expect("Failed to build app");

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            snapshots,
            _temp_data_dir: temp_data_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the home endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
