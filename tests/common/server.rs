//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own storage directory.

use super::constants::*;
use super::fixtures::make_test_wav;
use emotion_annotation_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use emotion_annotation_server::InMemorySegmentStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with isolated storage
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Audio storage directory the server reads from
    pub storage_path: PathBuf,

    // Private fields - keep resources alive until drop
    _temp_storage_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

#[allow(dead_code)]
impl TestServer {
    /// Spawns a server over the demo fixture with an empty storage directory
    pub async fn spawn() -> Self {
        Self::spawn_with(InMemorySegmentStore::with_demo_fixture(), |config| config).await
    }

    /// Spawns a server over the demo fixture, with an audio file stored
    /// for each of `filenames`
    pub async fn spawn_with_audio_files(filenames: &[&str]) -> Self {
        let server = Self::spawn().await;
        for filename in filenames {
            std::fs::write(server.storage_path.join(filename), make_test_wav())
                .expect("Failed to write test audio");
        }
        server
    }

    /// Spawns a new test server on a random port
    ///
    /// `configure` receives the default test config and may adjust it. The
    /// storage path is always a fresh temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if port binding fails or the server doesn't become ready
    /// within the timeout.
    pub async fn spawn_with(
        segment_store: InMemorySegmentStore,
        configure: impl FnOnce(ServerConfig) -> ServerConfig,
    ) -> Self {
        let temp_storage_dir = TempDir::new().expect("Failed to create storage dir");
        let storage_path = temp_storage_dir.path().to_path_buf();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = configure(ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        });
        let config = ServerConfig {
            storage_path: storage_path.clone(),
            ..config
        };

        let app = make_app(config, Arc::new(segment_store));

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
            storage_path,
            _temp_storage_dir: temp_storage_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the /health endpoint
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

            // Any response means the server is accepting connections
            match client.get(format!("{}/health", self.base_url)).send().await {
                Ok(_) => return,
                Err(_) => {
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
