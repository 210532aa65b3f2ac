//! Test server harness.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use essay::analysis::EssayAnalyzer;
use essay::embedding::DocumentEmbedder;
use essay::gateway::{HandlerState, create_router_with_state};
use essay::grammar::LanguageToolClient;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

/// Nothing listens on port 9 locally, so calls fail fast.
pub const UNREACHABLE_LANGUAGETOOL_URL: &str = "http://127.0.0.1:9";

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub languagetool_url: String,
    pub grammar_timeout: Duration,
}

impl TestServerConfig {
    pub fn with_languagetool(url: impl Into<String>) -> Self {
        Self {
            languagetool_url: url.into(),
            grammar_timeout: Duration::from_secs(5),
        }
    }
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self::with_languagetool(UNREACHABLE_LANGUAGETOOL_URL)
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns the real router on an ephemeral port.
///
/// Grammar calls go over HTTP to `config.languagetool_url` (usually a
/// [`super::fake_languagetool::FakeLanguageTool`]); relevance uses the hashed
/// embedder.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let local_addr = listener.local_addr()?;

    let grammar = LanguageToolClient::new(&config.languagetool_url, config.grammar_timeout)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    let analyzer = EssayAnalyzer::new(grammar, Arc::new(DocumentEmbedder::hashed()));
    let app = create_router_with_state(HandlerState::new(analyzer));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
