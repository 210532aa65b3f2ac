//! In-process stand-in for the LanguageTool `/v2/check` endpoint.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Debug, Default)]
struct FakeState {
    matches: HashMap<String, Vec<Value>>,
    failure: Option<StatusCode>,
    calls: AtomicUsize,
}

/// Builder for canned per-language answers.
#[derive(Debug, Default)]
pub struct FakeLanguageToolBuilder {
    state: FakeState,
}

impl FakeLanguageToolBuilder {
    /// Adds a match reported for `language` (`en-GB` or `en-US`).
    pub fn with_match(mut self, language: &str, m: Value) -> Self {
        self.state
            .matches
            .entry(language.to_string())
            .or_default()
            .push(m);
        self
    }

    /// Adds the same match for both languages.
    pub fn with_shared_match(self, m: Value) -> Self {
        self.with_match("en-GB", m.clone()).with_match("en-US", m)
    }

    /// Answers every request with `status`.
    pub fn failing_with(mut self, status: StatusCode) -> Self {
        self.state.failure = Some(status);
        self
    }

    pub async fn spawn(self) -> std::io::Result<FakeLanguageTool> {
        let state = Arc::new(self.state);
        let app = Router::new()
            .route("/v2/check", post(check_handler))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Ok(FakeLanguageTool {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        })
    }
}

pub struct FakeLanguageTool {
    pub addr: SocketAddr,
    state: Arc<FakeState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl FakeLanguageTool {
    pub fn builder() -> FakeLanguageToolBuilder {
        FakeLanguageToolBuilder::default()
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn call_count(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }
}

impl Drop for FakeLanguageTool {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn check_handler(
    State(state): State<Arc<FakeState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);

    if let Some(status) = state.failure {
        return (status, "internal error").into_response();
    }

    let language = form.get("language").cloned().unwrap_or_default();
    let matches = state.matches.get(&language).cloned().unwrap_or_default();

    Json(json!({
        "software": {"name": "LanguageTool"},
        "language": {"code": language},
        "matches": matches,
    }))
    .into_response()
}

/// A LanguageTool match for the span `text[offset..offset + length]`,
/// with the whole text as context.
pub fn lt_match(text: &str, offset: usize, length: usize, message: &str, fix: &str) -> Value {
    json!({
        "message": message,
        "shortMessage": "",
        "offset": offset,
        "length": length,
        "replacements": [{"value": fix}],
        "context": {"text": text, "offset": offset, "length": length},
        "rule": {"id": "TEST_RULE", "description": "test"},
    })
}
