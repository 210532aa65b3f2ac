//! HTTP gateway (Axum) serving the essay page and the analysis endpoint.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header, header::HeaderValue},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::analyze_handler;
pub use payload::AnalyzeRequest;
pub use state::HandlerState;

use crate::constants::{ESSAY_STATUS_HEADER, ESSAY_STATUS_HEALTHY};
use crate::grammar::GrammarService;

const INDEX_HTML: &str = include_str!("../../static/index.html");
const SCRIPT_JS: &str = include_str!("../../static/js/script.js");

pub fn create_router_with_state<G>(state: HandlerState<G>) -> Router
where
    G: GrammarService + 'static,
{
    Router::new()
        .route("/", get(index_handler))
        .route("/static/js/script.js", get(script_handler))
        .route("/healthz", get(health_handler))
        .route("/analyze", post(analyze_handler::<G>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn script_handler() -> Response {
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/javascript; charset=utf-8"),
        )],
        SCRIPT_JS,
    )
        .into_response()
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        ESSAY_STATUS_HEADER,
        HeaderValue::from_static(ESSAY_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}
