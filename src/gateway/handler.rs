use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument, warn};

use crate::constants::{ESSAY_STATUS_ANALYZED, ESSAY_STATUS_DEGRADED, ESSAY_STATUS_HEADER};
use crate::gateway::error::GatewayError;
use crate::gateway::payload::AnalyzeRequest;
use crate::gateway::state::HandlerState;
use crate::grammar::GrammarService;

#[instrument(skip_all, fields(text_len = tracing::field::Empty))]
pub async fn analyze_handler<G>(
    State(state): State<HandlerState<G>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Response, GatewayError>
where
    G: GrammarService + 'static,
{
    let Json(request) = payload.inspect_err(|rejection| {
        debug!(error = %rejection.body_text(), "Rejected analyze request body");
    })?;
    tracing::Span::current().record("text_len", request.text.len());

    let result = state
        .analyzer
        .analyze(&request.text, &request.context)
        .await?;

    let essay_status = if result.grammar_degraded() {
        warn!("Grammar service unavailable; result carries a diagnostic record");
        ESSAY_STATUS_DEGRADED
    } else {
        ESSAY_STATUS_ANALYZED
    };

    let mut headers = HeaderMap::new();
    headers.insert(ESSAY_STATUS_HEADER, HeaderValue::from_static(essay_status));

    Ok((StatusCode::OK, headers, Json(result)).into_response())
}
