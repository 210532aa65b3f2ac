use thiserror::Error;

/// Failures talking to a remote grammar service.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("grammar service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("grammar service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode grammar service response: {reason}")]
    Decode { reason: String },

    #[error("grammar service unavailable: {reason}")]
    Unavailable { reason: String },
}
