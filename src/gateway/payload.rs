use serde::{Deserialize, Serialize};

/// Body of `POST /analyze`. Missing fields default to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeRequest {
    pub text: String,
    pub context: String,
}
