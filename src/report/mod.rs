//! Records returned to API callers.
//!
//! All of these are built once per request and serialized straight into the
//! `/analyze` response body.

use serde::{Deserialize, Serialize};

use crate::constants::NO_TOPICS_LABEL;

/// A flagged grammar or phrasing issue.
///
/// Offsets and lengths count characters (Unicode scalar values), not bytes
/// or UTF-16 units, for grammar and phrase records alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub message: String,
    pub offset: usize,
    pub length: usize,
    /// Text surrounding the flagged span.
    pub context: String,
    /// Candidate fixes, best first.
    pub replacements: Vec<String>,
}

impl ErrorRecord {
    /// Record standing in for a grammar check that could not run.
    ///
    /// Zero offset and length mark it as a service diagnostic rather than a
    /// problem in the essay.
    pub fn service_unavailable(detail: impl std::fmt::Display) -> Self {
        Self {
            message: format!("LanguageTool server error: {}", detail),
            offset: 0,
            length: 0,
            context: String::new(),
            replacements: Vec::new(),
        }
    }

    /// Returns `true` for the record produced by [`ErrorRecord::service_unavailable`].
    pub fn is_service_diagnostic(&self) -> bool {
        self.length == 0 && self.offset == 0 && self.context.is_empty()
    }

    /// Identity used for de-duplication.
    pub fn span_key(&self) -> (usize, usize) {
        (self.offset, self.length)
    }
}

/// Keeps the first record for each `(offset, length)` pair, preserving order.
pub fn dedup_by_span(records: Vec<ErrorRecord>) -> Vec<ErrorRecord> {
    let mut seen = std::collections::HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.span_key()))
        .collect()
}

/// A weighted topic term, serialized as `[term, weight]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicTerm(pub String, pub f64);

impl TopicTerm {
    pub fn term(&self) -> &str {
        &self.0
    }

    pub fn weight(&self) -> f64 {
        self.1
    }

    /// The `("No topics identified", 0.0)` placeholder.
    pub fn none_identified() -> Self {
        Self(NO_TOPICS_LABEL.to_string(), 0.0)
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == NO_TOPICS_LABEL && self.1 == 0.0
    }
}

/// Full outcome of one essay analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub original_text: String,
    pub errors: Vec<ErrorRecord>,
    pub topics: Vec<TopicTerm>,
    pub grammar_score: f64,
    pub relevance_score: f64,
    pub total_score: f64,
}

impl AnalysisResult {
    /// Returns `true` if the grammar check fell back to the diagnostic record.
    pub fn grammar_degraded(&self) -> bool {
        self.errors.iter().any(ErrorRecord::is_service_diagnostic)
    }
}
