//! End-to-end essay analysis.
//!
//! [`EssayAnalyzer::analyze`] runs, in order: grammar check, redundant-phrase
//! detection, topic extraction, then scoring over the combined error list.
//! Only the grammar check touches the network, and its failures are already
//! folded into a diagnostic record, so a remote outage never aborts analysis.


use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};

use crate::embedding::DocumentEmbedder;
use crate::grammar::{GrammarChecker, GrammarService};
use crate::redundancy::RedundancyDetector;
use crate::report::AnalysisResult;
use crate::scoring::{EssayScorer, ScoringError, word_count};
use crate::topics::{TopicError, TopicExtractor};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("topic extraction failed: {0}")]
    Topics(#[from] TopicError),

    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}

/// Holds every analysis component. Build once at startup and share.
#[derive(Debug)]
pub struct EssayAnalyzer<G> {
    grammar: GrammarChecker<G>,
    redundancy: RedundancyDetector,
    topics: TopicExtractor,
    scorer: EssayScorer,
}

impl<G: GrammarService> EssayAnalyzer<G> {
    /// Default detector, topic model and rubric.
    pub fn new(grammar_service: G, embedder: Arc<DocumentEmbedder>) -> Self {
        Self::from_parts(
            GrammarChecker::new(grammar_service),
            RedundancyDetector::new(),
            TopicExtractor::default(),
            EssayScorer::new(embedder),
        )
    }

    pub fn from_parts(
        grammar: GrammarChecker<G>,
        redundancy: RedundancyDetector,
        topics: TopicExtractor,
        scorer: EssayScorer,
    ) -> Self {
        Self {
            grammar,
            redundancy,
            topics,
            scorer,
        }
    }

    #[instrument(skip_all, fields(words = word_count(text), context_len = context.len()))]
    pub async fn analyze(&self, text: &str, context: &str) -> Result<AnalysisResult, AnalysisError> {
        let mut errors = self.grammar.check(text).await;
        let grammar_errors = errors.len();
        errors.extend(self.redundancy.detect(text));

        let topics = self.topics.extract(text)?;
        let scores = self.scorer.score(text, &errors, context)?;

        info!(
            grammar_errors,
            phrase_errors = errors.len() - grammar_errors,
            %scores,
            "Essay analyzed"
        );

        Ok(AnalysisResult {
            original_text: text.to_string(),
            errors,
            topics,
            grammar_score: scores.grammar_score,
            relevance_score: scores.relevance_score,
            total_score: scores.total_score,
        })
    }
}
