use std::sync::Arc;

use tracing::{debug, warn};

use crate::embedding::DocumentEmbedder;
use crate::report::ErrorRecord;

use super::error::ScoringError;
use super::types::{EssayScores, ScoringRubric};

pub struct EssayScorer {
    embedder: Arc<DocumentEmbedder>,
    rubric: ScoringRubric,
}

impl std::fmt::Debug for EssayScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EssayScorer")
            .field("embedder", &self.embedder)
            .field("rubric", &self.rubric)
            .finish()
    }
}

impl EssayScorer {
    pub fn new(embedder: Arc<DocumentEmbedder>) -> Self {
        Self::with_rubric(embedder, ScoringRubric::default())
    }

    pub fn with_rubric(embedder: Arc<DocumentEmbedder>, rubric: ScoringRubric) -> Self {
        Self { embedder, rubric }
    }

    pub fn rubric(&self) -> &ScoringRubric {
        &self.rubric
    }

    /// Ceiling minus a fixed penalty per error, floored at zero.
    pub fn grammar_score(&self, error_count: usize) -> f64 {
        let penalty = error_count as f64 * self.rubric.error_penalty;
        (self.rubric.grammar_ceiling - penalty).max(0.0)
    }

    /// Scaled similarity between `text` and `context`, rounded to two decimals.
    ///
    /// If either side has no usable vector (e.g. empty `context`) the score is
    /// `0.0` and a warning is logged.
    pub fn relevance_score(&self, text: &str, context: &str) -> Result<f64, ScoringError> {
        let context_vec = self.embedder.embed(context)?;
        let text_vec = self.embedder.embed(text)?;

        let similarity = match cosine_similarity(&context_vec, &text_vec)? {
            Some(similarity) => similarity.clamp(0.0, 1.0) as f64,
            None => {
                warn!(
                    text_len = text.len(),
                    context_len = context.len(),
                    "Similarity evaluated on an empty vector, relevance defaults to 0"
                );
                0.0
            }
        };

        Ok(round2(similarity * self.rubric.relevance_scale))
    }

    /// `grammar + relevance`, less the length penalty for short essays.
    pub fn total_score(&self, text: &str, grammar_score: f64, relevance_score: f64) -> f64 {
        let total = grammar_score + relevance_score;
        if word_count(text) < self.rubric.min_word_count {
            total - self.rubric.length_penalty
        } else {
            total
        }
    }

    pub fn score(
        &self,
        text: &str,
        errors: &[ErrorRecord],
        context: &str,
    ) -> Result<EssayScores, ScoringError> {
        let grammar_score = self.grammar_score(errors.len());
        let relevance_score = self.relevance_score(text, context)?;
        let total_score = self.total_score(text, grammar_score, relevance_score);

        let scores = EssayScores {
            grammar_score,
            relevance_score,
            total_score,
        };
        debug!(%scores, errors = errors.len(), "Essay scored");
        Ok(scores)
    }
}

/// Whitespace-separated word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Cosine similarity, or `None` if either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<Option<f32>, ScoringError> {
    if a.len() != b.len() {
        return Err(ScoringError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(None);
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    Ok(Some(dot / (norm_a * norm_b)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
