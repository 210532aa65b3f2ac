use crate::constants::{
    ERROR_PENALTY, GRAMMAR_SCORE_CEILING, LENGTH_PENALTY, MIN_WORD_COUNT, RELEVANCE_SCALE,
};

#[derive(Debug, Clone, PartialEq)]
/// Point values used to turn analysis findings into scores.
pub struct ScoringRubric {
    /// Grammar score before deductions.
    pub grammar_ceiling: f64,
    /// Deduction per reported error.
    pub error_penalty: f64,
    /// Essays shorter than this (in words) lose [`Self::length_penalty`].
    pub min_word_count: usize,
    pub length_penalty: f64,
    /// Multiplier applied to the 0..=1 similarity.
    pub relevance_scale: f64,
}

impl Default for ScoringRubric {
    fn default() -> Self {
        Self {
            grammar_ceiling: GRAMMAR_SCORE_CEILING,
            error_penalty: ERROR_PENALTY,
            min_word_count: MIN_WORD_COUNT,
            length_penalty: LENGTH_PENALTY,
            relevance_scale: RELEVANCE_SCALE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// The three scores reported for an essay.
pub struct EssayScores {
    /// `0.0..=grammar_ceiling`.
    pub grammar_score: f64,
    /// `0.0..=relevance_scale`, two decimals.
    pub relevance_score: f64,
    /// Grammar plus relevance, minus the length penalty. May be negative.
    pub total_score: f64,
}

impl std::fmt::Display for EssayScores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "grammar {:.2} + relevance {:.2} => total {:.2}",
            self.grammar_score, self.relevance_score, self.total_score
        )
    }
}
