//! Cross-cutting, shared constants.
//!
//! Scoring constants are the published rubric; changing any of them changes every
//! score the service returns.

/// Grammar score before deductions.
pub const GRAMMAR_SCORE_CEILING: f64 = 20.0;

/// Points deducted from the grammar score per reported error.
pub const ERROR_PENALTY: f64 = 0.5;

/// Essays with fewer whitespace-separated words than this are penalised.
pub const MIN_WORD_COUNT: usize = 300;

/// Points subtracted from the total score for short essays.
pub const LENGTH_PENALTY: f64 = 10.0;

/// Similarity (0..=1) is multiplied by this to produce the relevance score.
pub const RELEVANCE_SCALE: f64 = 10.0;

/// Characters of surrounding text kept on each side of a redundant phrase.
pub const REDUNDANCY_CONTEXT_CHARS: usize = 30;

/// Topics fitted per essay.
pub const TOPIC_COUNT: usize = 1;

/// Optimisation passes over the (single-document) corpus.
pub const TOPIC_PASSES: usize = 15;

/// Terms reported for the fitted topic.
pub const TOPIC_TERMS: usize = 4;

/// Tokens dropped before topic modelling.
pub const TOPIC_STOPWORDS: &[&str] = &["for", "a", "of", "the", "and", "to", "in"];

/// Label returned in place of topics when nothing is left after stopword removal.
pub const NO_TOPICS_LABEL: &str = "No topics identified";

/// Flagged spans that are never reported as grammar errors.
pub const ABBREVIATION_ALLOW_LIST: &[&str] =
    &["e.g.", "i.e.", "etc.", "Mr.", "Mrs.", "Dr.", "Prof."];

/// Bucket count of the hashed bag-of-words embedding.
pub const HASHED_EMBEDDING_DIM: usize = 512;

/// Token limit for the BERT sentence encoder.
pub const MAX_SEQ_LEN: usize = 512;

/// Response header carrying a short machine-readable outcome.
pub const ESSAY_STATUS_HEADER: &str = "x-essay-status";

/// Header value for a completed analysis.
pub const ESSAY_STATUS_ANALYZED: &str = "analyzed";

/// Header value for a completed analysis whose grammar check fell back.
pub const ESSAY_STATUS_DEGRADED: &str = "degraded";

/// Header value for health probes.
pub const ESSAY_STATUS_HEALTHY: &str = "healthy";
