//! Score arithmetic.
//!
//! - Grammar: starts at 20, loses 0.5 per error, never below 0.
//! - Relevance: document similarity to the context, scaled to 0..=10.
//! - Total: grammar + relevance, minus 10 for essays under 300 words. No floor.

pub mod error;
pub mod scorer;
pub mod types;


pub use error::ScoringError;
pub use scorer::{EssayScorer, cosine_similarity, word_count};
pub use types::{EssayScores, ScoringRubric};
