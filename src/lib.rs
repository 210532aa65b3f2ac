//! Essay grader library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Analysis
//! - [`EssayAnalyzer`] - runs every stage and assembles an [`AnalysisResult`]
//! - [`GrammarChecker`], [`LanguageToolClient`] - two-locale grammar check
//! - [`RedundancyDetector`] - redundant-phrase patterns
//! - [`TopicExtractor`] - single-topic LDA keywords
//! - [`EssayScorer`], [`DocumentEmbedder`] - grammar, relevance and total scores
//!
//! ## Serving
//! - [`Config`], [`ConfigError`] - server configuration
//! - [`gateway`] - Axum router, handlers and error mapping
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod analysis;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod grammar;
pub mod redundancy;
pub mod report;
pub mod scoring;
pub mod topics;

pub use analysis::{AnalysisError, EssayAnalyzer};
pub use config::{Config, ConfigError};
pub use embedding::{DocumentEmbedder, EmbedderConfig, EmbeddingError};
#[cfg(any(test, feature = "mock"))]
pub use grammar::MockGrammarService;
pub use grammar::{GrammarChecker, GrammarError, GrammarService, LanguageToolClient, Locale};
pub use redundancy::RedundancyDetector;
pub use report::{AnalysisResult, ErrorRecord, TopicTerm};
pub use scoring::{EssayScorer, EssayScores, ScoringError, ScoringRubric};
pub use topics::{TopicError, TopicExtractor};
