//! Redundant connector detection.
//!
//! Flags paired transition phrases that say the same thing twice
//! ("for instance, e.g.", "firstly first", ...). Matching runs over word
//! tokens with a fixed, ordered list of [`PhrasePattern`]s. Every match is
//! reported, including repeats of the same phrase.

pub mod pattern;
pub mod tokenizer;


pub use pattern::{Element, PhrasePattern, Predicate, default_patterns};
pub use tokenizer::{Token, char_slice, tokenize};

use tracing::debug;

use crate::constants::REDUNDANCY_CONTEXT_CHARS;
use crate::report::ErrorRecord;

/// Pattern matcher for redundant phrases. Build once and share.
#[derive(Debug, Clone)]
pub struct RedundancyDetector {
    patterns: Vec<PhrasePattern>,
}

impl Default for RedundancyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl RedundancyDetector {
    pub fn new() -> Self {
        Self::with_patterns(default_patterns())
    }

    pub fn with_patterns(patterns: Vec<PhrasePattern>) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &[PhrasePattern] {
        &self.patterns
    }

    /// Returns one record per match, ordered by position then pattern order.
    pub fn detect(&self, text: &str) -> Vec<ErrorRecord> {
        let tokens = tokenize(text);

        let mut spans = Vec::new();
        for start in 0..tokens.len() {
            for pattern in &self.patterns {
                for end in pattern.match_ends(&tokens, start) {
                    spans.push((start, end));
                }
            }
        }

        debug!(
            tokens = tokens.len(),
            matches = spans.len(),
            "Redundant phrase scan complete"
        );

        spans
            .into_iter()
            .map(|(start, end)| to_record(text, &tokens[start], &tokens[end - 1]))
            .collect()
    }
}

fn to_record(text: &str, first: &Token<'_>, last: &Token<'_>) -> ErrorRecord {
    let span = &text[first.start_byte..last.end_byte];
    let context_start = first.start_char.saturating_sub(REDUNDANCY_CONTEXT_CHARS);
    let context_end = last.end_char + REDUNDANCY_CONTEXT_CHARS;

    ErrorRecord {
        message: format!("Redundant phrase detected: '{}'. Consider revising.", span),
        offset: first.start_char,
        length: span.chars().count(),
        context: char_slice(text, context_start, context_end).to_string(),
        replacements: vec![span.to_string()],
    }
}
