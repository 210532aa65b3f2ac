//! Salient-term extraction via a one-document topic model.
//!
//! The essay is whitespace-split, lowercased and stripped of a few stopwords,
//! then a single-topic LDA model is fitted over it. With one document the
//! topic is a smoothed restatement of the essay's own term frequencies, which
//! is what the caller wants: its most prominent terms.

pub mod dictionary;
pub mod error;
pub mod lda;


pub use dictionary::{BagOfWords, Dictionary};
pub use error::TopicError;
pub use lda::{LdaConfig, LdaModel};

use std::collections::HashMap;

use tracing::debug;

use crate::constants::{TOPIC_STOPWORDS, TOPIC_TERMS};
use crate::report::TopicTerm;

#[derive(Debug, Clone)]
pub struct TopicExtractor {
    config: LdaConfig,
    top_n: usize,
}

impl Default for TopicExtractor {
    fn default() -> Self {
        Self {
            config: LdaConfig::default(),
            top_n: TOPIC_TERMS,
        }
    }
}

impl TopicExtractor {
    pub fn new(config: LdaConfig, top_n: usize) -> Result<Self, TopicError> {
        config.validate()?;
        Ok(Self { config, top_n })
    }

    /// Returns up to `top_n` weighted terms of the first topic, or the
    /// `("No topics identified", 0.0)` placeholder if no terms survive.
    pub fn extract(&self, text: &str) -> Result<Vec<TopicTerm>, TopicError> {
        let tokens = topic_tokens(text);
        let tokens = retain_by_frequency(tokens);

        let dictionary = Dictionary::from_documents(std::slice::from_ref(&tokens));
        let bow = dictionary.doc2bow(&tokens);
        if bow.is_empty() {
            debug!("No topic terms after stopword removal");
            return Ok(vec![TopicTerm::none_identified()]);
        }

        let model = LdaModel::fit(&[bow], dictionary.len(), &self.config)?;

        Ok(model
            .top_terms(0, self.top_n)
            .into_iter()
            .filter_map(|(id, weight)| {
                dictionary
                    .token(id)
                    .map(|term| TopicTerm(term.to_string(), round3(weight)))
            })
            .collect())
    }
}

/// Lowercased whitespace tokens minus stopwords.
pub fn topic_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|token| !TOPIC_STOPWORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Keeps tokens seen once or more often; every token qualifies, so nothing
/// is dropped.
fn retain_by_frequency(tokens: Vec<String>) -> Vec<String> {
    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for token in &tokens {
        *frequency.entry(token.as_str()).or_default() += 1;
    }

    let keep: Vec<bool> = tokens
        .iter()
        .map(|token| {
            let count = frequency[token.as_str()];
            count > 1 || count == 1
        })
        .collect();

    tokens
        .into_iter()
        .zip(keep)
        .filter_map(|(token, keep)| keep.then_some(token))
        .collect()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
