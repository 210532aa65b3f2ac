use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::client::GrammarService;
use super::error::GrammarError;
use super::types::{GrammarMatch, Locale};

/// In-memory grammar service with canned per-locale answers.
#[derive(Debug, Clone, Default)]
pub struct MockGrammarService {
    matches: HashMap<Locale, Vec<GrammarMatch>>,
    failing: HashSet<Locale>,
    calls: Arc<AtomicUsize>,
}

impl MockGrammarService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `locale` with `matches`.
    pub fn with_matches(mut self, locale: Locale, matches: Vec<GrammarMatch>) -> Self {
        self.matches.insert(locale, matches);
        self
    }

    /// Answers both locales with the same `matches`.
    pub fn with_shared_matches(self, matches: Vec<GrammarMatch>) -> Self {
        self.with_matches(Locale::EnGb, matches.clone())
            .with_matches(Locale::EnUs, matches)
    }

    /// Makes every call for `locale` fail.
    pub fn failing(mut self, locale: Locale) -> Self {
        self.failing.insert(locale);
        self
    }

    /// Makes every call fail.
    pub fn unreachable() -> Self {
        Self::new().failing(Locale::EnGb).failing(Locale::EnUs)
    }

    /// Number of `check` calls made so far (across clones).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GrammarService for MockGrammarService {
    async fn check(&self, _text: &str, locale: Locale) -> Result<Vec<GrammarMatch>, GrammarError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.contains(&locale) {
            return Err(GrammarError::Unavailable {
                reason: format!("mock {} service offline", locale),
            });
        }

        Ok(self.matches.get(&locale).cloned().unwrap_or_default())
    }
}
