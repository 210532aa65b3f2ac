use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use crate::constants::ABBREVIATION_ALLOW_LIST;
use crate::report::{ErrorRecord, dedup_by_span};

use super::client::GrammarService;
use super::types::{GrammarMatch, Locale};

/// Grammar check that only reports spans flagged under both en-GB and en-US.
#[derive(Debug, Clone)]
pub struct GrammarChecker<S> {
    service: S,
}

impl<S: GrammarService> GrammarChecker<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Checks `text` with both locales.
    ///
    /// Never fails: if either call errors, the result is a single diagnostic
    /// record (see [`ErrorRecord::service_unavailable`]).
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn check(&self, text: &str) -> Vec<ErrorRecord> {
        let mut per_locale = Vec::with_capacity(Locale::ALL.len());
        for locale in Locale::ALL {
            match self.service.check(text, locale).await {
                Ok(matches) => per_locale.push(matches),
                Err(e) => {
                    warn!(%locale, error = %e, "Grammar service failed, skipping grammar check");
                    return vec![ErrorRecord::service_unavailable(e)];
                }
            }
        }

        let errors = cross_locale_errors(&per_locale[0], &per_locale[1]);
        debug!(
            gb_matches = per_locale[0].len(),
            us_matches = per_locale[1].len(),
            reported = errors.len(),
            "Grammar check complete"
        );
        errors
    }
}

fn is_abbreviation(span: &str) -> bool {
    ABBREVIATION_ALLOW_LIST.contains(&span)
}

fn flagged_spans(matches: &[GrammarMatch]) -> HashSet<String> {
    matches
        .iter()
        .map(GrammarMatch::flagged_span)
        .filter(|span| !is_abbreviation(span))
        .collect()
}

/// Builds error records for spans both locales agree on.
///
/// Matches are visited GB first, then US; the first record per
/// `(offset, length)` wins.
pub fn cross_locale_errors(gb: &[GrammarMatch], us: &[GrammarMatch]) -> Vec<ErrorRecord> {
    let gb_spans = flagged_spans(gb);
    let us_spans = flagged_spans(us);
    let common: HashSet<&String> = gb_spans.intersection(&us_spans).collect();

    let records = gb
        .iter()
        .chain(us.iter())
        .filter_map(|m| {
            let span = m.flagged_span();
            common.contains(&span).then(|| to_record(m, &span))
        })
        .collect();

    dedup_by_span(records)
}

fn to_record(m: &GrammarMatch, span: &str) -> ErrorRecord {
    let message = match m.replacements.first() {
        Some(best) => format!("{} '{}' should be '{}'", m.message, span, best),
        None => m.message.clone(),
    };

    ErrorRecord {
        message,
        offset: m.offset,
        length: m.length,
        context: m.context.text.clone(),
        replacements: m.replacements.clone(),
    }
}
