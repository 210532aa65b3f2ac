//! Grammar checking against a remote LanguageTool service.
//!
//! The text is checked twice, once per English locale, and only spans flagged
//! by both checks are reported. Spans on the abbreviation allow-list
//! (`e.g.`, `etc.`, ...) are ignored.
//!
//! A failing service does not fail the analysis: [`GrammarChecker::check`]
//! returns a single zero-length diagnostic record instead.

pub mod checker;
pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod types;


pub use checker::{GrammarChecker, cross_locale_errors};
pub use client::{GrammarService, LanguageToolClient, utf16_span_to_chars};
pub use error::GrammarError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockGrammarService;
pub use types::{GrammarMatch, Locale, MatchContext};
