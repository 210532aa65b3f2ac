use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::error::GrammarError;
use super::types::{GrammarMatch, Locale, MatchContext};

/// Remote grammar checking backend.
#[async_trait]
pub trait GrammarService: Send + Sync {
    /// Checks `text` against one locale and returns every reported match.
    async fn check(&self, text: &str, locale: Locale) -> Result<Vec<GrammarMatch>, GrammarError>;
}

#[async_trait]
impl<T: GrammarService + ?Sized> GrammarService for std::sync::Arc<T> {
    async fn check(&self, text: &str, locale: Locale) -> Result<Vec<GrammarMatch>, GrammarError> {
        (**self).check(text, locale).await
    }
}

/// HTTP client for the LanguageTool `/v2/check` API.
#[derive(Debug, Clone)]
pub struct LanguageToolClient {
    client: Client,
    check_url: String,
}

const CHECK_PATH: &str = "/v2/check";

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<WireMatch>,
}

#[derive(Debug, Deserialize)]
struct WireMatch {
    #[serde(default)]
    message: String,
    offset: usize,
    length: usize,
    #[serde(default)]
    replacements: Vec<WireReplacement>,
    #[serde(default)]
    context: WireContext,
}

#[derive(Debug, Deserialize)]
struct WireReplacement {
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct WireContext {
    #[serde(default)]
    text: String,
    #[serde(default)]
    offset: usize,
    #[serde(default)]
    length: usize,
}

impl WireMatch {
    /// Converts the UTF-16 offsets LanguageTool reports into character
    /// offsets. `text` is the text that was checked.
    fn into_match(self, text: &str) -> GrammarMatch {
        let (offset, length) = utf16_span_to_chars(text, self.offset, self.length);
        let (context_offset, context_length) =
            utf16_span_to_chars(&self.context.text, self.context.offset, self.context.length);

        GrammarMatch {
            message: self.message,
            offset,
            length,
            replacements: self.replacements.into_iter().map(|r| r.value).collect(),
            context: MatchContext {
                text: self.context.text,
                offset: context_offset,
                length: context_length,
            },
        }
    }
}

/// Character index of the UTF-16 position `units` in `text`, clamped to the
/// end of `text`.
fn utf16_to_char_index(text: &str, units: usize) -> usize {
    let mut consumed = 0;
    let mut index = 0;
    for c in text.chars() {
        if consumed >= units {
            return index;
        }
        consumed += c.len_utf16();
        index += 1;
    }
    index
}

/// `(offset, length)` in UTF-16 code units to the same span in characters.
pub fn utf16_span_to_chars(text: &str, offset: usize, length: usize) -> (usize, usize) {
    let start = utf16_to_char_index(text, offset);
    let end = utf16_to_char_index(text, offset.saturating_add(length));
    (start, end - start)
}

impl LanguageToolClient {
    /// Builds a client for `base_url` (e.g. `https://api.languagetool.org`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GrammarError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            check_url: format!("{}{}", base_url.trim_end_matches('/'), CHECK_PATH),
        })
    }

    pub fn check_url(&self) -> &str {
        &self.check_url
    }

    /// Parses a raw `/v2/check` response body for the checked `text`.
    pub fn parse_response(body: &str, text: &str) -> Result<Vec<GrammarMatch>, GrammarError> {
        let parsed: CheckResponse =
            serde_json::from_str(body).map_err(|e| GrammarError::Decode {
                reason: e.to_string(),
            })?;
        Ok(parsed
            .matches
            .into_iter()
            .map(|m| m.into_match(text))
            .collect())
    }
}

#[async_trait]
impl GrammarService for LanguageToolClient {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn check(&self, text: &str, locale: Locale) -> Result<Vec<GrammarMatch>, GrammarError> {
        let response = self
            .client
            .post(&self.check_url)
            .form(&[("text", text), ("language", locale.code())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GrammarError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let matches = Self::parse_response(&body, text)?;
        debug!(count = matches.len(), "LanguageTool matches received");
        Ok(matches)
    }
}
