use serde::{Deserialize, Serialize};

/// English variant a grammar service is asked to check against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    /// Both locales in the order they are queried.
    pub const ALL: [Locale; 2] = [Locale::EnGb, Locale::EnUs];

    /// Language code understood by LanguageTool.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::EnGb => "en-GB",
            Locale::EnUs => "en-US",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Snippet of the checked text around a match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchContext {
    pub text: String,
    /// Start of the flagged span inside `text`, in characters (not UTF-16 units).
    pub offset: usize,
    pub length: usize,
}

/// One issue reported by a grammar service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GrammarMatch {
    pub message: String,
    /// Start of the flagged span in the full text, in characters (not UTF-16 units).
    pub offset: usize,
    pub length: usize,
    /// Suggested fixes, best first.
    pub replacements: Vec<String>,
    pub context: MatchContext,
}

impl GrammarMatch {
    /// The flagged text, cut out of the context snippet.
    pub fn flagged_span(&self) -> String {
        self.context
            .text
            .chars()
            .skip(self.context.offset)
            .take(self.length)
            .collect()
    }
}
