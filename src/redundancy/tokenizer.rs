use std::sync::LazyLock;

use regex::Regex;

/// Dotted abbreviations (`e.g.`), words with inner apostrophes or hyphens,
/// then any single punctuation character.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[A-Za-z]\.){2,}|\w+(?:['’\-]\w+)*|[^\w\s]")
        .expect("token regex is valid")
});

/// A token with its position in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start_byte: usize,
    pub end_byte: usize,
    pub start_char: usize,
    pub end_char: usize,
}

impl Token<'_> {
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

/// Splits `text` into word and punctuation tokens.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars_seen = 0;
    let mut bytes_seen = 0;

    for m in TOKEN_RE.find_iter(text) {
        chars_seen += text[bytes_seen..m.start()].chars().count();
        let start_char = chars_seen;
        let end_char = start_char + m.as_str().chars().count();

        tokens.push(Token {
            text: m.as_str(),
            start_byte: m.start(),
            end_byte: m.end(),
            start_char,
            end_char,
        });

        chars_seen = end_char;
        bytes_seen = m.end();
    }

    tokens
}

/// Slice of `text` from character `start` to character `end` (exclusive),
/// clamped to the text.
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let byte_at = |n: usize| {
        text.char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(text.len())
    };
    let start_byte = byte_at(start);
    let end_byte = byte_at(end).max(start_byte);
    &text[start_byte..end_byte]
}
