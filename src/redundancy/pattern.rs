use std::sync::LazyLock;

use regex::Regex;

use super::tokenizer::Token;

/// Condition a single token must satisfy.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Token text equals the literal exactly.
    Exact(&'static str),
    /// Lowercased token text equals the (lowercase) literal.
    Lower(&'static str),
    /// Token text matches the regex.
    Regex(Regex),
}

impl Predicate {
    pub fn matches(&self, token: &Token<'_>) -> bool {
        match self {
            Predicate::Exact(literal) => token.text == *literal,
            Predicate::Lower(literal) => token.lower() == *literal,
            Predicate::Regex(re) => re.is_match(token.text),
        }
    }
}

/// A predicate plus whether it may be skipped.
#[derive(Debug, Clone)]
pub struct Element {
    pub predicate: Predicate,
    pub optional: bool,
}

impl Element {
    pub fn lower(literal: &'static str) -> Self {
        Self {
            predicate: Predicate::Lower(literal),
            optional: false,
        }
    }

    pub fn exact(literal: &'static str) -> Self {
        Self {
            predicate: Predicate::Exact(literal),
            optional: false,
        }
    }

    pub fn regex(re: Regex) -> Self {
        Self {
            predicate: Predicate::Regex(re),
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// An ordered token sequence describing one redundant phrase.
#[derive(Debug, Clone)]
pub struct PhrasePattern {
    pub name: &'static str,
    pub elements: Vec<Element>,
}

impl PhrasePattern {
    pub fn new(name: &'static str, elements: Vec<Element>) -> Self {
        Self { name, elements }
    }

    /// End indices (exclusive) of every way this pattern matches starting at
    /// `start`, ascending and without repeats.
    pub fn match_ends(&self, tokens: &[Token<'_>], start: usize) -> Vec<usize> {
        let mut ends = Vec::new();
        self.collect_ends(tokens, 0, start, &mut ends);
        ends.retain(|&end| end > start);
        ends.sort_unstable();
        ends.dedup();
        ends
    }

    fn collect_ends(
        &self,
        tokens: &[Token<'_>],
        element: usize,
        position: usize,
        ends: &mut Vec<usize>,
    ) {
        let Some(el) = self.elements.get(element) else {
            ends.push(position);
            return;
        };

        if el.optional {
            self.collect_ends(tokens, element + 1, position, ends);
        }

        if let Some(token) = tokens.get(position)
            && el.predicate.matches(token)
        {
            self.collect_ends(tokens, element + 1, position + 1, ends);
        }
    }
}

static EG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^e\.g\.$").expect("e.g. regex is valid"));

static IE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^i\.e\.$").expect("i.e. regex is valid"));

/// The fixed list of redundant connector pairs, in reporting order.
pub fn default_patterns() -> Vec<PhrasePattern> {
    let comma = || Element::exact(",").optional();
    let eg = || Element::regex(EG_RE.clone());
    let ie = || Element::regex(IE_RE.clone());

    vec![
        PhrasePattern::new(
            "for_instance_eg",
            vec![Element::lower("for"), Element::lower("instance"), comma(), eg()],
        ),
        PhrasePattern::new(
            "in_addition_ie",
            vec![Element::lower("in"), Element::lower("addition"), comma(), ie()],
        ),
        PhrasePattern::new(
            "for_example_eg",
            vec![Element::lower("for"), Element::lower("example"), comma(), eg()],
        ),
        PhrasePattern::new(
            "that_is_ie",
            vec![Element::lower("that"), Element::lower("is"), comma(), ie()],
        ),
        PhrasePattern::new(
            "in_conclusion_to_conclude",
            vec![
                Element::lower("in"),
                Element::lower("conclusion"),
                comma(),
                Element::lower("to"),
                Element::lower("conclude"),
            ],
        ),
        PhrasePattern::new(
            "firstly_first",
            vec![Element::lower("firstly"), Element::lower("first")],
        ),
        PhrasePattern::new(
            "secondly_second",
            vec![Element::lower("secondly"), Element::lower("second")],
        ),
    ]
}
