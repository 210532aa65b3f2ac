use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Sparse document vector: `(term id, count)` sorted by id.
pub type BagOfWords = Vec<(usize, u32)>;

/// Token <-> id mapping built from a corpus.
///
/// New tokens from each document get ids in sorted order, so for a single
/// document ids follow alphabetical order.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    token2id: HashMap<String, usize>,
    id2token: Vec<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents<S: AsRef<str>>(documents: &[Vec<S>]) -> Self {
        let mut dictionary = Self::new();
        for document in documents {
            dictionary.add_document(document);
        }
        dictionary
    }

    pub fn add_document<S: AsRef<str>>(&mut self, document: &[S]) {
        let unseen: BTreeSet<&str> = document
            .iter()
            .map(AsRef::as_ref)
            .filter(|token| !self.token2id.contains_key(*token))
            .collect();

        for token in unseen {
            self.token2id.insert(token.to_string(), self.id2token.len());
            self.id2token.push(token.to_string());
        }
    }

    /// Counts known tokens of `document`; unknown tokens are skipped.
    pub fn doc2bow<S: AsRef<str>>(&self, document: &[S]) -> BagOfWords {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for token in document {
            if let Some(&id) = self.token2id.get(token.as_ref()) {
                *counts.entry(id).or_default() += 1;
            }
        }
        counts.into_iter().collect()
    }

    pub fn id(&self, token: &str) -> Option<usize> {
        self.token2id.get(token).copied()
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.id2token.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.id2token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2token.is_empty()
    }
}
