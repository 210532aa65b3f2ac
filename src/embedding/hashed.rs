//! Hashed bag-of-words vectors.
//!
//! Lowercased words are hashed with BLAKE3 into a fixed number of buckets and
//! counted. Vectors are non-negative, so cosine similarity lies in `[0, 1]`.

use super::utils::normalize;

/// Bucket for `word` in a `dim`-bucket vector.
pub fn bucket(word: &str, dim: usize) -> usize {
    let hash = blake3::hash(word.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    (u64::from_le_bytes(bytes) % dim as u64) as usize
}

/// Normalised term-frequency vector of `text`; all zeros if it has no words.
pub fn hashed_embedding(text: &str, dim: usize) -> Vec<f32> {
    let mut vector = vec![0.0f32; dim];
    if dim == 0 {
        return vector;
    }

    for word in text
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
    {
        vector[bucket(&word.to_lowercase(), dim)] += 1.0;
    }

    normalize(&mut vector);
    vector
}
