//! Whole-document vectors for relevance scoring.
//!
//! [`DocumentEmbedder`] is loaded once at startup and shared read-only. It
//! either runs a BERT sentence encoder ([`bert`]) or, when no model directory
//! is configured, falls back to hashed bag-of-words vectors ([`hashed`]).

/// BERT sentence encoder.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Hashed bag-of-words vectors.
pub mod hashed;
/// Tokenizer loading and vector helpers.
pub mod utils;

#[cfg(test)]
mod tests;

pub use bert::BertEncoder;
pub use error::EmbeddingError;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::constants::{HASHED_EMBEDDING_DIM, MAX_SEQ_LEN};

/// Configuration for [`DocumentEmbedder`].
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Encoder directory. `None` selects the hashed backend.
    pub model_path: Option<PathBuf>,
    /// Token limit for the encoder.
    pub max_seq_len: usize,
    /// Bucket count of the hashed backend.
    pub hashed_dim: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: MAX_SEQ_LEN,
            hashed_dim: HASHED_EMBEDDING_DIM,
        }
    }
}

impl EmbedderConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    pub fn hashed() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.hashed_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "hashed_dim must be at least 1".to_string(),
            });
        }
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be at least 1".to_string(),
            });
        }
        if let Some(ref path) = self.model_path
            && !path.is_dir()
        {
            return Err(EmbeddingError::ModelNotFound { path: path.clone() });
        }
        Ok(())
    }
}

enum EmbedderBackend {
    Model(BertEncoder),
    Hashed { dim: usize },
}

/// Produces one vector per document.
pub struct DocumentEmbedder {
    backend: EmbedderBackend,
}

impl std::fmt::Debug for DocumentEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backend = match &self.backend {
            EmbedderBackend::Model(encoder) => format!("{:?}", encoder),
            EmbedderBackend::Hashed { dim } => format!("Hashed({})", dim),
        };
        f.debug_struct("DocumentEmbedder")
            .field("backend", &backend)
            .finish()
    }
}

impl DocumentEmbedder {
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let backend = match &config.model_path {
            Some(path) => {
                let device = device::select_device()?;
                debug!(?device, "Selected compute device for encoder");
                EmbedderBackend::Model(BertEncoder::load(path, device, config.max_seq_len)?)
            }
            None => {
                info!(
                    dim = config.hashed_dim,
                    "No encoder model configured, using hashed bag-of-words vectors"
                );
                EmbedderBackend::Hashed {
                    dim: config.hashed_dim,
                }
            }
        };

        Ok(Self { backend })
    }

    /// Hashed backend with the default dimension.
    pub fn hashed() -> Self {
        Self {
            backend: EmbedderBackend::Hashed {
                dim: HASHED_EMBEDDING_DIM,
            },
        }
    }

    /// Embeds `text`. Text without any word characters yields the zero vector.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Hashed { dim } => Ok(hashed::hashed_embedding(text, *dim)),
            EmbedderBackend::Model(encoder) => {
                if !utils::has_vocabulary(text) {
                    return Ok(vec![0.0; encoder.hidden_size()]);
                }
                let mut vector = encoder.encode(text)?;
                utils::normalize(&mut vector);
                Ok(vector)
            }
        }
    }

    pub fn dimension(&self) -> usize {
        match &self.backend {
            EmbedderBackend::Model(encoder) => encoder.hidden_size(),
            EmbedderBackend::Hashed { dim } => *dim,
        }
    }

    pub fn is_hashed(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Hashed { .. })
    }

    pub fn mode(&self) -> &'static str {
        if self.is_hashed() { "hashed" } else { "model" }
    }
}
