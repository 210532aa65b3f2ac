use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopicError {
    #[error("invalid topic model configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("cannot fit a topic model over an empty vocabulary")]
    EmptyVocabulary,

    #[error("term id {id} is outside the vocabulary of {num_terms} terms")]
    TermOutOfRange { id: usize, num_terms: usize },
}
