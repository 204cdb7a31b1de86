//! Error types for the docchunk library.

use thiserror::Error;

/// Result type alias for docchunk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while configuring or running the chunker.
///
/// Chunking itself never fails: every degraded input (tokenizer crash,
/// over-budget section, empty document) has a documented fallback. Errors
/// here surface invalid configuration and tokenizer backends that could
/// not be constructed.
#[derive(Error, Debug)]
pub enum Error {
    /// The token budget is zero or otherwise unusable.
    #[error("Invalid token budget: {0}")]
    InvalidBudget(String),

    /// The underlying tokenizer failed to process a piece of text.
    #[error("Tokenizer error: {0}")]
    Tokenize(String),

    /// The tokenizer backend could not be loaded.
    #[error("Tokenizer backend error: {0}")]
    TokenizerBackend(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
