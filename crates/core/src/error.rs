//! Error types for the wordtok tokenizer.

use thiserror::Error;

/// Main error type for the tokenizer library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    /// Input of the wrong shape (non UTF-8 text, malformed id list)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Decode attempted before any successful encode
    #[error("Vocabulary not built yet. Please encode some text first.")]
    VocabularyNotBuilt,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Vocabulary overflow
    #[error("Vocabulary size exceeded maximum of {max} (tried to add {tried})")]
    VocabularyOverflow { max: usize, tried: usize },
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
