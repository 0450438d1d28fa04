//! wordtok-core - Vocabulary and error types
//!
//! This crate provides the data structures shared by the wordtok
//! tokenizer: the word/id bijection and the error type.
//!
//! # Example
//!
//! ```rust
//! use wordtok_core::Vocabulary;
//!
//! let vocab = Vocabulary::from_words(["hello", "world", "hello"])?;
//! assert_eq!(vocab.len(), 2);
//! assert_eq!(vocab.get_token(1), Some("world"));
//! # Ok::<(), wordtok_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

pub mod vocab;
pub use vocab::{Vocab, VocabR, Vocabulary, MAX_VOCAB_SIZE};

/// Token ID as it appears in encode results and decode input.
///
/// Vocabulary ids are never negative; the signed type leaves room for
/// [`UNKNOWN_ID`].
pub type TokenId = i64;

/// Sentinel emitted by encode for a word missing from the active vocabulary.
pub const UNKNOWN_ID: TokenId = -1;

/// Placeholder emitted by decode for an id missing from the active vocabulary.
pub const UNKNOWN_TOKEN: &str = "<UNK>";
