//! wordtok - Minimal word-level tokenizer
//!
//! Text is cleaned (Unicode normalization plus whitespace collapsing),
//! split into words, and every distinct word gets an id in
//! first-occurrence order. The vocabulary is rebuilt on every `encode`
//! call and `decode` reverses ids against that latest vocabulary.
//!
//! # Features
//!
//! - Pluggable word segmentation, chosen once at construction
//! - UAX #29 word boundaries via the default `unicode-words` feature
//! - Soft failures: unknown ids decode to `<UNK>` instead of erroring
//!
//! # Example
//!
//! ```rust
//! use wordtok::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::new();
//! let encoding = tokenizer.encode("to be or not to be")?;
//! assert_eq!(encoding.token_ids, vec![0, 1, 2, 3, 0, 1]);
//!
//! let text = tokenizer.decode(&encoding.token_ids)?;
//! assert_eq!(text, "to be or not to be");
//! # Ok::<(), wordtok::TokenizerError>(())
//! ```

// Re-export core types
pub use wordtok_core::{Result, TokenId, TokenizerError, Vocabulary, UNKNOWN_ID, UNKNOWN_TOKEN};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{EncodeResult, Tokenizer, TokenizerBuilder, TokenizerConfig, VocabularyListing};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{
    NormalizationForm, Normalizer, SegmenterKind, WhitespaceSegmenter, WordSegmenter,
};
#[cfg(feature = "unicode-words")]
pub use pre_tokenizer::UnicodeWordSegmenter;

// Utilities
pub mod utils;
pub use utils::parse_token_ids;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
