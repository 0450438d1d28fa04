//! Main tokenizer implementation.
//!
//! The `Tokenizer` owns a single vocabulary that is rebuilt from scratch on
//! every `encode` call. `decode` always reads the vocabulary of the most
//! recent encode, so ids from an older call generally come back as
//! `<UNK>` once another encode has run.

use crate::pre_tokenizer::{
    default_segmenter, NormalizationForm, Normalizer, SegmenterKind, WordSegmenter,
};
use crate::utils::parse_token_ids;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};
use wordtok_core::{
    Result, TokenId, TokenizerError, Vocabulary, MAX_VOCAB_SIZE, UNKNOWN_ID, UNKNOWN_TOKEN,
};

/// Configuration for building a tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Unicode normalization applied while cleaning
    pub normalization: NormalizationForm,
    /// Word segmentation strategy
    pub segmenter: SegmenterKind,
    /// Placeholder emitted by decode for unresolved ids
    pub unk_token: String,
    /// Maximum number of distinct words one encode call may produce
    pub max_vocab_size: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            normalization: NormalizationForm::NFKC,
            segmenter: SegmenterKind::Auto,
            unk_token: UNKNOWN_TOKEN.to_string(),
            max_vocab_size: MAX_VOCAB_SIZE,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the normalization form.
    pub fn normalization(mut self, form: NormalizationForm) -> Self {
        self.config.normalization = form;
        self
    }

    /// Set the segmentation strategy.
    pub fn segmenter(mut self, kind: SegmenterKind) -> Self {
        self.config.segmenter = kind;
        self
    }

    /// Set the placeholder for unresolved ids.
    pub fn unk_token(mut self, token: impl Into<String>) -> Self {
        self.config.unk_token = token.into();
        self
    }

    /// Cap the vocabulary size.
    pub fn max_vocab_size(mut self, size: usize) -> Self {
        self.config.max_vocab_size = size;
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        Tokenizer::with_config(self.config)
    }
}

/// Word-level tokenizer.
#[derive(Debug)]
pub struct Tokenizer {
    /// Vocabulary of the most recent encode call
    vocab: Vocabulary,
    /// Whether an encode has succeeded since construction or the last clear
    built: bool,
    /// Configuration
    config: TokenizerConfig,
    /// Text cleaner
    normalizer: Normalizer,
    /// Word segmentation strategy, fixed at construction
    segmenter: Box<dyn WordSegmenter>,
}

impl Tokenizer {
    /// Create a tokenizer with the default configuration.
    pub fn new() -> Self {
        let config = TokenizerConfig::default();
        Self {
            vocab: Vocabulary::new(),
            built: false,
            normalizer: Normalizer::new(config.normalization),
            segmenter: default_segmenter(),
            config,
        }
    }

    /// Create a tokenizer with the given configuration.
    pub fn with_config(config: TokenizerConfig) -> Result<Self> {
        if config.unk_token.is_empty() {
            return Err(TokenizerError::InvalidConfig(
                "unk_token must not be empty".to_string(),
            ));
        }

        let segmenter = config.segmenter.build()?;
        debug!(
            segmenter = segmenter.name(),
            normalization = ?config.normalization,
            "tokenizer initialized"
        );

        Ok(Self {
            vocab: Vocabulary::new(),
            built: false,
            normalizer: Normalizer::new(config.normalization),
            segmenter,
            config,
        })
    }

    /// Replace the segmentation strategy with a custom one.
    ///
    /// `config().segmenter` keeps the kind requested at build time and no
    /// longer describes the active strategy; use [`Tokenizer::segmenter_name`].
    pub fn with_segmenter(mut self, segmenter: Box<dyn WordSegmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Normalize, collapse whitespace runs and trim.
    ///
    /// Case and punctuation are preserved.
    pub fn clean_text(&self, text: &str) -> String {
        self.normalizer.clean(text)
    }

    /// Clean raw bytes; fails if they are not valid UTF-8.
    pub fn clean_bytes(&self, bytes: &[u8]) -> Result<String> {
        Ok(self.clean_text(as_text(bytes)?))
    }

    /// Split cleaned text into words with the configured segmenter.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.segmenter
            .segment(text)
            .into_iter()
            .filter(|word| !word.trim().is_empty())
            .collect()
    }

    /// Replace the vocabulary with one built from `words`.
    ///
    /// The previous vocabulary is discarded first; if the new one cannot be
    /// built the tokenizer is left unbuilt.
    fn build_vocabulary(&mut self, words: &[String]) -> Result<()> {
        self.vocab.clear();
        self.built = false;

        debug!(words = words.len(), "building vocabulary");
        let mut vocab =
            Vocabulary::with_capacity(words.len()).with_limit(self.config.max_vocab_size);
        vocab.extend(words)?;

        self.vocab = vocab;
        self.built = true;
        debug!(size = self.vocab.len(), "vocabulary built");
        Ok(())
    }

    /// Encode text, rebuilding the vocabulary from this text alone.
    ///
    /// Empty input is valid and yields an empty result with the vocabulary
    /// still marked as built.
    pub fn encode(&mut self, text: &str) -> Result<EncodeResult> {
        let cleaned_text = self.clean_text(text);
        let words = self.tokenize(&cleaned_text);
        self.build_vocabulary(&words)?;

        let token_ids: Vec<TokenId> = words
            .iter()
            .map(|word| match self.vocab.get_id(word) {
                Some(id) => TokenId::from(id),
                None => {
                    warn!(word = %word, "word not found in vocabulary");
                    UNKNOWN_ID
                }
            })
            .collect();

        Ok(EncodeResult {
            original_text: text.to_string(),
            cleaned_text,
            vocabulary_size: self.vocab.len(),
            token_count: token_ids.len(),
            words,
            token_ids,
        })
    }

    /// Encode raw bytes; fails if they are not valid UTF-8.
    pub fn encode_bytes(&mut self, bytes: &[u8]) -> Result<EncodeResult> {
        let text = as_text(bytes)?;
        self.encode(text)
    }

    /// Decode ids against the vocabulary of the most recent encode.
    ///
    /// Unresolved ids become the configured placeholder (`<UNK>`) instead
    /// of failing the call.
    pub fn decode(&self, ids: &[TokenId]) -> Result<String> {
        if !self.built {
            return Err(TokenizerError::VocabularyNotBuilt);
        }
        debug!(?ids, "decoding");

        let words: Vec<&str> = ids
            .iter()
            .map(|&id| {
                match u32::try_from(id).ok().and_then(|id| self.vocab.get_token(id)) {
                    Some(word) => word,
                    None => {
                        warn!(id, "token ID not found in vocabulary");
                        self.config.unk_token.as_str()
                    }
                }
            })
            .collect();

        let text = words.join(" ");
        debug!(text = %text, "reconstructed text");
        Ok(text)
    }

    /// Parse a JSON or comma-separated id list and decode it.
    pub fn decode_str(&self, input: &str) -> Result<String> {
        if !self.built {
            return Err(TokenizerError::VocabularyNotBuilt);
        }
        let ids = parse_token_ids(input)?;
        self.decode(&ids)
    }

    /// Current vocabulary sorted by id, or `None` if nothing is built.
    pub fn show_vocabulary(&self) -> Option<VocabularyListing> {
        if !self.built {
            return None;
        }
        let entries = self
            .vocab
            .entries()
            .into_iter()
            .map(|(id, word)| (id, word.to_string()))
            .collect();
        Some(VocabularyListing { entries })
    }

    /// Reset to the empty, unbuilt state.
    pub fn clear_vocab(&mut self) {
        self.vocab.clear();
        self.built = false;
        debug!("vocabulary cleared");
    }

    /// Whether an encode has succeeded since construction or the last clear.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Get the configuration.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Name of the active segmenter.
    pub fn segmenter_name(&self) -> &'static str {
        self.segmenter.name()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn as_text(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes)
        .map_err(|e| TokenizerError::InvalidInput(format!("Input must be a string: {}", e)))
}

/// Result of encoding text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeResult {
    /// Text as passed in
    pub original_text: String,
    /// Text after normalization and whitespace cleanup
    pub cleaned_text: String,
    /// Words in input order, duplicates kept
    pub words: Vec<String>,
    /// One id per word
    pub token_ids: Vec<TokenId>,
    /// Distinct words in this call's vocabulary
    pub vocabulary_size: usize,
    /// Number of ids
    pub token_count: usize,
}

impl EncodeResult {
    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.token_ids.len()
    }

    /// Check if the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.token_ids.is_empty()
    }
}

/// Snapshot of the vocabulary for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyListing {
    entries: Vec<(u32, String)>,
}

impl VocabularyListing {
    /// `(id, word)` pairs in ascending id order.
    pub fn entries(&self) -> &[(u32, String)] {
        &self.entries
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the listing is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for VocabularyListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== CURRENT VOCABULARY ===")?;
        for (id, word) in &self.entries {
            writeln!(f, "{}: \"{}\"", id, word)?;
        }
        write!(f, "\nTotal vocabulary size: {}", self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pre_tokenizer::WhitespaceSegmenter;

    fn whitespace_tokenizer() -> Tokenizer {
        Tokenizer::builder()
            .segmenter(SegmenterKind::Whitespace)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder() {
        let tokenizer = Tokenizer::builder()
            .normalization(NormalizationForm::NFC)
            .segmenter(SegmenterKind::Whitespace)
            .unk_token("[?]")
            .build()
            .unwrap();

        assert_eq!(tokenizer.config().normalization, NormalizationForm::NFC);
        assert_eq!(tokenizer.config().unk_token, "[?]");
        assert_eq!(tokenizer.segmenter_name(), "whitespace");
        assert!(!tokenizer.is_built());
        assert_eq!(tokenizer.vocab_size(), 0);
    }

    #[test]
    fn test_builder_rejects_empty_unk() {
        let result = Tokenizer::builder().unk_token("").build();
        assert!(matches!(result, Err(TokenizerError::InvalidConfig(_))));
    }

    #[test]
    fn test_encode_scenario() {
        let mut tokenizer = whitespace_tokenizer();
        let result = tokenizer.encode("Hello world! How are you?").unwrap();

        assert_eq!(result.words, vec!["Hello", "world!", "How", "are", "you?"]);
        assert_eq!(result.token_ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(result.vocabulary_size, 5);
        assert_eq!(result.token_count, 5);
        assert_eq!(result.len(), 5);

        let decoded = tokenizer.decode(&[0, 1, 2, 3, 4]).unwrap();
        assert_eq!(decoded, "Hello world! How are you?");
    }

    #[test]
    fn test_encode_duplicates_share_ids() {
        let mut tokenizer = whitespace_tokenizer();
        let result = tokenizer.encode("the cat saw the dog the end").unwrap();

        assert_eq!(result.token_ids, vec![0, 1, 2, 0, 3, 0, 4]);
        assert_eq!(result.vocabulary_size, 5);
        assert_eq!(result.token_count, 7);
    }

    #[test]
    fn test_encode_keeps_original_and_cleaned_text() {
        let mut tokenizer = whitespace_tokenizer();
        let result = tokenizer.encode("  Ｈｉ\tthere \n").unwrap();

        assert_eq!(result.original_text, "  Ｈｉ\tthere \n");
        assert_eq!(result.cleaned_text, "Hi there");
        assert_eq!(result.words, vec!["Hi", "there"]);
    }

    #[test]
    fn test_encode_empty() {
        let mut tokenizer = whitespace_tokenizer();
        let result = tokenizer.encode("").unwrap();

        assert!(result.words.is_empty());
        assert!(result.token_ids.is_empty());
        assert_eq!(result.vocabulary_size, 0);
        assert!(result.is_empty());
        assert!(tokenizer.is_built());
        assert_eq!(tokenizer.decode(&[]).unwrap(), "");
        assert_eq!(tokenizer.decode(&[0]).unwrap(), "<UNK>");
    }

    #[test]
    fn test_encode_replaces_vocabulary() {
        let mut tokenizer = whitespace_tokenizer();
        let first = tokenizer.encode("alpha beta gamma delta").unwrap();
        tokenizer.encode("one two").unwrap();

        assert_eq!(tokenizer.vocab_size(), 2);
        assert_eq!(tokenizer.vocab().get_id("alpha"), None);

        let decoded = tokenizer.decode(&first.token_ids).unwrap();
        assert_eq!(decoded, "one two <UNK> <UNK>");
    }

    #[test]
    fn test_decode_before_encode() {
        let tokenizer = whitespace_tokenizer();
        assert_eq!(
            tokenizer.decode(&[0]).unwrap_err(),
            TokenizerError::VocabularyNotBuilt
        );
        assert_eq!(
            tokenizer.decode_str("[0]").unwrap_err(),
            TokenizerError::VocabularyNotBuilt
        );
    }

    #[test]
    fn test_clear_then_decode_fails() {
        let mut tokenizer = whitespace_tokenizer();
        tokenizer.encode("some words").unwrap();
        tokenizer.clear_vocab();

        assert!(!tokenizer.is_built());
        assert_eq!(tokenizer.vocab_size(), 0);
        assert!(tokenizer.show_vocabulary().is_none());
        assert_eq!(
            tokenizer.decode(&[0]).unwrap_err(),
            TokenizerError::VocabularyNotBuilt
        );
    }

    #[test]
    fn test_decode_unknown_ids() {
        let mut tokenizer = whitespace_tokenizer();
        tokenizer.encode("hello world").unwrap();

        let decoded = tokenizer.decode(&[0, 1, 99]).unwrap();
        assert_eq!(decoded, "hello world <UNK>");
        assert_eq!(decoded.split(' ').count(), 3);

        assert_eq!(tokenizer.decode(&[-1, 1]).unwrap(), "<UNK> world");
        assert_eq!(tokenizer.decode(&[i64::MAX]).unwrap(), "<UNK>");
    }

    #[test]
    fn test_custom_unk_token() {
        let mut tokenizer = Tokenizer::builder()
            .segmenter(SegmenterKind::Whitespace)
            .unk_token("[?]")
            .build()
            .unwrap();
        tokenizer.encode("a").unwrap();
        assert_eq!(tokenizer.decode(&[0, 5]).unwrap(), "a [?]");
    }

    #[test]
    fn test_decode_str() {
        let mut tokenizer = whitespace_tokenizer();
        tokenizer.encode("x y z").unwrap();

        assert_eq!(tokenizer.decode_str("[2,1,0]").unwrap(), "z y x");
        assert_eq!(tokenizer.decode_str("0, 0").unwrap(), "x x");
        assert!(matches!(
            tokenizer.decode_str("zero"),
            Err(TokenizerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_bytes_input() {
        let mut tokenizer = whitespace_tokenizer();
        assert_eq!(tokenizer.clean_bytes(b" a  b ").unwrap(), "a b");

        let err = tokenizer.encode_bytes(&[0x66, 0xff, 0x6f]).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidInput(_)));
        assert!(!tokenizer.is_built());

        let result = tokenizer.encode_bytes("héllo".as_bytes()).unwrap();
        assert_eq!(result.words, vec!["héllo"]);
    }

    #[test]
    fn test_show_vocabulary() {
        let mut tokenizer = whitespace_tokenizer();
        assert!(tokenizer.show_vocabulary().is_none());

        tokenizer.encode("b a b c").unwrap();
        let listing = tokenizer.show_vocabulary().unwrap();

        assert_eq!(listing.len(), 3);
        assert_eq!(
            listing.entries(),
            &[(0, "b".to_string()), (1, "a".to_string()), (2, "c".to_string())]
        );
        assert_eq!(
            listing.to_string(),
            "=== CURRENT VOCABULARY ===\n0: \"b\"\n1: \"a\"\n2: \"c\"\n\nTotal vocabulary size: 3"
        );
    }

    #[test]
    fn test_show_vocabulary_after_empty_encode() {
        let mut tokenizer = whitespace_tokenizer();
        tokenizer.encode("   ").unwrap();
        let listing = tokenizer.show_vocabulary().unwrap();
        assert!(listing.is_empty());
    }

    #[test]
    fn test_overflow_leaves_tokenizer_unbuilt() {
        let mut tokenizer = Tokenizer::builder()
            .segmenter(SegmenterKind::Whitespace)
            .max_vocab_size(2)
            .build()
            .unwrap();
        tokenizer.encode("a b").unwrap();

        let err = tokenizer.encode("a b c").unwrap_err();
        assert_eq!(err, TokenizerError::VocabularyOverflow { max: 2, tried: 3 });
        assert!(!tokenizer.is_built());
        assert_eq!(tokenizer.vocab_size(), 0);
    }

    #[derive(Debug)]
    struct CommaSegmenter;

    impl WordSegmenter for CommaSegmenter {
        fn segment(&self, text: &str) -> Vec<String> {
            text.split(',').map(|s| s.to_string()).collect()
        }

        fn name(&self) -> &'static str {
            "comma"
        }
    }

    #[test]
    fn test_custom_segmenter_output_is_filtered() {
        let mut tokenizer = Tokenizer::new().with_segmenter(Box::new(CommaSegmenter));
        let result = tokenizer.encode("a,, ,b,a").unwrap();

        assert_eq!(tokenizer.segmenter_name(), "comma");
        assert_eq!(tokenizer.config().segmenter, SegmenterKind::Auto);
        assert_eq!(result.words, vec!["a", "b", "a"]);
        assert_eq!(result.token_ids, vec![0, 1, 0]);
    }

    #[cfg(feature = "unicode-words")]
    #[test]
    fn test_default_splits_on_word_boundaries() {
        let mut tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.segmenter_name(), "unicode");

        let result = tokenizer.encode("Hello world!").unwrap();
        assert_eq!(result.words, vec!["Hello", "world", "!"]);
        assert_eq!(result.token_ids, vec![0, 1, 2]);
        assert_eq!(tokenizer.decode(&result.token_ids).unwrap(), "Hello world !");
    }

    #[test]
    fn test_default_matches_whitespace_without_feature() {
        let tokenizer = Tokenizer::default();
        if !SegmenterKind::unicode_available() {
            assert_eq!(tokenizer.segmenter_name(), WhitespaceSegmenter.name());
        }
    }

    #[test]
    fn test_encode_result_json() {
        let mut tokenizer = whitespace_tokenizer();
        let result = tokenizer.encode("hi hi").unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["originalText"], "hi hi");
        assert_eq!(json["tokenIds"], serde_json::json!([0, 0]));
        assert_eq!(json["vocabularySize"], 1);
        assert_eq!(json["tokenCount"], 2);
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: TokenizerConfig =
            serde_json::from_str(r#"{"segmenter":"whitespace"}"#).unwrap();
        assert_eq!(config.segmenter, SegmenterKind::Whitespace);
        assert_eq!(config.normalization, NormalizationForm::NFKC);
        assert_eq!(config.unk_token, "<UNK>");
    }
}
