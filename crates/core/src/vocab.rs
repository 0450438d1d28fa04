//! Vocabulary storage and lookup.
//!
//! A `Vocabulary` is a bijection between words and dense ids `0..len`,
//! assigned in first-occurrence order. Both directions are kept in
//! `AHashMap`s with `CompactString` keys/values so lookups stay cheap.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;

/// Forward mapping: word -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Reverse mapping: ID -> word
pub type VocabR = AHashMap<u32, CompactString>;

/// Largest number of entries a vocabulary can hold (ids are `u32`).
pub const MAX_VOCAB_SIZE: usize = u32::MAX as usize;

/// Vocabulary with forward and reverse mappings.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Forward mapping: word -> ID
    vocab: Vocab,
    /// Reverse mapping: ID -> word
    vocab_r: VocabR,
    /// Maximum number of entries
    limit: usize,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vocab: Vocab::with_capacity(capacity),
            vocab_r: VocabR::with_capacity(capacity),
            limit: MAX_VOCAB_SIZE,
        }
    }

    /// Cap the number of entries; `add_token` fails past this point.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(MAX_VOCAB_SIZE);
        self
    }

    /// Build a vocabulary from scratch out of an ordered word list.
    ///
    /// Duplicates keep the id of their first occurrence and empty words
    /// are skipped, so ids stay dense.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self::new();
        vocab.extend(words)?;
        Ok(vocab)
    }

    /// Add every non-empty word in order.
    pub fn extend<I, S>(&mut self, words: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            self.add_token(word)?;
        }
        Ok(())
    }

    /// Add a word to the vocabulary.
    ///
    /// Returns the ID assigned to the word, or its existing ID.
    pub fn add_token(&mut self, token: &str) -> Result<u32> {
        if let Some(&id) = self.vocab.get(token) {
            return Ok(id);
        }

        let next = self.vocab.len();
        if next >= self.limit {
            return Err(TokenizerError::VocabularyOverflow {
                max: self.limit,
                tried: next + 1,
            });
        }

        let id = next as u32;
        let token = CompactString::new(token);
        self.vocab_r.insert(id, token.clone());
        self.vocab.insert(token, id);

        Ok(id)
    }

    /// Get the ID for a word.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    /// Get the word for an ID.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.vocab_r.get(&id).map(|s| s.as_str())
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    /// Drop every entry; the next word added gets ID 0 again.
    pub fn clear(&mut self) {
        self.vocab.clear();
        self.vocab_r.clear();
    }

    /// All `(id, word)` pairs in ascending ID order.
    pub fn entries(&self) -> Vec<(u32, &str)> {
        let mut entries: Vec<(u32, &str)> = self
            .vocab_r
            .iter()
            .map(|(&id, word)| (id, word.as_str()))
            .collect();
        entries.sort_unstable_by_key(|&(id, _)| id);
        entries
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}
