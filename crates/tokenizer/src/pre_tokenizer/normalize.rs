//! Text cleaning applied before segmentation.
//!
//! Cleaning is Unicode normalization (NFKC by default) followed by
//! collapsing every whitespace run into a single space and trimming the
//! ends. The byte-order mark counts as whitespace. Case and punctuation
//! are left alone.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;
use wordtok_core::TokenizerError;

/// Normalization form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationForm {
    /// Canonical composition
    NFC,
    /// Canonical decomposition
    NFD,
    /// Compatibility composition
    #[default]
    NFKC,
    /// Compatibility decomposition
    NFKD,
    /// No normalization
    None,
}

impl FromStr for NormalizationForm {
    type Err = TokenizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nfc" => Ok(Self::NFC),
            "nfd" => Ok(Self::NFD),
            "nfkc" => Ok(Self::NFKC),
            "nfkd" => Ok(Self::NFKD),
            "none" => Ok(Self::None),
            other => Err(TokenizerError::InvalidConfig(format!(
                "unknown normalization form '{}' (expected nfc, nfd, nfkc, nfkd or none)",
                other
            ))),
        }
    }
}

/// Unicode normalizer and whitespace cleaner.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    /// Normalization form to apply
    form: NormalizationForm,
}

impl Normalizer {
    /// Create a new normalizer.
    pub fn new(form: NormalizationForm) -> Self {
        Self { form }
    }

    /// Create an NFKC normalizer (default).
    pub fn nfkc() -> Self {
        Self::new(NormalizationForm::NFKC)
    }

    /// Apply the normalization form only.
    pub fn normalize(&self, text: &str) -> String {
        match self.form {
            NormalizationForm::NFC => text.nfc().collect(),
            NormalizationForm::NFD => text.nfd().collect(),
            NormalizationForm::NFKC => text.nfkc().collect(),
            NormalizationForm::NFKD => text.nfkd().collect(),
            NormalizationForm::None => text.to_string(),
        }
    }

    /// Normalize, collapse whitespace runs to one space and trim.
    pub fn clean(&self, text: &str) -> String {
        let normalized = self.normalize(text);
        let mut cleaned = String::with_capacity(normalized.len());
        let pieces = normalized.split(is_space).filter(|piece| !piece.is_empty());
        for (i, piece) in pieces.enumerate() {
            if i > 0 {
                cleaned.push(' ');
            }
            cleaned.push_str(piece);
        }
        cleaned
    }
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::nfkc()
    }
}
