//! Word segmentation strategies.
//!
//! The tokenizer picks one [`WordSegmenter`] when it is built. UAX #29
//! word boundaries (the default `unicode-words` feature) are preferred;
//! whitespace splitting is the fallback when that feature is disabled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use wordtok_core::{Result, TokenizerError};

#[cfg(feature = "unicode-words")]
use unicode_segmentation::UnicodeSegmentation;

/// Splits cleaned text into an ordered list of words.
///
/// Implementations must never return empty or whitespace-only segments.
pub trait WordSegmenter: fmt::Debug + Send + Sync {
    /// Segment `text` into words, preserving order and duplicates.
    fn segment(&self, text: &str) -> Vec<String>;

    /// Short name used in logs and diagnostics.
    fn name(&self) -> &'static str;
}

/// Splits on runs of whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSegmenter;

impl WordSegmenter for WhitespaceSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(|s| s.to_string()).collect()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Splits on Unicode word boundaries; punctuation becomes its own word.
#[cfg(feature = "unicode-words")]
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordSegmenter;

#[cfg(feature = "unicode-words")]
impl WordSegmenter for UnicodeWordSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        text.split_word_bounds()
            .filter(|segment| !segment.trim().is_empty())
            .map(|segment| segment.to_string())
            .collect()
    }

    fn name(&self) -> &'static str {
        "unicode"
    }
}

/// The segmenter `SegmenterKind::Auto` resolves to.
#[cfg(feature = "unicode-words")]
pub fn default_segmenter() -> Box<dyn WordSegmenter> {
    Box::new(UnicodeWordSegmenter)
}

/// The segmenter `SegmenterKind::Auto` resolves to.
#[cfg(not(feature = "unicode-words"))]
pub fn default_segmenter() -> Box<dyn WordSegmenter> {
    Box::new(WhitespaceSegmenter)
}

/// Which segmenter to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmenterKind {
    /// Unicode when compiled in, whitespace otherwise
    #[default]
    Auto,
    /// Whitespace splitting
    Whitespace,
    /// Unicode word boundaries
    Unicode,
}

impl SegmenterKind {
    /// Whether Unicode word segmentation was compiled in.
    pub const fn unicode_available() -> bool {
        cfg!(feature = "unicode-words")
    }

    /// Instantiate the segmenter for this kind.
    pub fn build(self) -> Result<Box<dyn WordSegmenter>> {
        match self {
            SegmenterKind::Whitespace => Ok(Box::new(WhitespaceSegmenter)),
            SegmenterKind::Unicode => Self::unicode(),
            SegmenterKind::Auto => Ok(default_segmenter()),
        }
    }

    #[cfg(feature = "unicode-words")]
    fn unicode() -> Result<Box<dyn WordSegmenter>> {
        Ok(Box::new(UnicodeWordSegmenter))
    }

    #[cfg(not(feature = "unicode-words"))]
    fn unicode() -> Result<Box<dyn WordSegmenter>> {
        Err(TokenizerError::InvalidConfig(
            "unicode segmentation requires the `unicode-words` feature".to_string(),
        ))
    }
}

impl FromStr for SegmenterKind {
    type Err = TokenizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "whitespace" => Ok(Self::Whitespace),
            "unicode" => Ok(Self::Unicode),
            other => Err(TokenizerError::InvalidConfig(format!(
                "unknown segmenter '{}' (expected auto, whitespace or unicode)",
                other
            ))),
        }
    }
}
