//! Pre-tokenization pipeline.
//!
//! Text is cleaned by the [`Normalizer`] and then split into words by a
//! [`WordSegmenter`].

pub mod normalize;
pub mod segment;

pub use normalize::{NormalizationForm, Normalizer};
#[cfg(feature = "unicode-words")]
pub use segment::UnicodeWordSegmenter;
pub use segment::{default_segmenter, SegmenterKind, WhitespaceSegmenter, WordSegmenter};
