//! CLI commands for the wordtok tokenizer.

pub mod encode;
pub mod repl;

pub use encode::EncodeCommand;

use clap::Args;
use wordtok::{NormalizationForm, SegmenterKind, Tokenizer};

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct TokenizerOptions {
    /// Word segmentation: auto, whitespace or unicode
    #[arg(long, global = true, default_value = "auto")]
    pub segmenter: SegmenterKind,

    /// Unicode normalization: nfc, nfd, nfkc, nfkd or none
    #[arg(long, global = true, default_value = "nfkc")]
    pub normalization: NormalizationForm,
}

impl TokenizerOptions {
    /// Build a tokenizer from these options.
    pub fn build(&self) -> wordtok::Result<Tokenizer> {
        Tokenizer::builder()
            .segmenter(self.segmenter)
            .normalization(self.normalization)
            .build()
    }
}
