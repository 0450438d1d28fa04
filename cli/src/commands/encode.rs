//! Encode command implementation.

use clap::Parser;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    /// Text to encode ("-" reads stdin)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Print the result as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

use anyhow::Result as AnyhowResult;
use std::io::{self, Read, Write};
use wordtok::{EncodeResult, Tokenizer};

pub fn run(cmd: EncodeCommand, mut tokenizer: Tokenizer) -> AnyhowResult<()> {
    let input_text = if cmd.text.len() == 1 && cmd.text[0] == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        cmd.text.join(" ")
    };

    let result = tokenizer.encode(&input_text)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cmd.json {
        serde_json::to_writer_pretty(&mut out, &result)?;
        writeln!(out)?;
    } else {
        write_result(&mut out, &result)?;
    }

    Ok(())
}

/// Print the fields of an encode result, one per line.
pub fn write_result<W: Write>(out: &mut W, result: &EncodeResult) -> io::Result<()> {
    writeln!(out, "Original text: {}", result.original_text)?;
    writeln!(out, "Cleaned text: {}", result.cleaned_text)?;
    writeln!(out, "Words: {:?}", result.words)?;
    writeln!(out, "Token IDs: {:?}", result.token_ids)?;
    writeln!(out, "Token count: {}", result.token_count)?;
    writeln!(out, "Vocabulary size: {}", result.vocabulary_size)
}
