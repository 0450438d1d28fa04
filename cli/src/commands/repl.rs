//! Interactive prompt.
//!
//! Each line is one command: `encode <text>`, `decode <ids>`, `vocab`,
//! `clear`, `help` or `quit`/`exit`. Lines are read as raw bytes, so text
//! that is not valid UTF-8 reaches the tokenizer and is reported like any
//! other error. The loop only stops on `quit`, end of input or a failed
//! read.

use anyhow::Result as AnyhowResult;
use std::io::{self, BufRead, Write};
use tracing::debug;
use wordtok::{parse_token_ids, Tokenizer};

use super::encode::write_result;

const PROMPT: &str = "tokenizer> ";
const RULE_WIDTH: usize = 50;

const HELP: &str = "\
AVAILABLE COMMANDS:
  encode <text>        Encode text to token IDs
  decode <token_ids>   Decode token IDs back to text
  vocab                Show current vocabulary
  clear                Clear current vocabulary
  help                 Show this help message
  quit                 Exit the program

EXAMPLES:
  > encode Hello world! How are you?
  > decode [0,1,2,3,4]
  > decode 0,1,2,3,4
  > vocab
  > clear
  > quit

NOTES:
  - Text is Unicode-normalized and whitespace is collapsed; case and
    punctuation are kept
  - Every encode builds a fresh vocabulary from that text alone
  - Decode uses the vocabulary of the most recent encode
  - Token IDs can be given as a JSON array or comma-separated";

/// One parsed prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Raw argument bytes; validated by the tokenizer
    Encode(Vec<u8>),
    Decode(String),
    Vocab,
    Clear,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line; the command word is case-insensitive.
    pub fn parse(line: &str) -> Self {
        Self::parse_bytes(line.as_bytes())
    }

    /// Parse a raw input line, which need not be valid UTF-8.
    pub fn parse_bytes(line: &[u8]) -> Self {
        let line = trim_ascii(line);
        if line.is_empty() {
            return ReplCommand::Empty;
        }

        let (command, args) = match line.iter().position(|b| b.is_ascii_whitespace()) {
            Some(i) => (&line[..i], strip_quotes(trim_ascii(&line[i + 1..]))),
            None => (line, &[][..]),
        };

        match String::from_utf8_lossy(command).to_lowercase().as_str() {
            "encode" => ReplCommand::Encode(args.to_vec()),
            "decode" => ReplCommand::Decode(String::from_utf8_lossy(args).into_owned()),
            "vocab" => ReplCommand::Vocab,
            "clear" => ReplCommand::Clear,
            "help" => ReplCommand::Help,
            "quit" | "exit" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}

/// Drop one pair of matching surrounding quotes.
fn strip_quotes(args: &[u8]) -> &[u8] {
    match args {
        [b'"', inner @ .., b'"'] | [b'\'', inner @ .., b'\''] => inner,
        _ => args,
    }
}

fn trim_ascii(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if !first.is_ascii_whitespace() {
            break;
        }
        bytes = rest;
    }
    while let [rest @ .., last] = bytes {
        if !last.is_ascii_whitespace() {
            break;
        }
        bytes = rest;
    }
    bytes
}

/// Prompt session bound to one tokenizer and one output stream.
pub struct Repl<W: Write> {
    tokenizer: Tokenizer,
    out: W,
}

impl<W: Write> Repl<W> {
    pub fn new(tokenizer: Tokenizer, out: W) -> Self {
        Self { tokenizer, out }
    }

    /// Execute one command. Returns `false` once the session should end.
    pub fn execute(&mut self, command: ReplCommand) -> io::Result<bool> {
        debug!(?command, "executing");
        match command {
            ReplCommand::Encode(text) => self.encode(&text)?,
            ReplCommand::Decode(ids) => self.decode(&ids)?,
            ReplCommand::Vocab => match self.tokenizer.show_vocabulary() {
                Some(listing) => writeln!(self.out, "{}", listing)?,
                None => writeln!(
                    self.out,
                    "No vocabulary built yet. Please encode some text first."
                )?,
            },
            ReplCommand::Clear => {
                self.tokenizer.clear_vocab();
                writeln!(self.out, "Vocabulary cleared successfully!")?;
            }
            ReplCommand::Help => writeln!(self.out, "{}", HELP)?,
            ReplCommand::Quit => {
                writeln!(self.out, "Goodbye!")?;
                return Ok(false);
            }
            ReplCommand::Empty => {}
            ReplCommand::Unknown(command) => {
                writeln!(self.out, "Unknown command: \"{}\"", command)?;
                writeln!(self.out, "Type \"help\" to see available commands")?;
            }
        }
        Ok(true)
    }

    fn encode(&mut self, text: &[u8]) -> io::Result<()> {
        if text.is_empty() {
            writeln!(self.out, "Error: Please provide text to encode")?;
            return writeln!(self.out, "Usage: encode Your text here");
        }

        writeln!(self.out, "Encoding text: \"{}\"", String::from_utf8_lossy(text))?;
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))?;
        match self.tokenizer.encode_bytes(text) {
            Ok(result) => write_result(&mut self.out, &result),
            Err(e) => writeln!(self.out, "Error during encoding: {}", e),
        }
    }

    fn decode(&mut self, input: &str) -> io::Result<()> {
        if input.is_empty() {
            writeln!(self.out, "Error: Please provide token IDs to decode")?;
            return writeln!(self.out, "Usage: decode [0,1,2,3] or decode 0,1,2,3");
        }

        let ids = match parse_token_ids(input) {
            Ok(ids) => ids,
            Err(_) => {
                return writeln!(
                    self.out,
                    "Error: Invalid token ID format. Use \"[0,1,2,3]\" or \"0,1,2,3\""
                );
            }
        };

        let shown: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        writeln!(self.out, "Decoding token IDs: [{}]", shown.join(", "))?;
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))?;
        match self.tokenizer.decode(&ids) {
            Ok(text) => writeln!(self.out, "Decoded text: {}", text),
            Err(e) => writeln!(self.out, "Error during decoding: {}", e),
        }
    }

    /// Read commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
        let mut line = Vec::new();
        loop {
            write!(self.out, "{}", PROMPT)?;
            self.out.flush()?;

            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                writeln!(self.out)?;
                return Ok(());
            }
            if !self.execute(ReplCommand::parse_bytes(&line))? {
                return Ok(());
            }
        }
    }
}

pub fn run(tokenizer: Tokenizer) -> AnyhowResult<()> {
    let stdout = io::stdout();
    let mut repl = Repl::new(tokenizer, stdout.lock());
    writeln!(
        repl.out,
        "wordtok {}. Type 'help' to see available commands or 'quit' to exit.",
        wordtok::VERSION
    )?;
    repl.run(io::stdin().lock())?;
    Ok(())
}
