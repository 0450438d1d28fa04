//! wordtok CLI - Command-line interface for the word-level tokenizer.
//!
//! This is the main entry point for the `wordtok` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{EncodeCommand, TokenizerOptions};
use tracing::Level;

#[derive(Parser)]
#[command(name = "wordtok")]
#[command(about = "A minimal word-level tokenizer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    options: TokenizerOptions,

    /// Log vocabulary and decode activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive prompt (default)
    Repl,
    /// Encode text once and print the result
    Encode(EncodeCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let tokenizer = cli.options.build()?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => commands::repl::run(tokenizer)?,
        Commands::Encode(cmd) => commands::encode::run(cmd, tokenizer)?,
    }

    Ok(())
}
