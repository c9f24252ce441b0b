//! textfront CLI - clean and encode text for TTS, and score synthesized speech.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `clean` | Clean text and print the cleaned string and its symbol ids |
//! | `decode` | Turn symbol ids back into text |
//! | `symbols` | Print the symbol table |
//! | `eval` | Transcribe a folder of synthesized audio and score it (WER/CER) |
//!
//! Every command reads the front-end configuration given with `--config`
//! (or `TEXTFRONT_CONFIG`); without one the built-in defaults are used.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CleanArgs, DecodeArgs, EvalArgs, SymbolsArgs};

/// textfront - TTS text front end
#[derive(Parser)]
#[command(name = "textfront")]
#[command(version, about = "Clean, phonemize and encode text for TTS; score synthesized speech", long_about = None)]
struct Cli {
    /// Front-end configuration file (YAML, or JSON with a .json extension)
    #[arg(long, short, global = true, env = "TEXTFRONT_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log progress (info level); RUST_LOG overrides
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean text and encode it into symbol ids
    Clean(CleanArgs),
    /// Decode symbol ids back into text
    Decode(DecodeArgs),
    /// Print the symbol table
    Symbols(SymbolsArgs),
    /// Transcribe synthesized audio and score it against reference texts
    Eval(EvalArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Clean(args) => commands::clean::run(config, args),
        Commands::Decode(args) => commands::decode::run(config, args),
        Commands::Symbols(args) => commands::symbols::run(config, args),
        Commands::Eval(args) => commands::eval::run(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_clean_with_overrides() {
        let cli = Cli::try_parse_from([
            "textfront",
            "clean",
            "Hello",
            "--language",
            "EN",
            "--cleaners",
            "transliteration_cleaners,basic_cleaners",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Clean(_)));
    }

    #[test]
    fn test_parse_eval_trailing_args() {
        let cli = Cli::try_parse_from([
            "textfront",
            "eval",
            "out",
            "-r",
            "refs.txt",
            "-t",
            "whisper-cli",
            "--",
            "-f",
            "{audio}",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Eval(_)));
    }
}
