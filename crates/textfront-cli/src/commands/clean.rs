//! `clean` - clean text and encode it into symbol ids.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::*;
use serde::Serialize;
use textfront_core::config::{FrontendConfig, ModeKind};
use textfront_core::encoder::{CleaningMode, TextEncoder};

use super::utils::format_ids;

#[derive(Args)]
pub struct CleanArgs {
    /// Text to clean; one line per input is read from stdin when omitted
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Language code (e.g. EN, KR); required by multilingual and per-language modes
    #[arg(short, long, value_name = "CODE")]
    language: Option<String>,

    /// Comma-separated cleaner names, overriding the configuration
    #[arg(long, value_delimiter = ',', value_name = "NAMES")]
    cleaners: Option<Vec<String>>,

    /// Cleaning mode, overriding the configuration
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Print one JSON object per input instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Chain,
    Multilingual,
    PerLanguage,
}

impl From<ModeArg> for ModeKind {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Chain => ModeKind::Chain,
            ModeArg::Multilingual => ModeKind::Multilingual,
            ModeArg::PerLanguage => ModeKind::PerLanguage,
        }
    }
}

#[derive(Serialize)]
struct CleanOutput<'a> {
    text: &'a str,
    cleaned: &'a str,
    ids: &'a [usize],
}

pub fn run(mut config: FrontendConfig, args: CleanArgs) -> Result<()> {
    if let Some(cleaners) = args.cleaners {
        config.cleaning.cleaners = cleaners;
    }
    if let Some(mode) = args.mode {
        config.cleaning.mode = mode.into();
    }

    let mode = config.cleaning_mode().context("Invalid cleaning configuration")?;
    let encoder = config
        .build_encoder()
        .context("Failed to build text encoder")?;
    let language = args.language.as_deref();

    match args.text {
        Some(text) => clean_one(&encoder, &mode, language, &text, args.json),
        None => {
            for line in io::stdin().lock().lines() {
                let line = line.context("Failed to read stdin")?;
                if line.trim().is_empty() {
                    continue;
                }
                clean_one(&encoder, &mode, language, &line, args.json)?;
            }
            Ok(())
        }
    }
}

fn clean_one(
    encoder: &TextEncoder,
    mode: &CleaningMode,
    language: Option<&str>,
    text: &str,
    json: bool,
) -> Result<()> {
    let (ids, cleaned) = encoder
        .text_to_sequence(text, mode, language)
        .with_context(|| format!("Failed to encode {:?}", text))?;

    if json {
        let output = CleanOutput {
            text,
            cleaned: &cleaned,
            ids: &ids,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}  {}", "text:   ".dimmed(), text);
        println!("{}  {}", "cleaned:".dimmed(), cleaned.cyan());
        println!("{}  {}", "ids:    ".dimmed(), format_ids(&ids));
        println!();
    }
    Ok(())
}
