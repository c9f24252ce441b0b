//! `decode` - symbol ids back to text.

use anyhow::{Context, Result};
use clap::Args;
use textfront_core::config::FrontendConfig;
use textfront_core::encoder::TextEncoder;

#[derive(Args)]
pub struct DecodeArgs {
    /// Symbol ids, separated by spaces or commas
    #[arg(value_name = "ID", required = true, num_args = 1.., value_delimiter = ',')]
    ids: Vec<usize>,
}

pub fn run(config: FrontendConfig, args: DecodeArgs) -> Result<()> {
    // Decoding needs only the tables, never a phonemizer.
    let encoder = TextEncoder::new(config.symbol_table()?, config.language_table()?, None);
    let text = encoder
        .sequence_to_text(&args.ids)
        .context("Failed to decode ids")?;
    println!("{}", text);
    Ok(())
}
