//! `symbols` - print the symbol table.

use anyhow::Result;
use clap::Args;
use colored::*;
use textfront_core::config::FrontendConfig;

use super::utils::display_symbol;

#[derive(Args)]
pub struct SymbolsArgs {
    /// Print in tokens.txt format (`SYMBOL ID` per line)
    #[arg(long)]
    tokens: bool,
}

pub fn run(config: FrontendConfig, args: SymbolsArgs) -> Result<()> {
    let symbols = config.symbol_table()?;

    if args.tokens {
        for (id, symbol) in symbols.symbols().iter().enumerate() {
            println!("{} {}", symbol, id);
        }
        return Ok(());
    }

    println!("{} {}", "Symbols:".bold(), symbols.len());
    for (id, &symbol) in symbols.symbols().iter().enumerate() {
        println!("  {:>4}  {}", id.to_string().dimmed(), display_symbol(symbol));
    }

    let languages = config.language_table()?;
    println!();
    println!("{} {}", "Languages:".bold(), languages.len());
    for (index, entry) in languages.entries().iter().enumerate() {
        println!("  {:>4}  {} -> {}", index.to_string().dimmed(), entry.code.cyan(), entry.locale);
    }
    Ok(())
}
