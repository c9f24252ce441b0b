//! CLI command handlers, one module per subcommand.
//!
//! | Module | Commands |
//! |--------|----------|
//! | [`clean`] | `clean` - clean and encode text |
//! | [`decode`] | `decode` - ids back to text |
//! | [`symbols`] | `symbols` - print the symbol table |
//! | [`eval`] | `eval` - ASR-based scoring |

pub mod clean;
pub mod decode;
pub mod eval;
pub mod symbols;
pub mod utils;

pub use clean::CleanArgs;
pub use decode::DecodeArgs;
pub use eval::EvalArgs;
pub use symbols::SymbolsArgs;

use std::path::Path;

use anyhow::{Context, Result};
use textfront_core::config::FrontendConfig;

/// Load the configuration file, or the built-in defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<FrontendConfig> {
    match path {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            FrontendConfig::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))
        }
        None => Ok(FrontendConfig::default()),
    }
}
