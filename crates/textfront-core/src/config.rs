//! Front-end configuration.
//!
//! A [`FrontendConfig`] describes everything needed to build a
//! [`TextEncoder`]: the symbol table, the language table, the phonemizer
//! backend and the cleaning mode. It is usually loaded from YAML:
//!
//! ```yaml
//! symbols:
//!   tokens_file: tokens.txt
//! languages:
//!   - { code: EN, locale: en-us }
//!   - { code: KR, locale: ko }
//! default_locale: en-us
//! backend:
//!   program: espeak-ng
//!   with_stress: true
//! cleaning:
//!   mode: multilingual
//!   cleaners: [english_cleaners2_m]
//! ```
//!
//! Every section is optional. Missing sections fall back to the built-in
//! symbol table, the EN/KR/ZH/JP language table and `english_cleaners2`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::backends::{BackendFactory, BackendOptions, Backends, EspeakFactory, DEFAULT_LOCALE};
use crate::cleaners::Cleaner;
use crate::encoder::{CleaningMode, TextEncoder};
use crate::error::{TextfrontError, TextfrontResult};
use crate::language::{LanguageEntry, LanguageTable};
use crate::symbols::SymbolTable;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Symbol table source
    #[serde(default)]
    pub symbols: SymbolsConfig,

    /// Supported languages in index order; built-in table when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<LanguageEntry>>,

    /// Locale of the default English backend
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Phonemizer backend settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Cleaner selection
    #[serde(default)]
    pub cleaning: CleaningConfig,

    /// Directory that relative paths resolve against
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            symbols: SymbolsConfig::default(),
            languages: None,
            default_locale: default_locale(),
            backend: BackendConfig::default(),
            cleaning: CleaningConfig::default(),
            base_dir: None,
        }
    }
}

/// Where the symbol table comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SymbolsConfig {
    /// `tokens.txt` file (`SYMBOL ID` per line)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_file: Option<PathBuf>,
}

/// Phonemizer backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// espeak-ng executable
    #[serde(default = "default_program")]
    pub program: PathBuf,

    /// Options every backend is created with
    #[serde(flatten)]
    pub options: BackendOptions,
}

fn default_program() -> PathBuf {
    PathBuf::from("espeak-ng")
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            options: BackendOptions::default(),
        }
    }
}

/// How the configured cleaners are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    /// Apply the cleaners in sequence
    #[default]
    Chain,
    /// Apply the single cleaner with the call's language
    Multilingual,
    /// Apply the cleaner at the language's index
    PerLanguage,
}

/// Cleaner selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Mode
    #[serde(default)]
    pub mode: ModeKind,

    /// Registered cleaner names
    #[serde(default = "default_cleaners")]
    pub cleaners: Vec<String>,
}

fn default_cleaners() -> Vec<String> {
    vec![Cleaner::English2.name().to_string()]
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            mode: ModeKind::Chain,
            cleaners: default_cleaners(),
        }
    }
}

impl FrontendConfig {
    /// Parse a YAML configuration.
    pub fn from_yaml(yaml: &str) -> TextfrontResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| TextfrontError::config(format!("Failed to parse config YAML: {}", e)))
    }

    /// Parse a JSON configuration.
    pub fn from_json(json: &str) -> TextfrontResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| TextfrontError::config(format!("Failed to parse config JSON: {}", e)))
    }

    /// Load a configuration file; `.json` files are JSON, everything else YAML.
    ///
    /// Relative paths inside the file resolve against its directory.
    pub fn from_file(path: impl AsRef<Path>) -> TextfrontResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TextfrontError::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let mut config = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> TextfrontResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Resolve a path from the file against the config's directory.
    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Build the symbol table.
    pub fn symbol_table(&self) -> TextfrontResult<SymbolTable> {
        match &self.symbols.tokens_file {
            Some(file) => SymbolTable::from_tokens_file(self.resolve(file)),
            None => Ok(SymbolTable::default()),
        }
    }

    /// Build the language table.
    pub fn language_table(&self) -> TextfrontResult<LanguageTable> {
        match &self.languages {
            Some(entries) => LanguageTable::new(entries.clone()),
            None => Ok(LanguageTable::default()),
        }
    }

    /// Resolve the cleaning mode.
    pub fn cleaning_mode(&self) -> TextfrontResult<CleaningMode> {
        let cleaners = Cleaner::from_names(&self.cleaning.cleaners)?;
        match self.cleaning.mode {
            ModeKind::Chain => Ok(CleaningMode::Chain(cleaners)),
            ModeKind::PerLanguage => Ok(CleaningMode::PerLanguage(cleaners)),
            ModeKind::Multilingual => match cleaners.as_slice() {
                [] => Err(TextfrontError::config("multilingual mode needs a cleaner")),
                [cleaner, ignored @ ..] => {
                    if !ignored.is_empty() {
                        log::warn!(
                            target: "textfront",
                            "multilingual mode applies only {}; ignoring {:?}",
                            cleaner.name(),
                            ignored.iter().map(|c| c.name()).collect::<Vec<_>>()
                        );
                    }
                    Ok(CleaningMode::Multilingual(*cleaner))
                }
            },
        }
    }

    /// Build an encoder that phonemizes with espeak-ng.
    pub fn build_encoder(&self) -> TextfrontResult<TextEncoder> {
        let factory = Arc::new(EspeakFactory::with_program(self.backend.program.clone()));
        self.build_encoder_with(factory)
    }

    /// Build an encoder with a custom backend factory.
    ///
    /// Backends are only created when the cleaning mode contains a
    /// phonemizing cleaner.
    pub fn build_encoder_with(
        &self,
        factory: Arc<dyn BackendFactory>,
    ) -> TextfrontResult<TextEncoder> {
        let symbols = self.symbol_table()?;
        let languages = self.language_table()?;
        let mode = self.cleaning_mode()?;

        let needs_backends = match &mode {
            CleaningMode::Chain(cleaners) | CleaningMode::PerLanguage(cleaners) => {
                cleaners.iter().any(Cleaner::needs_backends)
            }
            CleaningMode::Multilingual(cleaner) => cleaner.needs_backends(),
        };

        let backends = if needs_backends {
            let backends = Backends::with_default_locale(
                factory,
                languages.clone(),
                self.backend.options.clone(),
                &self.default_locale,
            )?;
            Some(Arc::new(backends))
        } else {
            log::debug!(target: "textfront", "No phonemizing cleaner configured, skipping backends");
            None
        };

        log::info!(
            target: "textfront",
            "Built encoder: {} symbols, {} languages, {} mode",
            symbols.len(),
            languages.len(),
            mode.name()
        );
        Ok(TextEncoder::new(symbols, languages, backends))
    }
}
