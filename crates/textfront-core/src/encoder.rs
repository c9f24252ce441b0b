//! Text to symbol-id encoding.
//!
//! [`TextEncoder`] runs a [`CleaningMode`] over raw text and maps every
//! character of the cleaned result to its id in the [`SymbolTable`]. The
//! inverse, [`TextEncoder::sequence_to_text`], is exact: encoding then decoding
//! a cleaned string returns it unchanged.
//!
//! ```rust,ignore
//! let encoder = TextEncoder::new(SymbolTable::default(), LanguageTable::default(), Some(backends));
//! let mode = CleaningMode::Multilingual(Cleaner::English2Multilingual);
//! let (ids, cleaned) = encoder.text_to_sequence("hi, glad to meet you", &mode, Some("EN"))?;
//! assert_eq!(encoder.sequence_to_text(&ids)?, cleaned);
//! ```

use std::sync::Arc;

use crate::backends::Backends;
use crate::cleaners::Cleaner;
use crate::error::{TextfrontError, TextfrontResult};
use crate::language::LanguageTable;
use crate::symbols::SymbolTable;

/// How cleaners are selected for a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleaningMode {
    /// Run each cleaner on the previous one's output.
    ///
    /// A language, when given, reaches language-parameterized cleaners only.
    Chain(Vec<Cleaner>),

    /// Run one cleaner with the call's language (required).
    Multilingual(Cleaner),

    /// Run the cleaner at the language's index (language required).
    ///
    /// Per-language entries are self-contained: the language is not passed
    /// on, except to a language-parameterized cleaner that cannot run
    /// without it.
    PerLanguage(Vec<Cleaner>),
}

impl CleaningMode {
    /// Short name of the mode, as used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            CleaningMode::Chain(_) => "chain",
            CleaningMode::Multilingual(_) => "multilingual",
            CleaningMode::PerLanguage(_) => "per_language",
        }
    }
}

/// Cleans and encodes text against a fixed symbol and language table.
#[derive(Debug, Clone)]
pub struct TextEncoder {
    symbols: SymbolTable,
    languages: LanguageTable,
    backends: Option<Arc<Backends>>,
}

impl TextEncoder {
    /// Create an encoder. Without `backends`, phonemizing cleaners fail.
    pub fn new(
        symbols: SymbolTable,
        languages: LanguageTable,
        backends: Option<Arc<Backends>>,
    ) -> Self {
        Self {
            symbols,
            languages,
            backends,
        }
    }

    /// Clean `text` and encode it.
    ///
    /// Returns the ids together with the cleaned text they were taken from.
    pub fn text_to_sequence(
        &self,
        text: &str,
        mode: &CleaningMode,
        language: Option<&str>,
    ) -> TextfrontResult<(Vec<usize>, String)> {
        let cleaned = self.clean_text(text, mode, language)?;
        let sequence = self.cleaned_text_to_sequence(&cleaned)?;
        Ok((sequence, cleaned))
    }

    /// Clean `text` without encoding it.
    pub fn clean_text(
        &self,
        text: &str,
        mode: &CleaningMode,
        language: Option<&str>,
    ) -> TextfrontResult<String> {
        let backends = self.backends.as_deref();
        match mode {
            CleaningMode::Chain(cleaners) => {
                let mut cleaned = text.to_string();
                for cleaner in cleaners {
                    cleaned = cleaner.clean(&cleaned, backends, language)?;
                }
                Ok(cleaned)
            }
            CleaningMode::Multilingual(cleaner) => {
                let language = language
                    .ok_or_else(|| TextfrontError::LanguageRequired(cleaner.name().into()))?;
                cleaner.clean(text, backends, Some(language))
            }
            CleaningMode::PerLanguage(cleaners) => {
                let code = language.ok_or_else(|| {
                    TextfrontError::LanguageRequired(mode.name().to_string())
                })?;
                let index = self.languages.require(code)?;
                let cleaner = cleaners.get(index).ok_or_else(|| {
                    TextfrontError::MissingLanguageCleaner {
                        code: code.to_string(),
                        index,
                        available: cleaners.len(),
                    }
                })?;
                let forwarded = cleaner.is_language_parameterized().then_some(code);
                cleaner.clean(text, backends, forwarded)
            }
        }
    }

    /// Encode already-cleaned text.
    ///
    /// Fails with `UnknownSymbol` on the first character outside the table;
    /// no partial sequence is returned.
    pub fn cleaned_text_to_sequence(&self, cleaned_text: &str) -> TextfrontResult<Vec<usize>> {
        cleaned_text
            .chars()
            .map(|symbol| {
                self.symbols
                    .symbol_to_id(symbol)
                    .ok_or_else(|| TextfrontError::UnknownSymbol {
                        symbol,
                        text: cleaned_text.to_string(),
                    })
            })
            .collect()
    }

    /// Decode ids back to text.
    pub fn sequence_to_text(&self, sequence: &[usize]) -> TextfrontResult<String> {
        sequence
            .iter()
            .map(|&index| {
                self.symbols
                    .id_to_symbol(index)
                    .ok_or(TextfrontError::UnknownIndex {
                        index,
                        size: self.symbols.len(),
                    })
            })
            .collect()
    }

    /// The symbol table.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// The language table.
    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    /// Shared backends, if configured.
    pub fn backends(&self) -> Option<&Arc<Backends>> {
        self.backends.as_ref()
    }
}
