//! Supported language codes and their phonemizer locales.
//!
//! Each entry pairs a language code (`"EN"`, `"KR"`, ...) with the locale the
//! phonemizer backend understands (`"en-us"`, `"ko"`, ...). The position of an
//! entry is the language's index: it selects the backend in the
//! [`BackendPool`](crate::backends::BackendPool) and the cleaner in
//! per-language cleaning mode.

use serde::{Deserialize, Serialize};

use crate::error::{TextfrontError, TextfrontResult};

/// One supported language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// Language code used by callers (e.g. "EN")
    pub code: String,
    /// Backend-specific locale identifier (e.g. "en-us")
    pub locale: String,
}

impl LanguageEntry {
    /// Create a new entry.
    pub fn new(code: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            locale: locale.into(),
        }
    }
}

/// Ordered, duplicate-free table of supported languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTable {
    entries: Vec<LanguageEntry>,
}

impl LanguageTable {
    /// Build a table; fails on an empty list or a repeated code.
    pub fn new(entries: Vec<LanguageEntry>) -> TextfrontResult<Self> {
        if entries.is_empty() {
            return Err(TextfrontError::config("language table is empty"));
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.code == entry.code) {
                return Err(TextfrontError::config(format!(
                    "duplicate language code {}",
                    entry.code
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Index of `code`, if configured.
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.code == code)
    }

    /// Index of `code`, or `UnsupportedLanguage`.
    pub fn require(&self, code: &str) -> TextfrontResult<usize> {
        self.index_of(code)
            .ok_or_else(|| TextfrontError::UnsupportedLanguage {
                code: code.to_string(),
                available: self.codes(),
            })
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&LanguageEntry> {
        self.entries.get(index)
    }

    /// Language codes in index order.
    pub fn codes(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.code.clone()).collect()
    }

    /// Entries in index order.
    pub fn entries(&self) -> &[LanguageEntry] {
        &self.entries
    }

    /// Number of languages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LanguageTable {
    /// `EN`, `KR`, `ZH`, `JP` with espeak-ng locales.
    fn default() -> Self {
        Self {
            entries: vec![
                LanguageEntry::new("EN", "en-us"),
                LanguageEntry::new("KR", "ko"),
                LanguageEntry::new("ZH", "cmn"),
                LanguageEntry::new("JP", "ja"),
            ],
        }
    }
}
