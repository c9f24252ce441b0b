//! Unified error type for textfront-core.
//!
//! Every public operation returns [`TextfrontResult`]. None of these errors
//! are retried internally: cleaning and encoding are deterministic over a
//! fixed configuration, so the only failure worth retrying (backend
//! initialization) is left to the caller.
//!
//! # Error Kinds
//!
//! ```text
//! TextfrontError
//! ├── UnknownCleaner          -- pipeline name not registered
//! ├── UnsupportedLanguage     -- language code not configured
//! ├── BackendIndex            -- pool size disagrees with the language table
//! ├── BackendInit             -- phonemizer backend could not be created
//! ├── Phonemize               -- a backend run failed
//! ├── LanguageRequired        -- language-parameterized cleaner without a language
//! ├── MissingLanguageCleaner  -- per-language cleaner table too short
//! ├── UnknownSymbol           -- cleaned text contains a symbol outside the table
//! ├── UnknownIndex            -- decode of an index outside the table
//! ├── Config                  -- invalid tables or configuration
//! ├── Evaluation              -- evaluation input mismatch
//! ├── Io                      -- I/O errors
//! └── Serialization           -- JSON/YAML errors
//! ```

use thiserror::Error;

/// The canonical error type for textfront-core.
#[derive(Error, Debug)]
pub enum TextfrontError {
    /// Cleaner pipeline name is not registered
    #[error("Unknown cleaner: {0}")]
    UnknownCleaner(String),

    /// Language code is not part of the configured language table
    #[error("Unsupported language code: {code}. Available: {}", .available.join(", "))]
    UnsupportedLanguage {
        /// Requested code
        code: String,
        /// Configured codes, in index order
        available: Vec<String>,
    },

    /// Backend pool does not line up with the language table
    #[error("Phonemizer index {index} out of range for backend pool (size={size})")]
    BackendIndex {
        /// Language index that was requested
        index: usize,
        /// Number of initialized backends
        size: usize,
    },

    /// Phonemizer backend could not be initialized or is not configured
    #[error("Phonemizer backend initialization failed: {0}")]
    BackendInit(String),

    /// Phonemizer backend failed while transcribing text
    #[error("Phonemization failed: {0}")]
    Phonemize(String),

    /// A language-parameterized cleaner was used without a language
    #[error("Cleaner '{0}' requires a language code")]
    LanguageRequired(String),

    /// The per-language cleaner table has no entry for a language
    #[error("No cleaner configured for language {code} (index {index}, {available} cleaners configured)")]
    MissingLanguageCleaner {
        /// Language code
        code: String,
        /// Index of the language in the language table
        index: usize,
        /// Number of cleaners in the per-language table
        available: usize,
    },

    /// Cleaned text contains a symbol that is not in the symbol table
    #[error("Unknown symbol {symbol:?} in cleaned text {text:?}")]
    UnknownSymbol {
        /// Offending character
        symbol: char,
        /// Full cleaned text, for diagnosis
        text: String,
    },

    /// Symbol id outside of the symbol table
    #[error("Unknown symbol id {index} (symbol table size={size})")]
    UnknownIndex {
        /// Offending id
        index: usize,
        /// Number of symbols in the table
        size: usize,
    },

    /// Invalid configuration or lookup table
    #[error("Configuration error: {0}")]
    Config(String),

    /// Evaluation harness input error
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error (JSON, YAML)
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for textfront-core.
pub type TextfrontResult<T> = Result<T, TextfrontError>;

// ─────────────────────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────────────────────

impl From<serde_json::Error> for TextfrontError {
    fn from(e: serde_json::Error) -> Self {
        TextfrontError::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for TextfrontError {
    fn from(e: serde_yaml::Error) -> Self {
        TextfrontError::Serialization(e.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Convenience constructors
// ─────────────────────────────────────────────────────────────────────────────

impl TextfrontError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        TextfrontError::Config(msg.into())
    }

    /// Create a backend initialization error.
    pub fn backend_init(msg: impl Into<String>) -> Self {
        TextfrontError::BackendInit(msg.into())
    }

    /// Create a phonemization error.
    pub fn phonemize(msg: impl Into<String>) -> Self {
        TextfrontError::Phonemize(msg.into())
    }

    /// Create an evaluation error.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        TextfrontError::Evaluation(msg.into())
    }
}
