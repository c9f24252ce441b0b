//! Pluggable phonemizer backends.
//!
//! A backend is created through a [`BackendFactory`] for one locale and then
//! reused for every call. Creation is the expensive part (loading voices,
//! probing the engine), so backends are built once:
//!
//! - the default English backend eagerly, when [`Backends`] is constructed
//! - every configured language together, on first use of the [`BackendPool`]
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`espeak`] | espeak-ng backend driven through the `espeak-ng` program |
//! | [`pool`] | initialize-once pool indexed by language |

pub mod espeak;
pub mod pool;

pub use espeak::{EspeakBackend, EspeakFactory};
pub use pool::BackendPool;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{TextfrontError, TextfrontResult};
use crate::language::LanguageTable;

/// Locale of the default English backend.
pub const DEFAULT_LOCALE: &str = "en-us";

/// How a backend treats mid-utterance language switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LanguageSwitch {
    /// Keep switch markers such as `(en)` in the output
    KeepFlags,
    /// Drop the markers, keep the phonemes
    #[default]
    RemoveFlags,
    /// Drop every utterance that contains a switch
    RemoveUtterance,
}

/// Options every backend is created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendOptions {
    /// Keep punctuation marks in the phonetic output
    #[serde(default = "default_true")]
    pub preserve_punctuation: bool,

    /// Emit primary/secondary stress marks
    #[serde(default = "default_true")]
    pub with_stress: bool,

    /// Language switch handling
    #[serde(default)]
    pub language_switch: LanguageSwitch,

    /// Parallel jobs per call (always 1)
    #[serde(default = "default_njobs")]
    pub njobs: usize,
}

fn default_true() -> bool {
    true
}

fn default_njobs() -> usize {
    1
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            preserve_punctuation: true,
            with_stress: true,
            language_switch: LanguageSwitch::RemoveFlags,
            njobs: 1,
        }
    }
}

/// An initialized phonemization engine for one locale.
pub trait Phonemizer: Send + Sync + std::fmt::Debug {
    /// Transcribe each text; the output has one entry per input.
    fn phonemize(&self, texts: &[&str]) -> TextfrontResult<Vec<String>>;

    /// Locale this backend was initialized with.
    fn locale(&self) -> &str;

    /// Human-readable name of this backend.
    fn name(&self) -> &'static str;
}

/// Creates [`Phonemizer`]s. This is the expensive step.
pub trait BackendFactory: Send + Sync {
    /// Initialize a backend for `locale`.
    fn initialize(
        &self,
        locale: &str,
        options: &BackendOptions,
    ) -> TextfrontResult<Box<dyn Phonemizer>>;
}

/// Phonemize a single text (batch size one) and strip surrounding whitespace.
pub fn phonemize_one(backend: &dyn Phonemizer, text: &str) -> TextfrontResult<String> {
    let output = backend.phonemize(&[text])?;
    output
        .into_iter()
        .next()
        .map(|phonemes| phonemes.trim().to_string())
        .ok_or_else(|| {
            TextfrontError::phonemize(format!(
                "{} backend returned no output for locale {}",
                backend.name(),
                backend.locale()
            ))
        })
}

/// Phonemizer backends shared by all cleaners.
///
/// Owns the eagerly-built default English backend and the lazily-initialized
/// per-language [`BackendPool`]. Share it with `Arc`; resetting the pool
/// requires exclusive access.
pub struct Backends {
    default: Box<dyn Phonemizer>,
    pool: BackendPool,
}

impl Backends {
    /// Build the default backend for [`DEFAULT_LOCALE`] now and prepare the pool.
    pub fn new(
        factory: Arc<dyn BackendFactory>,
        languages: LanguageTable,
        options: BackendOptions,
    ) -> TextfrontResult<Self> {
        Self::with_default_locale(factory, languages, options, DEFAULT_LOCALE)
    }

    /// Same as [`Backends::new`] with a different default locale.
    pub fn with_default_locale(
        factory: Arc<dyn BackendFactory>,
        languages: LanguageTable,
        options: BackendOptions,
        default_locale: &str,
    ) -> TextfrontResult<Self> {
        log::debug!(
            target: "textfront",
            "Initializing default phonemizer for {}",
            default_locale
        );
        let default = factory.initialize(default_locale, &options)?;
        let pool = BackendPool::new(factory, languages, options);
        Ok(Self { default, pool })
    }

    /// The default backend used by language-agnostic phonemizing cleaners.
    pub fn default_backend(&self) -> &dyn Phonemizer {
        self.default.as_ref()
    }

    /// The per-language pool.
    pub fn pool(&self) -> &BackendPool {
        &self.pool
    }

    /// Mutable access to the pool, e.g. to [`BackendPool::reset`] it.
    pub fn pool_mut(&mut self) -> &mut BackendPool {
        &mut self.pool
    }
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends")
            .field("default", &self.default.locale())
            .field("pool", &self.pool)
            .finish()
    }
}
