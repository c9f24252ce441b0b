//! Initialize-once pool of per-language phonemizer backends.

use std::sync::{Arc, OnceLock};

use super::{BackendFactory, BackendOptions, Phonemizer};
use crate::error::{TextfrontError, TextfrontResult};
use crate::language::LanguageTable;

/// One backend per configured language, indexed by language index.
///
/// The first [`get_backend`](BackendPool::get_backend) call initializes a
/// backend for *every* language in the table, in index order. Concurrent
/// first callers block until that finishes; afterwards lookups are read-only.
///
/// A failed initialization is kept: every later call returns the same
/// `BackendInit` error without touching the factory again. Call
/// [`reset`](BackendPool::reset) to allow another attempt.
pub struct BackendPool {
    factory: Arc<dyn BackendFactory>,
    languages: LanguageTable,
    options: BackendOptions,
    backends: OnceLock<Result<Vec<Box<dyn Phonemizer>>, String>>,
}

impl BackendPool {
    /// Create an empty pool. Nothing is initialized until first use.
    pub fn new(
        factory: Arc<dyn BackendFactory>,
        languages: LanguageTable,
        options: BackendOptions,
    ) -> Self {
        Self {
            factory,
            languages,
            options,
            backends: OnceLock::new(),
        }
    }

    /// Backend for `language_code`, initializing the whole pool on first use.
    ///
    /// # Errors
    /// - `UnsupportedLanguage` if the code is not in the language table
    ///   (checked before any initialization)
    /// - `BackendInit` if the pool failed to initialize, now or earlier
    /// - `BackendIndex` if the pool does not hold one backend per language
    pub fn get_backend(&self, language_code: &str) -> TextfrontResult<&dyn Phonemizer> {
        let index = self.languages.require(language_code)?;

        let backends = self
            .backends
            .get_or_init(|| self.initialize_all())
            .as_ref()
            .map_err(|e| TextfrontError::backend_init(e.clone()))?;

        if backends.len() != self.languages.len() || index >= backends.len() {
            return Err(TextfrontError::BackendIndex {
                index,
                size: backends.len(),
            });
        }

        Ok(backends[index].as_ref())
    }

    /// Whether initialization has run (successfully or not).
    pub fn is_initialized(&self) -> bool {
        self.backends.get().is_some()
    }

    /// Drop all backends (or a stored failure) so the next call initializes again.
    pub fn reset(&mut self) {
        self.backends = OnceLock::new();
    }

    /// The language table this pool is indexed by.
    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    /// Options every backend is created with.
    pub fn options(&self) -> &BackendOptions {
        &self.options
    }

    fn initialize_all(&self) -> Result<Vec<Box<dyn Phonemizer>>, String> {
        log::info!(
            target: "textfront",
            "Initializing {} phonemizer backends",
            self.languages.len()
        );

        let mut backends = Vec::with_capacity(self.languages.len());
        for entry in self.languages.entries() {
            log::debug!(
                target: "textfront",
                "Initializing phonemizer for {} ({})",
                entry.code,
                entry.locale
            );
            let backend = self
                .factory
                .initialize(&entry.locale, &self.options)
                .map_err(|e| format!("language {} ({}): {}", entry.code, entry.locale, e))?;
            backends.push(backend);
        }
        Ok(backends)
    }
}

impl std::fmt::Debug for BackendPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendPool")
            .field("languages", &self.languages.codes())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageEntry;
    use crate::testing::mocks::MockBackendFactory;

    fn pool_with(factory: Arc<MockBackendFactory>) -> BackendPool {
        BackendPool::new(factory, LanguageTable::default(), BackendOptions::default())
    }

    #[test]
    fn test_initializes_all_languages_once() {
        let factory = Arc::new(MockBackendFactory::new());
        let pool = pool_with(factory.clone());
        assert!(!pool.is_initialized());

        let kr = pool.get_backend("KR").unwrap();
        assert_eq!(kr.locale(), "ko");
        assert_eq!(factory.initialize_calls(), 4);
        assert_eq!(factory.locales(), vec!["en-us", "ko", "cmn", "ja"]);

        let zh = pool.get_backend("ZH").unwrap();
        assert_eq!(zh.locale(), "cmn");
        let jp = pool.get_backend("JP").unwrap();
        assert_eq!(jp.locale(), "ja");
        assert_eq!(factory.initialize_calls(), 4);
    }

    #[test]
    fn test_unknown_language_does_not_initialize() {
        let factory = Arc::new(MockBackendFactory::new());
        let pool = pool_with(factory.clone());

        let err = pool.get_backend("FR").unwrap_err();
        assert!(matches!(err, TextfrontError::UnsupportedLanguage { .. }));
        assert!(!pool.is_initialized());
        assert_eq!(factory.initialize_calls(), 0);
    }

    #[test]
    fn test_failed_initialization_is_not_retried() {
        let factory = Arc::new(MockBackendFactory::failing_for(&["cmn"]));
        let mut pool = pool_with(factory.clone());

        let err = pool.get_backend("EN").unwrap_err();
        assert!(matches!(err, TextfrontError::BackendInit(_)));
        assert!(err.to_string().contains("ZH"));
        let calls = factory.initialize_calls();

        let err = pool.get_backend("KR").unwrap_err();
        assert!(matches!(err, TextfrontError::BackendInit(_)));
        assert_eq!(factory.initialize_calls(), calls);

        pool.reset();
        assert!(!pool.is_initialized());
        assert!(pool.get_backend("EN").is_err());
        assert!(factory.initialize_calls() > calls);
    }

    #[test]
    fn test_concurrent_first_use_initializes_once() {
        let factory = Arc::new(MockBackendFactory::new());
        let pool = Arc::new(pool_with(factory.clone()));

        let handles: Vec<_> = ["EN", "KR", "ZH", "JP", "EN", "KR", "ZH", "JP"]
            .into_iter()
            .map(|code| {
                let pool = Arc::clone(&pool);
                std::thread::spawn(move || pool.get_backend(code).map(|b| b.locale().to_string()))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
        assert_eq!(factory.initialize_calls(), 4);
    }

    #[test]
    fn test_custom_language_table() {
        let factory = Arc::new(MockBackendFactory::new());
        let languages = LanguageTable::new(vec![
            LanguageEntry::new("GB", "en-gb"),
            LanguageEntry::new("DE", "de"),
        ])
        .unwrap();
        let pool = BackendPool::new(factory.clone(), languages, BackendOptions::default());

        assert_eq!(pool.get_backend("DE").unwrap().locale(), "de");
        assert_eq!(factory.locales(), vec!["en-gb", "de"]);
    }
}
