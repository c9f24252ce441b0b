//! Mock implementations for testing.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::backends::{BackendFactory, BackendOptions, Phonemizer};
use crate::error::{TextfrontError, TextfrontResult};
use crate::eval::Transcriber;

type TranscribeFn = dyn Fn(&str, &str) -> String + Send + Sync;

/// A backend factory that records every initialization.
///
/// The phonemizers it creates return their input unchanged unless a mapping
/// function was supplied with [`MockBackendFactory::with_mapping`]. Locales
/// listed in [`MockBackendFactory::failing_for`] fail to initialize.
///
/// # Example
///
/// ```rust,ignore
/// let factory = Arc::new(MockBackendFactory::new());
/// let pool = BackendPool::new(factory.clone(), LanguageTable::default(), BackendOptions::default());
/// pool.get_backend("EN")?;
/// pool.get_backend("KR")?;
/// assert_eq!(factory.initialize_calls(), 4);
/// ```
pub struct MockBackendFactory {
    mapping: Arc<TranscribeFn>,
    failing: HashSet<String>,
    initialize_calls: AtomicUsize,
    locales: Mutex<Vec<String>>,
    phonemize_calls: Arc<AtomicUsize>,
}

impl MockBackendFactory {
    /// Factory whose phonemizers echo their input.
    pub fn new() -> Self {
        Self::with_mapping(|_, text| text.to_string())
    }

    /// Factory whose phonemizers return `mapping(locale, text)`.
    pub fn with_mapping(mapping: impl Fn(&str, &str) -> String + Send + Sync + 'static) -> Self {
        Self {
            mapping: Arc::new(mapping),
            failing: HashSet::new(),
            initialize_calls: AtomicUsize::new(0),
            locales: Mutex::new(Vec::new()),
            phonemize_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Factory that fails to initialize the given locales.
    pub fn failing_for(locales: &[&str]) -> Self {
        let mut factory = Self::new();
        factory.failing = locales.iter().map(|l| l.to_string()).collect();
        factory
    }

    /// Number of `initialize` calls so far, failed ones included.
    pub fn initialize_calls(&self) -> usize {
        self.initialize_calls.load(Ordering::SeqCst)
    }

    /// Locales passed to `initialize`, in call order.
    pub fn locales(&self) -> Vec<String> {
        self.locales
            .lock()
            .map(|locales| locales.clone())
            .unwrap_or_default()
    }

    /// Number of texts phonemized by all created backends.
    pub fn phonemize_calls(&self) -> usize {
        self.phonemize_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockBackendFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendFactory for MockBackendFactory {
    fn initialize(
        &self,
        locale: &str,
        options: &BackendOptions,
    ) -> TextfrontResult<Box<dyn Phonemizer>> {
        self.initialize_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut locales) = self.locales.lock() {
            locales.push(locale.to_string());
        }

        if self.failing.contains(locale) {
            return Err(TextfrontError::backend_init(format!(
                "mock backend refuses locale {}",
                locale
            )));
        }

        Ok(Box::new(MockPhonemizer {
            locale: locale.to_string(),
            options: options.clone(),
            mapping: Arc::clone(&self.mapping),
            calls: Arc::clone(&self.phonemize_calls),
        }))
    }
}

/// Phonemizer created by [`MockBackendFactory`].
pub struct MockPhonemizer {
    locale: String,
    options: BackendOptions,
    mapping: Arc<TranscribeFn>,
    calls: Arc<AtomicUsize>,
}

impl MockPhonemizer {
    /// Options the backend was created with.
    pub fn options(&self) -> &BackendOptions {
        &self.options
    }
}

impl std::fmt::Debug for MockPhonemizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockPhonemizer")
            .field("locale", &self.locale)
            .finish()
    }
}

impl Phonemizer for MockPhonemizer {
    fn phonemize(&self, texts: &[&str]) -> TextfrontResult<Vec<String>> {
        self.calls.fetch_add(texts.len(), Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|text| (self.mapping)(&self.locale, text))
            .collect())
    }

    fn locale(&self) -> &str {
        &self.locale
    }

    fn name(&self) -> &'static str {
        "Mock"
    }
}

/// A transcriber that returns canned text per audio file name.
///
/// Files without a canned transcription fail, which exercises the
/// evaluation harness's error path.
#[derive(Debug, Default)]
pub struct MockTranscriber {
    transcripts: HashMap<String, String>,
    calls: AtomicUsize,
}

impl MockTranscriber {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `text` for the file named `file_name`.
    pub fn with_transcript(mut self, file_name: impl Into<String>, text: impl Into<String>) -> Self {
        self.transcripts.insert(file_name.into(), text.into());
        self
    }

    /// Number of transcription requests so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, audio: &Path, _language: &str) -> TextfrontResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = audio
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.transcripts.get(&name).cloned().ok_or_else(|| {
            TextfrontError::evaluation(format!("no mock transcript for {}", name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_factory_records_calls() {
        let factory = MockBackendFactory::with_mapping(|locale, text| format!("{}:{}", locale, text));
        let backend = factory.initialize("ko", &BackendOptions::default()).unwrap();

        assert_eq!(backend.phonemize(&["a", "b"]).unwrap(), vec!["ko:a", "ko:b"]);
        assert_eq!(factory.initialize_calls(), 1);
        assert_eq!(factory.phonemize_calls(), 2);
        assert_eq!(factory.locales(), vec!["ko"]);
    }

    #[test]
    fn test_mock_factory_failure() {
        let factory = MockBackendFactory::failing_for(&["ja"]);
        assert!(factory.initialize("ja", &BackendOptions::default()).is_err());
        assert!(factory.initialize("ko", &BackendOptions::default()).is_ok());
        assert_eq!(factory.initialize_calls(), 2);
    }

    #[test]
    fn test_mock_transcriber() {
        let transcriber = MockTranscriber::new().with_transcript("a.wav", "hello");
        assert_eq!(
            transcriber.transcribe(Path::new("/out/a.wav"), "en").unwrap(),
            "hello"
        );
        assert!(transcriber.transcribe(Path::new("/out/b.wav"), "en").is_err());
        assert_eq!(transcriber.call_count(), 2);
    }
}
