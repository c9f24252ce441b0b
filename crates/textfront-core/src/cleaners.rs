//! Named cleaner pipelines.
//!
//! Cleaners are the transformations that run over input text before it is
//! encoded into symbol ids. Each [`Cleaner`] is a fixed chain of
//! [`transforms`](crate::transforms), optionally including a phonemizer call.
//! Typical choices:
//!
//! | Name | Steps | Use for |
//! |------|-------|---------|
//! | `basic_cleaners` | lowercase, collapse whitespace | symbol table already matches the script |
//! | `transliteration_cleaners` | ascii, lowercase, collapse whitespace | text that should be romanized |
//! | `english_cleaners2` | ascii, lowercase, abbreviations, phonemize (default backend), brackets, whitespace | English IPA with stress |
//! | `english_cleaners2_m` | same, phonemizing with the pool backend for a language | multilingual IPA |
//! | `ipa_simplifier` | IPA variant folding, collapse whitespace | post-processing phonemized text |

use std::fmt;
use std::str::FromStr;

use crate::backends::{phonemize_one, Backends, Phonemizer};
use crate::error::{TextfrontError, TextfrontResult};
use crate::transforms::{
    collapse_whitespace, convert_to_ascii, expand_abbreviations, ipa_simplifier, lowercase,
    remove_brackets,
};

/// A registered cleaner pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cleaner {
    /// lowercase -> collapse_whitespace
    Basic,
    /// convert_to_ascii -> lowercase -> collapse_whitespace
    Transliteration,
    /// English phonemization with the default backend
    English2,
    /// English-style phonemization with the pool backend for a language
    English2Multilingual,
    /// IPA variant folding
    IpaSimplifier,
}

impl Cleaner {
    /// Every registered cleaner.
    pub const ALL: [Cleaner; 5] = [
        Cleaner::Basic,
        Cleaner::Transliteration,
        Cleaner::English2,
        Cleaner::English2Multilingual,
        Cleaner::IpaSimplifier,
    ];

    /// Look up a cleaner by its registered name.
    pub fn from_name(name: &str) -> TextfrontResult<Self> {
        Self::ALL
            .into_iter()
            .find(|cleaner| cleaner.name() == name)
            .ok_or_else(|| TextfrontError::UnknownCleaner(name.to_string()))
    }

    /// Resolve a list of names, failing on the first unknown one.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> TextfrontResult<Vec<Self>> {
        names.iter().map(|n| Self::from_name(n.as_ref())).collect()
    }

    /// Registered name.
    pub fn name(&self) -> &'static str {
        match self {
            Cleaner::Basic => "basic_cleaners",
            Cleaner::Transliteration => "transliteration_cleaners",
            Cleaner::English2 => "english_cleaners2",
            Cleaner::English2Multilingual => "english_cleaners2_m",
            Cleaner::IpaSimplifier => "ipa_simplifier",
        }
    }

    /// Whether this cleaner needs a language code.
    pub fn is_language_parameterized(&self) -> bool {
        matches!(self, Cleaner::English2Multilingual)
    }

    /// Whether this cleaner calls a phonemizer backend.
    pub fn needs_backends(&self) -> bool {
        matches!(self, Cleaner::English2 | Cleaner::English2Multilingual)
    }

    /// Run the pipeline.
    ///
    /// `backends` is required by phonemizing cleaners; `language` by
    /// language-parameterized ones. Other cleaners ignore both.
    pub fn clean(
        &self,
        text: &str,
        backends: Option<&Backends>,
        language: Option<&str>,
    ) -> TextfrontResult<String> {
        match self {
            Cleaner::Basic => Ok(basic_cleaners(text)),
            Cleaner::Transliteration => Ok(transliteration_cleaners(text)),
            Cleaner::IpaSimplifier => Ok(ipa_simplifier(text)),
            Cleaner::English2 => {
                let backends = self.require_backends(backends)?;
                english_cleaners2(text, backends.default_backend())
            }
            Cleaner::English2Multilingual => {
                let backends = self.require_backends(backends)?;
                let language =
                    language.ok_or_else(|| TextfrontError::LanguageRequired(self.name().into()))?;
                english_cleaners2_m(text, backends, language)
            }
        }
    }

    fn require_backends<'a>(&self, backends: Option<&'a Backends>) -> TextfrontResult<&'a Backends> {
        backends.ok_or_else(|| {
            TextfrontError::backend_init(format!(
                "cleaner '{}' needs a phonemizer, but no backends are configured",
                self.name()
            ))
        })
    }
}

impl fmt::Display for Cleaner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cleaner {
    type Err = TextfrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Lowercase and collapse whitespace, without transliteration.
pub fn basic_cleaners(text: &str) -> String {
    finish(&lowercase(text))
}

/// Transliterate to ASCII, lowercase and collapse whitespace.
pub fn transliteration_cleaners(text: &str) -> String {
    finish(&lowercase(&convert_to_ascii(text)))
}

/// English text to IPA with stress, using `backend`.
pub fn english_cleaners2(text: &str, backend: &dyn Phonemizer) -> TextfrontResult<String> {
    let text = expand_abbreviations(&lowercase(&convert_to_ascii(text)));
    let phonemes = phonemize_one(backend, &text)?;
    // espeak sometimes leaves brackets in its output
    Ok(finish(&remove_brackets(&phonemes)))
}

/// Like [`english_cleaners2`], phonemizing with the pool backend for `language`.
///
/// The first call initializes the whole pool.
pub fn english_cleaners2_m(
    text: &str,
    backends: &Backends,
    language: &str,
) -> TextfrontResult<String> {
    let text = expand_abbreviations(&lowercase(&convert_to_ascii(text)));
    let backend = backends.pool().get_backend(language)?;
    let phonemes = phonemize_one(backend, &text)?;
    Ok(finish(&remove_brackets(&phonemes)))
}

/// Collapse whitespace; pipeline output never starts or ends with a space.
fn finish(text: &str) -> String {
    collapse_whitespace(text).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::BackendOptions;
    use crate::language::LanguageTable;
    use crate::testing::mocks::MockBackendFactory;
    use std::sync::Arc;

    fn mock_backends(factory: Arc<MockBackendFactory>) -> Backends {
        Backends::new(factory, LanguageTable::default(), BackendOptions::default()).unwrap()
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(Cleaner::from_name("basic_cleaners").unwrap(), Cleaner::Basic);
        assert_eq!(
            "english_cleaners2_m".parse::<Cleaner>().unwrap(),
            Cleaner::English2Multilingual
        );
        for cleaner in Cleaner::ALL {
            assert_eq!(Cleaner::from_name(cleaner.name()).unwrap(), cleaner);
        }
    }

    #[test]
    fn test_unknown_cleaner() {
        match Cleaner::from_name("english_cleaners") {
            Err(TextfrontError::UnknownCleaner(name)) => assert_eq!(name, "english_cleaners"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(Cleaner::from_names(&["basic_cleaners", "nope"]).is_err());
    }

    #[test]
    fn test_basic_cleaners() {
        assert_eq!(basic_cleaners("  Hello   World  "), "hello world");
        assert_eq!(basic_cleaners("Hello\t\nWorld"), "hello world");
    }

    #[test]
    fn test_transliteration_cleaners() {
        assert_eq!(transliteration_cleaners("Café"), "cafe");
        assert_eq!(transliteration_cleaners("Crème  Brûlée"), "creme brulee");
    }

    #[test]
    fn test_english_cleaners2_pipeline_order() {
        let factory = Arc::new(MockBackendFactory::with_mapping(|_, text| {
            format!("  [{}]  ", text)
        }));
        let backends = mock_backends(factory.clone());

        let cleaned = Cleaner::English2
            .clean("Dr.  Café", Some(&backends), None)
            .unwrap();
        assert_eq!(cleaned, "doctor cafe");
        assert_eq!(factory.phonemize_calls(), 1);
        assert!(!backends.pool().is_initialized());
    }

    #[test]
    fn test_english_cleaners2_m_uses_language_backend() {
        let factory = Arc::new(MockBackendFactory::with_mapping(|locale, text| {
            format!("{}({})", locale, text)
        }));
        let backends = mock_backends(factory.clone());

        let cleaned = Cleaner::English2Multilingual
            .clean("Mr. Kim", Some(&backends), Some("KR"))
            .unwrap();
        assert_eq!(cleaned, "komister kim");
    }

    #[test]
    fn test_multilingual_initializes_pool_once() {
        let factory = Arc::new(MockBackendFactory::new());
        let backends = mock_backends(factory.clone());
        assert_eq!(factory.initialize_calls(), 1);

        Cleaner::English2Multilingual
            .clean("hi, glad to meet you", Some(&backends), Some("EN"))
            .unwrap();
        let after_first = factory.initialize_calls();
        assert_eq!(after_first, 1 + 4);

        Cleaner::English2Multilingual
            .clean("hi again", Some(&backends), Some("EN"))
            .unwrap();
        assert_eq!(factory.initialize_calls(), after_first);
    }

    #[test]
    fn test_multilingual_requires_language() {
        let backends = mock_backends(Arc::new(MockBackendFactory::new()));
        let err = Cleaner::English2Multilingual
            .clean("text", Some(&backends), None)
            .unwrap_err();
        assert!(matches!(err, TextfrontError::LanguageRequired(_)));
    }

    #[test]
    fn test_multilingual_unsupported_language() {
        let backends = mock_backends(Arc::new(MockBackendFactory::new()));
        let err = Cleaner::English2Multilingual
            .clean("text", Some(&backends), Some("FR"))
            .unwrap_err();
        assert!(matches!(err, TextfrontError::UnsupportedLanguage { .. }));
    }

    #[test]
    fn test_phonemizing_cleaner_without_backends() {
        let err = Cleaner::English2.clean("text", None, None).unwrap_err();
        assert!(matches!(err, TextfrontError::BackendInit(_)));
        // Non-phonemizing cleaners do not need them
        assert_eq!(Cleaner::Basic.clean("A  B", None, None).unwrap(), "a b");
    }
}
