//! Integration tests for cleaning and encoding through the public API.
//!
//! Phonemization runs against `MockBackendFactory`, so none of these tests
//! need espeak-ng. The last test uses the real backend and is ignored by
//! default.

use std::sync::Arc;

use textfront_core::backends::DEFAULT_LOCALE;
use textfront_core::prelude::*;
use textfront_core::testing::MockBackendFactory;

fn encoder_with(factory: Arc<MockBackendFactory>) -> TextEncoder {
    let languages = LanguageTable::default();
    let backends = Backends::new(factory, languages.clone(), BackendOptions::default())
        .expect("mock backends initialize");
    TextEncoder::new(SymbolTable::default(), languages, Some(Arc::new(backends)))
}

/// Fake "phonemizer" that maps ASCII letters to a few IPA symbols.
fn fake_ipa(_locale: &str, text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'a' => 'ɐ',
            'e' => 'ɛ',
            'o' => 'ɔ',
            other => other,
        })
        .collect()
}

#[test]
fn test_english_round_trip() {
    let encoder = encoder_with(Arc::new(MockBackendFactory::with_mapping(fake_ipa)));
    let mode = CleaningMode::Chain(vec![Cleaner::English2]);

    let (ids, cleaned) = encoder
        .text_to_sequence("Hello,   Dr. Smith!", &mode, None)
        .unwrap();
    assert_eq!(cleaned, "hɛllɔ, dɔctɔr smith!");
    assert_eq!(ids.len(), cleaned.chars().count());
    assert_eq!(encoder.sequence_to_text(&ids).unwrap(), cleaned);
}

#[test]
fn test_multilingual_pool_is_shared_across_calls() {
    let factory = Arc::new(MockBackendFactory::with_mapping(fake_ipa));
    let encoder = encoder_with(factory.clone());
    let mode = CleaningMode::Multilingual(Cleaner::English2Multilingual);

    for language in ["EN", "KR", "ZH", "JP", "EN"] {
        encoder
            .text_to_sequence("glad to meet you", &mode, Some(language))
            .unwrap();
    }

    // default backend + one per language, never more
    assert_eq!(factory.initialize_calls(), 1 + 4);
    assert_eq!(
        factory.locales(),
        vec![DEFAULT_LOCALE, "en-us", "ko", "cmn", "ja"]
    );
}

#[test]
fn test_language_index_selects_matching_locale() {
    let factory = Arc::new(MockBackendFactory::with_mapping(|locale, text| {
        format!("{} {}", locale, text)
    }));
    let encoder = encoder_with(factory);
    let mode = CleaningMode::Multilingual(Cleaner::English2Multilingual);

    let expectations = [("EN", "en-us"), ("KR", "ko"), ("ZH", "cmn"), ("JP", "ja")];
    for (code, locale) in expectations {
        let cleaned = encoder.clean_text("x", &mode, Some(code)).unwrap();
        assert_eq!(cleaned, format!("{} x", locale));
    }
}

#[test]
fn test_per_language_mode_with_phonemizer() {
    let encoder = encoder_with(Arc::new(MockBackendFactory::with_mapping(fake_ipa)));
    let mode = CleaningMode::PerLanguage(vec![
        Cleaner::English2,
        Cleaner::English2Multilingual,
        Cleaner::Basic,
        Cleaner::Basic,
    ]);

    assert_eq!(encoder.clean_text("Hello", &mode, Some("EN")).unwrap(), "hɛllɔ");
    assert_eq!(encoder.clean_text("Annyeong", &mode, Some("KR")).unwrap(), "ɐnnyɛɔng");
    assert_eq!(encoder.clean_text("Ni  Hao", &mode, Some("ZH")).unwrap(), "ni hao");
}

#[test]
fn test_backend_failure_surfaces_and_is_not_retried() {
    let factory = Arc::new(MockBackendFactory::failing_for(&["cmn"]));
    let encoder = encoder_with(factory.clone());
    let mode = CleaningMode::Multilingual(Cleaner::English2Multilingual);

    let first = encoder.text_to_sequence("hi", &mode, Some("EN"));
    assert!(matches!(first, Err(TextfrontError::BackendInit(_))));
    let calls = factory.initialize_calls();

    let second = encoder.text_to_sequence("hi", &mode, Some("KR"));
    assert!(matches!(second, Err(TextfrontError::BackendInit(_))));
    assert_eq!(factory.initialize_calls(), calls);
}

#[test]
fn test_custom_symbol_table_rejects_unknown_symbols() {
    let symbols = SymbolTable::from_tokens("_ 0\na 1\nb 2\n  3\n").unwrap();
    let encoder = TextEncoder::new(symbols, LanguageTable::default(), None);
    let mode = CleaningMode::Chain(vec![Cleaner::Basic]);

    let (ids, _) = encoder.text_to_sequence("AB ba", &mode, None).unwrap();
    assert_eq!(ids, vec![1, 2, 3, 2, 1]);

    match encoder.text_to_sequence("abc", &mode, None) {
        Err(TextfrontError::UnknownSymbol { symbol, text }) => {
            assert_eq!(symbol, 'c');
            assert_eq!(text, "abc");
        }
        other => panic!("expected UnknownSymbol, got {:?}", other),
    }
}

#[test]
fn test_encoder_is_shareable_across_threads() {
    let factory = Arc::new(MockBackendFactory::new());
    let encoder = Arc::new(encoder_with(factory.clone()));
    let mode = CleaningMode::Multilingual(Cleaner::English2Multilingual);

    let handles: Vec<_> = ["EN", "KR", "ZH", "JP"]
        .into_iter()
        .map(|code| {
            let encoder = Arc::clone(&encoder);
            let mode = mode.clone();
            std::thread::spawn(move || encoder.text_to_sequence("hello", &mode, Some(code)))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
    assert_eq!(factory.initialize_calls(), 1 + 4);
}

#[test]
#[ignore = "requires espeak-ng to be installed"]
fn test_espeak_english_cleaners2() {
    let languages = LanguageTable::default();
    let backends = Backends::new(
        Arc::new(EspeakFactory::new()),
        languages.clone(),
        BackendOptions::default(),
    )
    .unwrap();
    let encoder = TextEncoder::new(SymbolTable::default(), languages, Some(Arc::new(backends)));

    let (ids, cleaned) = encoder
        .text_to_sequence(
            "Hi, glad to meet you.",
            &CleaningMode::Chain(vec![Cleaner::English2]),
            None,
        )
        .unwrap();
    assert!(cleaned.contains('ˈ'));
    assert_eq!(encoder.sequence_to_text(&ids).unwrap(), cleaned);
}
