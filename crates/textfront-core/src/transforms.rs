//! Stateless string transforms that cleaner pipelines are assembled from.
//!
//! Every function here is total: it maps any `&str` to a new `String` and
//! never fails.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Any run of whitespace
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();

    /// Bracket characters left behind by some phonemizer outputs
    static ref BRACKETS_RE: Regex = Regex::new(r"[\[\]\(\)\{\}]").unwrap();

    /// Abbreviation patterns, applied in order. Word-boundary anchored,
    /// case-insensitive, trailing period consumed.
    static ref ABBREVIATIONS: Vec<(Regex, &'static str)> = [
        ("mrs", "misess"),
        ("mr", "mister"),
        ("dr", "doctor"),
        ("st", "saint"),
        ("co", "company"),
        ("jr", "junior"),
        ("maj", "major"),
        ("gen", "general"),
        ("drs", "doctors"),
        ("rev", "reverend"),
        ("lt", "lieutenant"),
        ("hon", "honorable"),
        ("sgt", "sergeant"),
        ("capt", "captain"),
        ("esq", "esquire"),
        ("ltd", "limited"),
        ("col", "colonel"),
        ("ft", "fort"),
    ]
    .iter()
    .map(|(abbr, expansion)| {
        (Regex::new(&format!(r"(?i)\b{}\.", abbr)).unwrap(), *expansion)
    })
    .collect();
}

/// IPA variants and their canonical replacements, applied in order.
const IPA_REPLACEMENTS: [(&str, &str); 5] = [
    ("ɐ", "ə"),
    ("ˈə", "ə"),
    ("ʤ", "dʒ"),
    ("ʧ", "tʃ"),
    ("ᵻ", "ɪ"),
];

/// Lowercase all characters.
pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

/// Transliterate to the closest ASCII representation.
///
/// Lossy: characters with no ASCII rendering are dropped.
pub fn convert_to_ascii(text: &str) -> String {
    deunicode::deunicode_with_tofu(text, "")
}

/// Replace every run of whitespace with a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").into_owned()
}

/// Delete `[`, `]`, `(`, `)`, `{` and `}`.
pub fn remove_brackets(text: &str) -> String {
    BRACKETS_RE.replace_all(text, "").into_owned()
}

/// Expand English title and address abbreviations ("Dr." -> "doctor").
pub fn expand_abbreviations(text: &str) -> String {
    let mut result = text.to_string();
    for (regex, replacement) in ABBREVIATIONS.iter() {
        result = regex.replace_all(&result, *replacement).into_owned();
    }
    result
}

/// Fold IPA variants into their canonical spelling, then collapse whitespace.
pub fn ipa_simplifier(text: &str) -> String {
    let mut result = text.to_string();
    for (from, to) in IPA_REPLACEMENTS {
        result = result.replace(from, to);
    }
    collapse_whitespace(&result)
}
