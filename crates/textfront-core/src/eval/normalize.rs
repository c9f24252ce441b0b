//! Transcript normalization applied before scoring.
//!
//! References and ASR hypotheses differ in casing, punctuation, number
//! formatting and hesitations that say nothing about speech quality. Both
//! sides go through the same per-language normalizer before WER/CER is
//! computed.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    /// Spans in brackets or parentheses, e.g. "[laughs]" or "(inaudible)"
    static ref BRACKETED_RE: Regex = Regex::new(r"[<\[][^>\]]*[>\]]|\([^)]*\)").unwrap();

    /// Hesitations that ASR systems transcribe inconsistently
    static ref FILLER_RE: Regex = Regex::new(r"\b(?:hmm|mm|mhm|mmm|uh|um)\b").unwrap();

    /// Thousands separators between digits
    static ref DIGIT_GROUPS_RE: Regex = Regex::new(r"\b\d{1,3}(?:,\d{3})+\b").unwrap();

    static ref PERCENT_RE: Regex = Regex::new(r"(\d)\s*%").unwrap();

    /// Anything that is not a word character, whitespace or apostrophe
    static ref SYMBOL_RE: Regex = Regex::new(r"[^\w\s']").unwrap();

    /// Apostrophes not inside a word
    static ref STRAY_APOSTROPHE_RE: Regex = Regex::new(r"(?:^|\s)'+|'+(?:\s|$)").unwrap();

    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

const HANGUL_BASE: u32 = 0xAC00;
const HANGUL_LAST: u32 = 0xD7A3;
const MEDIALS_TIMES_FINALS: u32 = 21 * 28;
const FINALS: u32 = 28;

const INITIAL_JAMO: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

const MEDIAL_JAMO: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ',
    'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// Final consonants; index 0 is "no final".
const FINAL_JAMO: [Option<char>; 28] = [
    None,
    Some('ㄱ'),
    Some('ㄲ'),
    Some('ㄳ'),
    Some('ㄴ'),
    Some('ㄵ'),
    Some('ㄶ'),
    Some('ㄷ'),
    Some('ㄹ'),
    Some('ㄺ'),
    Some('ㄻ'),
    Some('ㄼ'),
    Some('ㄽ'),
    Some('ㄾ'),
    Some('ㄿ'),
    Some('ㅀ'),
    Some('ㅁ'),
    Some('ㅂ'),
    Some('ㅄ'),
    Some('ㅅ'),
    Some('ㅆ'),
    Some('ㅇ'),
    Some('ㅈ'),
    Some('ㅊ'),
    Some('ㅋ'),
    Some('ㅌ'),
    Some('ㅍ'),
    Some('ㅎ'),
];

/// Normalize a transcript for scoring in `language` (`"en"`, `"ko"`, ...).
///
/// Languages without a dedicated normalizer are only trimmed.
pub fn normalize_for_scoring(text: &str, language: &str) -> String {
    match language.to_ascii_lowercase().as_str() {
        "en" => normalize_english(text),
        "ko" => normalize_korean(text),
        _ => text.trim().to_string(),
    }
}

/// English transcript normalization.
pub fn normalize_english(text: &str) -> String {
    let text: String = text
        .trim()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let text = BRACKETED_RE.replace_all(&text, " ");
    let text = FILLER_RE.replace_all(&text, " ");
    let text = DIGIT_GROUPS_RE.replace_all(&text, |caps: &regex::Captures| {
        caps[0].replace(',', "")
    });
    let text = PERCENT_RE.replace_all(&text, "$1 percent");
    let text = SYMBOL_RE.replace_all(&text, " ");
    let text = STRAY_APOSTROPHE_RE.replace_all(&text, " ");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

/// Korean transcript normalization.
///
/// Drops ASCII punctuation and spaces, then splits every Hangul syllable
/// into its compatibility jamo so CER counts sub-syllable errors.
pub fn normalize_korean(text: &str) -> String {
    let stripped: String = text
        .trim()
        .chars()
        .filter(|c| !c.is_ascii_punctuation() && *c != ' ')
        .collect();
    decompose_hangul(&stripped)
}

/// Split precomposed Hangul syllables into compatibility jamo.
///
/// Other characters pass through unchanged.
pub fn decompose_hangul(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 3);
    for c in text.chars() {
        let code = c as u32;
        if !(HANGUL_BASE..=HANGUL_LAST).contains(&code) {
            result.push(c);
            continue;
        }
        let index = code - HANGUL_BASE;
        result.push(INITIAL_JAMO[(index / MEDIALS_TIMES_FINALS) as usize]);
        result.push(MEDIAL_JAMO[((index % MEDIALS_TIMES_FINALS) / FINALS) as usize]);
        if let Some(final_jamo) = FINAL_JAMO[(index % FINALS) as usize] {
            result.push(final_jamo);
        }
    }
    result
}
