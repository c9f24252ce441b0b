//! espeak-ng phonemizer backend.
//!
//! Calls the `espeak-ng` system command to convert text to IPA phonemes.
//! Requires espeak-ng to be installed on the system:
//! - macOS: `brew install espeak-ng`
//! - Linux: `apt-get install espeak-ng`

use std::path::{Path, PathBuf};
use std::process::Command;

use lazy_static::lazy_static;
use regex::Regex;

use super::{BackendFactory, BackendOptions, LanguageSwitch, Phonemizer};
use crate::error::{TextfrontError, TextfrontResult};

/// Punctuation kept verbatim when `preserve_punctuation` is set.
pub const PUNCTUATION_MARKS: &str = ";:,.!?¡¿—…\"«»“”(){}[]";

const STRESS_MARKS: [char; 2] = ['ˈ', 'ˌ'];

lazy_static! {
    /// Language switch markers such as `(en)` or `(en-us)`
    static ref LANGUAGE_FLAG_RE: Regex = Regex::new(r"\([a-z]{2,3}(?:-[a-z0-9]+)?\)").unwrap();
}

/// Creates [`EspeakBackend`]s.
#[derive(Debug, Clone)]
pub struct EspeakFactory {
    program: PathBuf,
}

impl EspeakFactory {
    /// Factory that runs `espeak-ng` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("espeak-ng")
    }

    /// Factory that runs the given espeak-ng executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The executable this factory runs.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for EspeakFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendFactory for EspeakFactory {
    fn initialize(
        &self,
        locale: &str,
        options: &BackendOptions,
    ) -> TextfrontResult<Box<dyn Phonemizer>> {
        let backend = EspeakBackend {
            program: self.program.clone(),
            locale: locale.to_string(),
            options: options.clone(),
        };

        // Probe the voice once so a missing program or voice fails here
        // instead of on the first real utterance.
        backend.run_espeak("a").map_err(|e| {
            TextfrontError::backend_init(format!("espeak-ng voice '{}': {}", locale, e))
        })?;

        Ok(Box::new(backend))
    }
}

/// espeak-ng backend for one locale.
#[derive(Debug, Clone)]
pub struct EspeakBackend {
    program: PathBuf,
    locale: String,
    options: BackendOptions,
}

impl EspeakBackend {
    fn run_espeak(&self, text: &str) -> TextfrontResult<String> {
        let output = Command::new(&self.program)
            .args(["-q", "--ipa", "-v", &self.locale])
            // text starting with '-' (e.g. "--" from a transliterated dash) is not an option
            .arg("--")
            .arg(text)
            .output()
            .map_err(|e| {
                TextfrontError::phonemize(format!(
                    "Failed to run {}. Is espeak-ng installed? Error: {}. \
                    Install with: brew install espeak-ng (macOS) or apt-get install espeak-ng (Linux)",
                    self.program.display(),
                    e
                ))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(TextfrontError::phonemize(format!(
                "espeak-ng failed ({}): {}",
                output.status,
                stderr.trim()
            )));
        }
        if !stderr.trim().is_empty() {
            log::warn!(target: "textfront", "espeak-ng ({}): {}", self.locale, stderr.trim());
        }

        // One line per clause; join into a single utterance.
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn phonemize_chunk(&self, chunk: &str) -> TextfrontResult<String> {
        if chunk.trim().is_empty() {
            return Ok(String::new());
        }

        let raw = self.run_espeak(chunk)?;
        let phonemes = match self.options.language_switch {
            LanguageSwitch::KeepFlags => raw,
            LanguageSwitch::RemoveFlags => LANGUAGE_FLAG_RE.replace_all(&raw, "").into_owned(),
            LanguageSwitch::RemoveUtterance => {
                if LANGUAGE_FLAG_RE.is_match(&raw) {
                    String::new()
                } else {
                    raw
                }
            }
        };

        if self.options.with_stress {
            Ok(phonemes)
        } else {
            Ok(phonemes
                .chars()
                .filter(|c| !STRESS_MARKS.contains(c))
                .collect())
        }
    }

    fn phonemize_text(&self, text: &str) -> TextfrontResult<String> {
        if !self.options.preserve_punctuation {
            let stripped: String = text
                .chars()
                .map(|c| if is_punctuation(c) { ' ' } else { c })
                .collect();
            return Ok(self.phonemize_chunk(&stripped)?.trim().to_string());
        }

        let mut result = String::with_capacity(text.len() * 2);
        for segment in split_punctuation(text) {
            match segment {
                Segment::Marks(marks) => {
                    let trimmed = marks.trim();
                    if marks.starts_with(char::is_whitespace) && needs_space(&result) {
                        result.push(' ');
                    }
                    result.push_str(trimmed);
                    if marks.ends_with(char::is_whitespace) {
                        result.push(' ');
                    }
                }
                Segment::Words(words) => {
                    let phonemes = self.phonemize_chunk(words)?;
                    if phonemes.is_empty() {
                        continue;
                    }
                    if words.starts_with(char::is_whitespace) && needs_space(&result) {
                        result.push(' ');
                    }
                    result.push_str(phonemes.trim());
                    if words.ends_with(char::is_whitespace) {
                        result.push(' ');
                    }
                }
            }
        }

        Ok(result.trim().to_string())
    }
}

impl Phonemizer for EspeakBackend {
    fn phonemize(&self, texts: &[&str]) -> TextfrontResult<Vec<String>> {
        texts.iter().map(|text| self.phonemize_text(text)).collect()
    }

    fn locale(&self) -> &str {
        &self.locale
    }

    fn name(&self) -> &'static str {
        "EspeakNG"
    }
}

fn is_punctuation(c: char) -> bool {
    PUNCTUATION_MARKS.contains(c)
}

fn needs_space(result: &str) -> bool {
    !result.is_empty() && !result.ends_with(' ')
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    /// Run of punctuation marks, with the whitespace around them
    Marks(&'a str),
    /// Text between punctuation runs
    Words(&'a str),
}

/// Split text into alternating word and punctuation segments.
///
/// Whitespace attaches to the punctuation run it touches so that spacing
/// around marks can be restored after phonemization.
fn split_punctuation(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_marks: Option<bool> = None;

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    for (i, &(offset, c)) in chars.iter().enumerate() {
        let is_mark = if c.is_whitespace() {
            // Whitespace joins a neighbouring mark run, otherwise the words.
            let prev_mark = in_marks == Some(true);
            let next_mark = chars[i + 1..]
                .iter()
                .find(|(_, n)| !n.is_whitespace())
                .map(|&(_, n)| is_punctuation(n))
                .unwrap_or(false);
            prev_mark || next_mark
        } else {
            is_punctuation(c)
        };

        match in_marks {
            Some(current) if current != is_mark => {
                let slice = &text[start..offset];
                segments.push(if current {
                    Segment::Marks(slice)
                } else {
                    Segment::Words(slice)
                });
                start = offset;
            }
            _ => {}
        }
        in_marks = Some(is_mark);
    }

    if let Some(current) = in_marks {
        let slice = &text[start..];
        segments.push(if current {
            Segment::Marks(slice)
        } else {
            Segment::Words(slice)
        });
    }

    segments
}
