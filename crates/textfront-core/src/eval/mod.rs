//! Intelligibility evaluation of synthesized speech.
//!
//! Synthesized utterances are transcribed with an ASR [`Transcriber`] and
//! compared against the text they were synthesized from. Both sides are
//! normalized per language, then scored with word or character error rate.
//!
//! ```rust,ignore
//! let transcriber = CommandTranscriber::new("whisper-cli", ["-l", "{language}", "-nt", "-f", "{audio}"]);
//! let evaluator = Evaluator::new(Arc::new(transcriber), Metric::Cer, "ko");
//! let report = evaluator.evaluate_dir("out/ko", &references)?;
//! report.write_json("out/ko")?; // out/ko/asr_ko.json
//! ```
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`metrics`] | edit distance, WER, CER |
//! | [`normalize`] | per-language transcript normalization |
//! | [`transcriber`] | external-program transcriber |

pub mod metrics;
pub mod normalize;
pub mod transcriber;

pub use metrics::{char_error_rate, edit_distance, word_error_rate};
pub use normalize::{decompose_hangul, normalize_english, normalize_for_scoring, normalize_korean};
pub use transcriber::CommandTranscriber;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{TextfrontError, TextfrontResult};

/// Speech recognizer used to transcribe synthesized audio.
pub trait Transcriber: Send + Sync {
    /// Transcribe one audio file spoken in `language`.
    fn transcribe(&self, audio: &Path, language: &str) -> TextfrontResult<String>;
}

/// Scoring metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Word error rate
    #[default]
    Wer,
    /// Character error rate
    Cer,
}

impl Metric {
    /// Lowercase name, also the score key in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Wer => "wer",
            Metric::Cer => "cer",
        }
    }

    /// Score a hypothesis against a reference.
    pub fn score(&self, reference: &str, hypothesis: &str) -> f64 {
        match self {
            Metric::Wer => word_error_rate(reference, hypothesis),
            Metric::Cer => char_error_rate(reference, hypothesis),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = TextfrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wer" => Ok(Metric::Wer),
            "cer" => Ok(Metric::Cer),
            other => Err(TextfrontError::evaluation(format!(
                "Invalid metric type '{}'. Use 'wer' or 'cer'",
                other
            ))),
        }
    }
}

/// Score of one audio file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileScore {
    /// Audio file name
    pub file: String,
    /// Normalized reference
    pub reference_text: String,
    /// Normalized transcription
    pub hypothesis_text: String,
    /// Word error rate, for WER reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wer: Option<f64>,
    /// Character error rate, for CER reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cer: Option<f64>,
    /// Transcription failure, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileScore {
    fn new(
        metric: Metric,
        file: String,
        reference_text: String,
        hypothesis_text: String,
        error: Option<String>,
    ) -> Self {
        let score = metric.score(&reference_text, &hypothesis_text);
        let (wer, cer) = match metric {
            Metric::Wer => (Some(score), None),
            Metric::Cer => (None, Some(score)),
        };
        Self {
            file,
            reference_text,
            hypothesis_text,
            wer,
            cer,
            error,
        }
    }

    /// The recorded score, whichever metric it is.
    pub fn score(&self) -> f64 {
        self.wer.or(self.cer).unwrap_or(0.0)
    }
}

/// Scores of one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Language the audio was transcribed in
    pub language: String,
    /// Metric used for every file
    pub metric_type: Metric,
    /// Mean score over all files, 0.0 when there are none
    pub average_score: f64,
    /// Per-file scores, in file-name order
    pub results: Vec<FileScore>,
}

impl EvaluationReport {
    /// Build a report and compute its average.
    pub fn new(language: impl Into<String>, metric_type: Metric, results: Vec<FileScore>) -> Self {
        let average_score = if results.is_empty() {
            0.0
        } else {
            results.iter().map(FileScore::score).sum::<f64>() / results.len() as f64
        };
        Self {
            language: language.into(),
            metric_type,
            average_score,
            results,
        }
    }

    /// Number of files whose transcription failed.
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }

    /// File name the report is written to.
    pub fn file_name(&self) -> String {
        format!("asr_{}.json", self.language)
    }

    /// Write the report as pretty-printed JSON into `folder`.
    pub fn write_json(&self, folder: impl AsRef<Path>) -> TextfrontResult<PathBuf> {
        let path = folder.as_ref().join(self.file_name());
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        log::info!(target: "textfront", "Saved evaluation report to {}", path.display());
        Ok(path)
    }

    /// Load a report written by [`EvaluationReport::write_json`].
    pub fn from_file(path: impl AsRef<Path>) -> TextfrontResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Transcribes and scores a folder of synthesized audio.
pub struct Evaluator {
    transcriber: Arc<dyn Transcriber>,
    metric: Metric,
    language: String,
}

impl Evaluator {
    /// Create an evaluator for `language` (e.g. `"en"`, `"ko"`).
    pub fn new(transcriber: Arc<dyn Transcriber>, metric: Metric, language: impl Into<String>) -> Self {
        Self {
            transcriber,
            metric,
            language: language.into(),
        }
    }

    /// Metric used for scoring.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Evaluation language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Evaluate every `.wav` file in `folder`.
    ///
    /// Files are taken in name order and paired with `references` by
    /// position; the counts must match. A failed transcription does not
    /// stop the run: it is logged, recorded on the file's entry and scored
    /// against an empty hypothesis.
    pub fn evaluate_dir<S: AsRef<str>>(
        &self,
        folder: impl AsRef<Path>,
        references: &[S],
    ) -> TextfrontResult<EvaluationReport> {
        let folder = folder.as_ref();
        let files = list_wav_files(folder)?;
        if files.len() != references.len() {
            return Err(TextfrontError::evaluation(format!(
                "{} audio files in {} but {} reference texts",
                files.len(),
                folder.display(),
                references.len()
            )));
        }

        log::info!(
            target: "textfront",
            "Evaluating {} files in {} ({}, {})",
            files.len(),
            folder.display(),
            self.language,
            self.metric
        );

        let mut results = Vec::with_capacity(files.len());
        for (path, reference) in files.iter().zip(references) {
            let file = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            let (hypothesis, error) = match self.transcriber.transcribe(path, &self.language) {
                Ok(text) => (text, None),
                Err(e) => {
                    log::warn!(target: "textfront", "Transcription failed for {}: {}", file, e);
                    (String::new(), Some(e.to_string()))
                }
            };

            let score = FileScore::new(
                self.metric,
                file,
                normalize_for_scoring(reference.as_ref(), &self.language),
                normalize_for_scoring(&hypothesis, &self.language),
                error,
            );
            log::debug!(
                target: "textfront",
                "{} | {} ({}): {:.5}",
                score.file,
                self.metric.name().to_uppercase(),
                self.language,
                score.score()
            );
            results.push(score);
        }

        let report = EvaluationReport::new(self.language.clone(), self.metric, results);
        log::info!(
            target: "textfront",
            "Average {} ({}): {:.5}",
            self.metric.name().to_uppercase(),
            self.language,
            report.average_score
        );
        Ok(report)
    }
}

/// `.wav` files directly inside `folder`, sorted by name.
fn list_wav_files(folder: &Path) -> TextfrontResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map(|ext| ext == "wav").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mocks::MockTranscriber;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"RIFF").unwrap();
    }

    #[test]
    fn test_metric_parsing() {
        assert_eq!("WER".parse::<Metric>().unwrap(), Metric::Wer);
        assert_eq!("cer".parse::<Metric>().unwrap(), Metric::Cer);
        assert!(matches!(
            "bleu".parse::<Metric>(),
            Err(TextfrontError::Evaluation(_))
        ));
    }

    #[test]
    fn test_report_average() {
        let results = vec![
            FileScore::new(Metric::Wer, "a.wav".into(), "a b".into(), "a b".into(), None),
            FileScore::new(Metric::Wer, "b.wav".into(), "a b".into(), "a".into(), None),
        ];
        let report = EvaluationReport::new("en", Metric::Wer, results);
        assert!((report.average_score - 0.25).abs() < 1e-9);
        assert_eq!(EvaluationReport::new("en", Metric::Wer, vec![]).average_score, 0.0);
    }

    #[test]
    fn test_list_wav_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.wav");
        touch(dir.path(), "a.wav");
        touch(dir.path(), "notes.txt");
        std::fs::create_dir(dir.path().join("sub.wav")).unwrap();

        let names: Vec<String> = list_wav_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.wav", "b.wav"]);
    }

    #[test]
    fn test_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.wav");
        let transcriber = Arc::new(MockTranscriber::new());
        let evaluator = Evaluator::new(transcriber.clone(), Metric::Wer, "en");

        assert!(matches!(
            evaluator.evaluate_dir(dir.path(), &["one", "two"]),
            Err(TextfrontError::Evaluation(_))
        ));
        assert_eq!(transcriber.call_count(), 0);
    }

    #[test]
    fn test_failed_transcription_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.wav");
        touch(dir.path(), "b.wav");
        let transcriber = Arc::new(MockTranscriber::new().with_transcript("a.wav", "Hello world!"));
        let evaluator = Evaluator::new(transcriber, Metric::Wer, "en");

        let report = evaluator
            .evaluate_dir(dir.path(), &["Hello, world.", "Second line"])
            .unwrap();
        assert_eq!(report.results[0].wer, Some(0.0));
        assert!(report.results[0].error.is_none());
        assert_eq!(report.results[1].hypothesis_text, "");
        assert_eq!(report.results[1].wer, Some(1.0));
        assert!(report.results[1].error.is_some());
        assert_eq!(report.failed_count(), 1);
        assert!((report.average_score - 0.5).abs() < 1e-9);
    }
}
