//! ASR transcriber driven through an external program.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::Transcriber;
use crate::error::{TextfrontError, TextfrontResult};

/// Runs an external ASR command once per audio file.
///
/// The placeholders `{audio}` and `{language}` are substituted in every
/// argument. The transcript is the program's stdout, trimmed.
///
/// ```rust,ignore
/// let whisper = CommandTranscriber::new(
///     "whisper-cli",
///     ["-m", "ggml-medium.bin", "-l", "{language}", "-nt", "-f", "{audio}"],
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CommandTranscriber {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandTranscriber {
    /// Create a transcriber running `program` with `args`.
    pub fn new<I, S>(program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The program this transcriber runs.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn expand_args(&self, audio: &Path, language: &str) -> Vec<String> {
        let audio = audio.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace("{audio}", &audio).replace("{language}", language))
            .collect()
    }
}

impl Transcriber for CommandTranscriber {
    fn transcribe(&self, audio: &Path, language: &str) -> TextfrontResult<String> {
        let output = Command::new(&self.program)
            .args(self.expand_args(audio, language))
            .output()
            .map_err(|e| {
                TextfrontError::evaluation(format!(
                    "Failed to run transcriber {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(TextfrontError::evaluation(format!(
                "Transcriber {} failed on {}: {}",
                self.program.display(),
                audio.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_substituted() {
        let transcriber = CommandTranscriber::new("asr", ["-l", "{language}", "--in={audio}"]);
        assert_eq!(
            transcriber.expand_args(Path::new("/tmp/a.wav"), "ko"),
            vec!["-l", "ko", "--in=/tmp/a.wav"]
        );
    }

    #[test]
    fn test_missing_program() {
        let transcriber = CommandTranscriber::new("/nonexistent/asr", ["{audio}"]);
        assert!(matches!(
            transcriber.transcribe(Path::new("a.wav"), "en"),
            Err(TextfrontError::Evaluation(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_trimmed() {
        let transcriber = CommandTranscriber::new("echo", ["  hello {language}  "]);
        assert_eq!(
            transcriber.transcribe(Path::new("a.wav"), "en").unwrap(),
            "hello en"
        );
    }
}
