//! `eval` - transcribe synthesized audio and score it against references.
//!
//! ```text
//! textfront eval out/ko --references refs_ko.txt --language ko --metric cer \
//!     --transcriber whisper-cli -- -m ggml-medium.bin -l {language} -nt -f {audio}
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::*;
use textfront_core::eval::{CommandTranscriber, Evaluator, Metric};

use super::utils::{format_score, truncate};

#[derive(Args)]
pub struct EvalArgs {
    /// Folder with the synthesized .wav files
    #[arg(value_name = "FOLDER")]
    folder: PathBuf,

    /// Reference texts, one per line, in the same order as the sorted .wav files
    #[arg(short, long, value_name = "FILE")]
    references: PathBuf,

    /// Language passed to the transcriber and used for normalization (en, ko, ...)
    #[arg(short, long, default_value = "en")]
    language: String,

    /// Scoring metric
    #[arg(short, long, value_enum, default_value_t = MetricArg::Wer)]
    metric: MetricArg,

    /// ASR program run once per file
    #[arg(short, long, value_name = "PROGRAM")]
    transcriber: PathBuf,

    /// Arguments for the ASR program; {audio} and {language} are substituted
    #[arg(last = true, value_name = "ARGS")]
    transcriber_args: Vec<String>,

    /// Only print the scores, do not write asr_<language>.json
    #[arg(long)]
    no_report: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    Wer,
    Cer,
}

impl From<MetricArg> for Metric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Wer => Metric::Wer,
            MetricArg::Cer => Metric::Cer,
        }
    }
}

pub fn run(args: EvalArgs) -> Result<()> {
    let references = read_references(&args.references)?;

    let transcriber = CommandTranscriber::new(args.transcriber, args.transcriber_args);
    let evaluator = Evaluator::new(Arc::new(transcriber), args.metric.into(), &args.language);

    let report = evaluator
        .evaluate_dir(&args.folder, &references)
        .with_context(|| format!("Evaluation of {} failed", args.folder.display()))?;

    let metric = report.metric_type.name().to_uppercase();
    println!(
        "{} {} ({}, {} files)",
        "Evaluation".bold(),
        args.folder.display(),
        args.language,
        report.results.len()
    );
    println!("{}", "=".repeat(60));
    for result in &report.results {
        let status = match &result.error {
            Some(_) => " (transcription failed)".red().to_string(),
            None => String::new(),
        };
        println!(
            "  {:<24} {} {}{}",
            truncate(&result.file, 24),
            metric,
            format_score(result.score()),
            status
        );
        log::info!("{}: {:?} / {:?}", result.file, result.reference_text, result.hypothesis_text);
    }
    println!("{}", "=".repeat(60));
    println!(
        "  Average {} ({}): {}",
        metric,
        report.language,
        format_score(report.average_score).bold()
    );
    if report.failed_count() > 0 {
        println!(
            "  {}",
            format!("{} transcriptions failed", report.failed_count()).yellow()
        );
    }

    if !args.no_report {
        let path = report
            .write_json(&args.folder)
            .context("Failed to write evaluation report")?;
        println!("  Report: {}", path.display());
    }
    Ok(())
}

fn read_references(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read references: {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
