//! Train command implementation.

use bpetrain_core::DEFAULT_END_OF_WORD;
use bpetrain_corpus::NormalizationForm;
use bpetrain_training::Selection;
use clap::Parser;
use std::path::PathBuf;

/// Train command arguments.
#[derive(Parser, Debug)]
pub struct TrainCommand {
    /// Corpus to train on (`-` for stdin)
    #[arg(short, long, value_name = "PATH")]
    pub input: PathBuf,

    /// Output file for the vocabulary, one symbol per line (`-` for stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// Number of merges to learn
    #[arg(short = 'n', long, default_value_t = 30_000)]
    pub num_merges: usize,

    /// Stop once the best pair occurs fewer times than this
    #[arg(long, default_value_t = 1)]
    pub min_frequency: u64,

    /// Marker appended to every word
    #[arg(long, default_value = DEFAULT_END_OF_WORD)]
    pub end_of_word: String,

    /// Train on the first share of the corpus lines, in (0, 1]
    #[arg(long, default_value_t = 1.0)]
    pub fraction: f64,

    /// Read at most this many lines
    #[arg(long, value_name = "N")]
    pub max_lines: Option<usize>,

    /// Unicode normalization: none, nfc, nfd, nfkc or nfkd
    #[arg(long, value_name = "FORM", default_value = "none")]
    pub normalize: NormalizationForm,

    /// Trim punctuation from word edges
    #[arg(long)]
    pub strip_punctuation: bool,

    /// Lowercase the corpus
    #[arg(long)]
    pub lowercase: bool,

    /// Write the initial alphabet before the learned symbols
    #[arg(long)]
    pub with_alphabet: bool,

    /// Best-pair selection: heap or scan
    #[arg(long, default_value = "heap")]
    pub selection: Selection,

    /// Write a JSON run summary to this path
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Worker threads for corpus counting (defaults to all cores)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,
}

use anyhow::{Context, Result};
use bpetrain_corpus::{
    CorpusReader, PreprocessConfig, Preprocessor, ReadConfig, TrainingSummary, VocabularyWriter,
};
use bpetrain_training::{BpeTrainer, TrainingConfig};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::ThreadPoolBuilder;
use std::time::Instant;

pub fn run(cmd: TrainCommand) -> Result<()> {
    if let Some(threads) = cmd.threads {
        ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("unable to configure Rayon thread pool")?;
    }

    let config = TrainingConfig::builder()
        .num_merges(cmd.num_merges)
        .min_frequency(cmd.min_frequency)
        .end_of_word(cmd.end_of_word.as_str())
        .selection(cmd.selection)
        .build()
        .context("invalid training options")?;

    let reader = CorpusReader::new(ReadConfig {
        fraction: cmd.fraction,
        max_lines: cmd.max_lines,
    })
    .context("invalid input options")?;

    let start = Instant::now();
    let lines = reader
        .read(&cmd.input)
        .with_context(|| format!("failed to read corpus {}", cmd.input.display()))?;

    let preprocessor = Preprocessor::new(PreprocessConfig {
        normalization: cmd.normalize,
        strip_punctuation: cmd.strip_punctuation,
        lowercase: cmd.lowercase,
    });
    let counts = preprocessor.count_lines(&lines);
    let line_count = lines.len();
    drop(lines);

    let distinct_words = counts.len();
    let total_words = counts.total();
    info!(
        "Counted {} distinct words ({} occurrences) in {:.2}s",
        distinct_words,
        total_words,
        start.elapsed().as_secs_f64()
    );

    let words = counts.into_sorted();
    let mut trainer = BpeTrainer::new(config, words.iter().map(|(w, c)| (w.as_str(), *c)))
        .context("failed to set up training")?;
    drop(words);

    let alphabet: Vec<String> = trainer
        .symbols()
        .iter()
        .map(|(_, symbol)| symbol.to_string())
        .collect();

    let progress = progress_bar(trainer.config().num_merges, cmd.no_progress)?;
    let start = Instant::now();
    trainer
        .train_with(|rank, merge| {
            progress.set_position(rank as u64 + 1);
            if rank % 64 == 0 {
                progress.set_message(merge.symbol.to_string());
            }
        })
        .context("training failed")?;
    progress.finish_and_clear();
    let elapsed = start.elapsed();

    let stop_reason = trainer
        .stop_reason()
        .map(|reason| reason.to_string())
        .unwrap_or_default();
    info!(
        "Learned {} merges in {:.2}s ({})",
        trainer.vocabulary().len(),
        elapsed.as_secs_f64(),
        stop_reason
    );

    let merges_requested = trainer.config().num_merges;
    let vocab = trainer.into_vocabulary();
    let mut writer = VocabularyWriter::new(&vocab);
    if cmd.with_alphabet {
        writer = writer.with_alphabet(alphabet.iter().cloned());
    }
    writer
        .save(&cmd.output)
        .with_context(|| format!("failed to write vocabulary to {}", cmd.output.display()))?;

    if let Some(path) = &cmd.summary {
        let summary = TrainingSummary {
            input: cmd.input.display().to_string(),
            lines: line_count,
            distinct_words,
            total_words,
            alphabet_size: alphabet.len(),
            merges_requested,
            merges_performed: vocab.len(),
            stop_reason,
            elapsed_secs: elapsed.as_secs_f64(),
        };
        summary
            .save(path)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        info!("Summary written to {}", path.display());
    }

    Ok(())
}

fn progress_bar(len: usize, hidden: bool) -> Result<ProgressBar> {
    if hidden || len == 0 {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template(
        "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} merges (eta {eta}) {msg}",
    )
    .context("invalid progress template")?
    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");
    pb.set_style(style);
    Ok(pb)
}
