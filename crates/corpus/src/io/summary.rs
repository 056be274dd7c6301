//! JSON run report written next to the vocabulary.

use bpetrain_core::{Result, TrainerError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Summary of one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Corpus the run trained on
    pub input: String,
    /// Lines read after `fraction` and `max_lines` were applied
    pub lines: usize,
    /// Distinct words
    pub distinct_words: usize,
    /// Word occurrences
    pub total_words: u64,
    /// Size of the initial alphabet, end-of-word marker included
    pub alphabet_size: usize,
    /// Merge budget
    pub merges_requested: usize,
    /// Merges actually learned
    pub merges_performed: usize,
    /// Why training stopped
    pub stop_reason: String,
    /// Wall-clock time spent in the merge loop
    pub elapsed_secs: f64,
}

impl TrainingSummary {
    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the summary to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| TrainerError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|e| TrainerError::io(path, e))
    }
}
