//! Writing a learned vocabulary to disk.
//!
//! The format is plain text: one symbol per line, in the order the merges
//! were learned. Optionally the initial alphabet is written first.

use super::read::STDIO_PATH;
use bpetrain_core::{Result, TrainerError, Vocabulary};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Vocabulary writer.
#[derive(Debug, Clone)]
pub struct VocabularyWriter<'a> {
    /// Learned merges
    vocab: &'a Vocabulary,
    /// Initial symbols to write before the merges, sorted
    alphabet: Option<Vec<String>>,
}

impl<'a> VocabularyWriter<'a> {
    /// Create a writer for the merge symbols only.
    pub fn new(vocab: &'a Vocabulary) -> Self {
        Self {
            vocab,
            alphabet: None,
        }
    }

    /// Write the given initial symbols (sorted, deduplicated) before the
    /// merge symbols.
    pub fn with_alphabet<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut alphabet: Vec<String> = symbols.into_iter().map(Into::into).collect();
        alphabet.sort_unstable();
        alphabet.dedup();
        self.alphabet = Some(alphabet);
        self
    }

    /// Number of lines that will be written.
    pub fn len(&self) -> usize {
        self.alphabet.as_ref().map_or(0, Vec::len) + self.vocab.len()
    }

    /// Check if nothing would be written.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write one symbol per line to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if let Some(alphabet) = &self.alphabet {
            for symbol in alphabet {
                writeln!(writer, "{}", symbol)?;
            }
        }
        for symbol in self.vocab.symbols() {
            writeln!(writer, "{}", symbol)?;
        }
        writer.flush()
    }

    /// Save to `path`, or to stdout when `path` is `-`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if path.as_os_str() == STDIO_PATH {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            return self
                .write_to(&mut writer)
                .map_err(|e| TrainerError::io(path, e));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TrainerError::io(parent, e))?;
        }

        let file = File::create(path).map_err(|e| TrainerError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)
            .map_err(|e| TrainerError::io(path, e))?;

        info!("Wrote {} symbols to {}", self.len(), path.display());
        Ok(())
    }
}
