//! Reading corpus lines from a file or stdin.
//!
//! Gzip-compressed input is detected by its magic bytes and decompressed on
//! the fly, whatever the file is called.

use bpetrain_core::{Result, TrainerError};
use flate2::bufread::MultiGzDecoder;
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Path that stands for stdin (when reading) or stdout (when writing).
pub const STDIO_PATH: &str = "-";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Options for reading a corpus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadConfig {
    /// Share of the lines to keep, counted from the start, in (0, 1]
    pub fraction: f64,
    /// Upper bound on lines read
    pub max_lines: Option<usize>,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            fraction: 1.0,
            max_lines: None,
        }
    }
}

impl ReadConfig {
    /// Check that `fraction` lies in (0, 1].
    pub fn validate(&self) -> Result<()> {
        if !(self.fraction > 0.0 && self.fraction <= 1.0) {
            return Err(TrainerError::InvalidConfig(format!(
                "fraction must be in (0, 1], got {}",
                self.fraction
            )));
        }
        Ok(())
    }

    /// Number of lines kept out of `total`.
    pub fn keep(&self, total: usize) -> usize {
        if self.fraction >= 1.0 {
            return total;
        }
        ((total as f64 * self.fraction).ceil() as usize).min(total)
    }
}

/// Line-oriented corpus reader.
#[derive(Debug, Clone, Default)]
pub struct CorpusReader {
    config: ReadConfig,
}

impl CorpusReader {
    /// Create a reader, validating its options.
    pub fn new(config: ReadConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Read lines from `path`, or from stdin when `path` is `-`.
    pub fn read(&self, path: &Path) -> Result<Vec<String>> {
        let lines = if path.as_os_str() == STDIO_PATH {
            self.read_raw(io::stdin().lock(), path)?
        } else {
            let file = File::open(path).map_err(|e| TrainerError::io(path, e))?;
            self.read_raw(file, path)?
        };

        info!("Read {} lines from {}", lines.len(), path.display());
        Ok(lines)
    }

    /// Read lines from a byte stream that may be gzip-compressed.
    pub fn read_raw<R: Read>(&self, reader: R, path: &Path) -> Result<Vec<String>> {
        let mut reader = BufReader::new(reader);
        let head = reader.fill_buf().map_err(|e| TrainerError::io(path, e))?;

        if head.starts_with(&GZIP_MAGIC) {
            debug!("{} is gzip-compressed", path.display());
            self.read_from(BufReader::new(MultiGzDecoder::new(reader)), path)
        } else {
            self.read_from(reader, path)
        }
    }

    /// Read lines from any buffered reader. `path` only labels errors.
    pub fn read_from<R: BufRead>(&self, reader: R, path: &Path) -> Result<Vec<String>> {
        let limit = self.config.max_lines.unwrap_or(usize::MAX);
        let mut lines = Vec::new();

        for line in reader.lines().take(limit) {
            lines.push(line.map_err(|e| TrainerError::io(path, e))?);
        }

        let keep = self.config.keep(lines.len());
        lines.truncate(keep);
        Ok(lines)
    }

    /// Reader options.
    pub fn config(&self) -> &ReadConfig {
        &self.config
    }
}
