//! Corpus preprocessing.
//!
//! Turns raw text into the `word -> count` table the trainer consumes.
//! Lines are counted in parallel; the result does not depend on the number
//! of threads.

pub mod normalize;
pub mod split;

pub use normalize::{NormalizationForm, Normalizer};
pub use split::{is_edge_punctuation, WordSplitter};

use ahash::AHashMap;
use compact_str::CompactString;
use rayon::prelude::*;

/// Preprocessing options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreprocessConfig {
    /// Unicode normalization applied to each line
    pub normalization: NormalizationForm,
    /// Trim edge punctuation from words
    pub strip_punctuation: bool,
    /// Lowercase words
    pub lowercase: bool,
}

/// Distinct words and their occurrence counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCounts {
    counts: AHashMap<CompactString, u64>,
}

impl WordCounts {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `word`.
    pub fn add(&mut self, word: &str) {
        self.add_count(word, 1);
    }

    /// Count `count` occurrences of `word`.
    pub fn add_count(&mut self, word: &str, count: u64) {
        if let Some(c) = self.counts.get_mut(word) {
            *c += count;
        } else {
            self.counts.insert(CompactString::new(word), count);
        }
    }

    /// Fold another table into this one.
    pub fn merge(&mut self, other: WordCounts) {
        if self.counts.len() < other.counts.len() {
            let smaller = std::mem::replace(&mut self.counts, other.counts);
            for (word, count) in smaller {
                *self.counts.entry(word).or_insert(0) += count;
            }
        } else {
            for (word, count) in other.counts {
                *self.counts.entry(word).or_insert(0) += count;
            }
        }
    }

    /// Count of a word (0 when unseen).
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no word was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of word occurrences.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate over `(word, count)` in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, &c)| (w.as_str(), c))
    }

    /// Words sorted lexicographically, so that downstream IDs are
    /// reproducible across runs.
    pub fn into_sorted(self) -> Vec<(CompactString, u64)> {
        let mut words: Vec<_> = self.counts.into_iter().collect();
        words.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        words
    }
}

impl<'a> FromIterator<&'a str> for WordCounts {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut counts = Self::new();
        for word in iter {
            counts.add(word);
        }
        counts
    }
}

/// Text -> word counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preprocessor {
    normalizer: Normalizer,
    splitter: WordSplitter,
}

impl Preprocessor {
    /// Create a preprocessor from options.
    pub fn new(config: PreprocessConfig) -> Self {
        Self {
            normalizer: Normalizer::new(config.normalization),
            splitter: WordSplitter {
                strip_punctuation: config.strip_punctuation,
                lowercase: config.lowercase,
            },
        }
    }

    /// Count the words of a single line into `counts`.
    pub fn count_line(&self, line: &str, counts: &mut WordCounts) {
        let line = self.normalizer.normalize(line);
        self.splitter.for_each_word(&line, |w| counts.add(w));
    }

    /// Count the words of a whole text, line by line in parallel.
    pub fn count_words(&self, text: &str) -> WordCounts {
        text.par_lines()
            .fold(WordCounts::new, |mut acc, line| {
                self.count_line(line, &mut acc);
                acc
            })
            .reduce(WordCounts::new, |mut a, b| {
                a.merge(b);
                a
            })
    }

    /// Count the words of pre-split lines in parallel.
    pub fn count_lines<S>(&self, lines: &[S]) -> WordCounts
    where
        S: AsRef<str> + Sync,
    {
        lines
            .par_iter()
            .fold(WordCounts::new, |mut acc, line| {
                self.count_line(line.as_ref(), &mut acc);
                acc
            })
            .reduce(WordCounts::new, |mut a, b| {
                a.merge(b);
                a
            })
    }

    /// Count the words of lines sequentially (for debugging or small inputs).
    pub fn count_lines_sequential<'a, I>(&self, lines: I) -> WordCounts
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = WordCounts::new();
        for line in lines {
            self.count_line(line, &mut counts);
        }
        counts
    }
}
