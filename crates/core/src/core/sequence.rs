//! Per-word symbol sequences.
//!
//! Each distinct corpus word becomes one [`Sequence`] with a stable
//! [`SequenceId`]. Sequences are keyed by that ID and never by their current
//! symbols: two words that merge down to the same surface form stay separate
//! records with separate weights.

use super::symbols::{SymbolId, SymbolTable};
use crate::error::{Result, TrainerError};

/// Stable sequence identifier (index into the store).
pub type SequenceId = u32;

/// End-of-word marker appended to every word.
pub const DEFAULT_END_OF_WORD: &str = "§";

/// A word's current segmentation and its corpus count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// Current symbols, left to right
    pub symbols: Vec<SymbolId>,
    /// Corpus occurrence count of the word
    pub weight: u64,
}

/// Owner of every sequence in the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceStore {
    sequences: Vec<Sequence>,
}

impl SequenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the initial sequences from `(word, count)` entries.
    ///
    /// Each word is split into one symbol per character followed by the
    /// `end_of_word` marker; IDs are assigned in input order. Entries with a
    /// zero count are skipped since they contribute nothing to any pair.
    pub fn initialize<I, W>(
        words: I,
        symbols: &mut SymbolTable,
        end_of_word: &str,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (W, u64)>,
        W: AsRef<str>,
    {
        if end_of_word.is_empty() {
            return Err(TrainerError::InvalidConfig(
                "end-of-word marker must not be empty".to_string(),
            ));
        }

        let marker = symbols.intern(end_of_word);
        let mut store = Self::new();
        let mut buf = [0u8; 4];

        for (word, count) in words {
            if count == 0 {
                continue;
            }

            let word = word.as_ref();
            let mut seq = Vec::with_capacity(word.chars().count() + 1);
            for ch in word.chars() {
                seq.push(symbols.intern(ch.encode_utf8(&mut buf)));
            }
            seq.push(marker);

            store.push(Sequence {
                symbols: seq,
                weight: count,
            });
        }

        Ok(store)
    }

    /// Append a sequence, returning its ID.
    pub fn push(&mut self, sequence: Sequence) -> SequenceId {
        let id = self.sequences.len() as SequenceId;
        self.sequences.push(sequence);
        id
    }

    /// Get a sequence's symbols and weight.
    pub fn get(&self, id: SequenceId) -> Result<(&[SymbolId], u64)> {
        self.sequences
            .get(id as usize)
            .map(|s| (s.symbols.as_slice(), s.weight))
            .ok_or(TrainerError::UnknownSequence(id))
    }

    /// Overwrite a sequence's symbols. The weight is unchanged.
    pub fn replace_symbols(&mut self, id: SequenceId, symbols: Vec<SymbolId>) -> Result<()> {
        let seq = self
            .sequences
            .get_mut(id as usize)
            .ok_or(TrainerError::UnknownSequence(id))?;
        seq.symbols = symbols;
        Ok(())
    }

    /// Number of sequences.
    #[inline]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Check if the store holds no sequences.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Iterate over `(id, sequence)` in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (SequenceId, &Sequence)> {
        self.sequences
            .iter()
            .enumerate()
            .map(|(id, seq)| (id as SequenceId, seq))
    }

    /// Sum of all sequence weights (the number of word tokens in the corpus).
    pub fn total_weight(&self) -> u64 {
        self.sequences.iter().map(|s| s.weight).sum()
    }

    /// Total number of symbols across all sequences, ignoring weights.
    pub fn total_symbols(&self) -> usize {
        self.sequences.iter().map(|s| s.symbols.len()).sum()
    }
}
