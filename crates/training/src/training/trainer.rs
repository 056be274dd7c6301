//! BPE trainer implementation.
//!
//! The trainer repeatedly merges the heaviest adjacent pair. Only sequences
//! that contain the chosen pair are rewritten, and the pair index is repaired
//! with exact per-boundary deltas instead of being rebuilt, so a merge costs
//! time proportional to the occurrences of the merged pair.

use super::config::TrainingConfig;
use super::index::PairIndex;
use super::merge::merge_pair;
use ahash::{AHashMap, AHashSet};
use bpetrain_core::{
    Merge, Pair, Result, SequenceId, SequenceStore, SymbolId, SymbolTable, Vocabulary,
};
use std::fmt;

/// Where the trainer is in its merge loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, no merge attempted yet
    Idle,
    /// Choosing the next pair
    SelectingPair,
    /// Rewriting the sequences that contain the pair
    Rewriting,
    /// Applying pair-weight deltas to the index
    Reindexing,
    /// No further merges will happen
    Done,
}

/// Why training stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured number of merges was performed
    BudgetExhausted,
    /// No adjacent pair is left anywhere in the corpus
    IndexEmpty,
    /// The best pair weighs less than the configured minimum
    BelowMinFrequency,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            StopReason::BudgetExhausted => "merge budget exhausted",
            StopReason::IndexEmpty => "no pairs left",
            StopReason::BelowMinFrequency => "best pair below minimum frequency",
        };
        f.write_str(reason)
    }
}

/// BPE trainer.
///
/// Owns the symbol table, the sequence store, the pair index and the
/// vocabulary being learned. Between calls to [`BpeTrainer::step`] every
/// invariant holds, so a caller may stop after any step and keep the partial
/// vocabulary.
#[derive(Debug)]
pub struct BpeTrainer {
    config: TrainingConfig,
    symbols: SymbolTable,
    store: SequenceStore,
    index: PairIndex,
    vocab: Vocabulary,
    phase: Phase,
    stop_reason: Option<StopReason>,
}

impl BpeTrainer {
    /// Create a trainer from `(word, count)` entries.
    ///
    /// Builds the initial sequences and the full pair index.
    pub fn new<I, W>(config: TrainingConfig, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = (W, u64)>,
        W: AsRef<str>,
    {
        config.validate()?;

        let mut symbols = SymbolTable::new();
        let store = SequenceStore::initialize(words, &mut symbols, &config.end_of_word)?;
        log::info!(
            "loaded {} sequences ({} word occurrences, {} symbols over an alphabet of {})",
            store.len(),
            store.total_weight(),
            store.total_symbols(),
            symbols.len()
        );

        Ok(Self::from_store(config, symbols, store))
    }

    /// Create a trainer over an existing store.
    ///
    /// `symbols` must be the table the store's sequences were interned in.
    pub fn from_store(config: TrainingConfig, symbols: SymbolTable, store: SequenceStore) -> Self {
        let index = PairIndex::build(&store).with_selection(config.selection);
        log::info!(
            "built pair index with {} distinct pairs ({:?} selection)",
            index.len(),
            index.selection()
        );

        Self {
            vocab: Vocabulary::with_capacity(config.num_merges.min(1 << 16)),
            config,
            symbols,
            store,
            index,
            phase: Phase::Idle,
            stop_reason: None,
        }
    }

    /// Perform one merge.
    ///
    /// Returns the merge just recorded, or `None` once training is done.
    pub fn step(&mut self) -> Result<Option<&Merge>> {
        if self.phase == Phase::Done {
            return Ok(None);
        }

        self.phase = Phase::SelectingPair;
        let (pair, weight) = match self.select() {
            Ok(best) => best,
            Err(reason) => {
                self.finish(reason);
                return Ok(None);
            }
        };

        let new_symbol = self.symbols.concat(pair.0, pair.1)?;
        self.apply_merge(pair, new_symbol)?;

        let (left, right) = self.symbols.pair_texts(pair);
        let merge = Merge::new(left, right, weight);
        debug_assert_eq!(merge.symbol.as_str(), self.symbols.text(new_symbol));
        log::debug!(
            "merge #{}: {:?} + {:?} -> {:?} (weight {})",
            self.vocab.len() + 1,
            merge.left,
            merge.right,
            merge.symbol,
            weight
        );
        self.vocab.push(merge);
        self.log_progress();

        self.phase = Phase::SelectingPair;
        Ok(self.vocab.last())
    }

    /// Run until done and return the learned vocabulary.
    pub fn train(mut self) -> Result<Vocabulary> {
        self.train_with(|_, _| {})?;
        Ok(self.vocab)
    }

    /// Run until done, calling `on_merge(rank, merge)` after every merge.
    pub fn train_with<F>(&mut self, mut on_merge: F) -> Result<()>
    where
        F: FnMut(usize, &Merge),
    {
        loop {
            let rank = self.vocab.len();
            match self.step()? {
                Some(merge) => on_merge(rank, merge),
                None => return Ok(()),
            }
        }
    }

    /// Pick the pair to merge next, or the reason to stop.
    fn select(&mut self) -> std::result::Result<(Pair, u64), StopReason> {
        if self.vocab.len() >= self.config.num_merges {
            return Err(StopReason::BudgetExhausted);
        }

        let (pair, weight) = self
            .index
            .peek_best(&self.symbols)
            .ok_or(StopReason::IndexEmpty)?;

        if weight < self.config.min_frequency {
            return Err(StopReason::BelowMinFrequency);
        }
        Ok((pair, weight))
    }

    /// Rewrite every sequence containing `pair` and repair the index.
    fn apply_merge(&mut self, pair: Pair, new_symbol: SymbolId) -> Result<()> {
        self.phase = Phase::Rewriting;
        let affected = self.index.sequences_of(pair);

        for id in affected {
            self.phase = Phase::Rewriting;
            let (symbols, weight) = self.store.get(id)?;
            let rewrite = merge_pair(symbols, pair, new_symbol);
            if rewrite.merged == 0 {
                continue;
            }

            self.phase = Phase::Reindexing;
            self.reindex(id, weight, &rewrite.symbols, &rewrite.changes);
            self.store.replace_symbols(id, rewrite.symbols)?;
        }

        let leftover = self.index.remove(pair);
        debug_assert!(
            leftover.is_none(),
            "merged pair {:?} kept weight {:?}",
            pair,
            leftover.map(|e| e.weight)
        );
        Ok(())
    }

    /// Apply one sequence's pair changes, scaled by its weight.
    fn reindex(&mut self, id: SequenceId, weight: u64, rewritten: &[SymbolId], changes: &[(Pair, i64)]) {
        let mut net: AHashMap<Pair, i128> = AHashMap::with_capacity(changes.len());
        for &(pair, delta) in changes {
            *net.entry(pair).or_insert(0) += i128::from(delta);
        }

        let present: AHashSet<Pair> = rewritten.windows(2).map(|w| (w[0], w[1])).collect();
        let weight = i128::from(weight);

        for (pair, delta) in net {
            if delta != 0 {
                self.index
                    .adjust(pair, delta * weight, id, present.contains(&pair));
            }
        }
    }

    fn finish(&mut self, reason: StopReason) {
        self.phase = Phase::Done;
        self.stop_reason = Some(reason);
        log::info!(
            "training finished after {} merges ({:?}); {} pairs left",
            self.vocab.len(),
            reason,
            self.index.len()
        );
    }

    /// Log at every whole percent of the merge budget.
    fn log_progress(&self) {
        let done = self.vocab.len();
        let total = self.config.num_merges;
        if total >= 100 && done % (total / 100) == 0 {
            if let Some(last) = self.vocab.last() {
                log::info!(
                    "progress: {}% ({}/{} merges), last {:?} (weight {})",
                    done * 100 / total,
                    done,
                    total,
                    last.symbol,
                    last.weight
                );
            }
        }
    }

    /// Rebuild the index from the current sequences and compare it with the
    /// incrementally maintained one. Costs a full corpus scan.
    pub fn verify_index(&self) -> bool {
        PairIndex::build(&self.store) == self.index
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Why training stopped, once it has.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// The configuration in use.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// The symbol table.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// The sequence store.
    pub fn store(&self) -> &SequenceStore {
        &self.store
    }

    /// The pair index.
    pub fn index(&self) -> &PairIndex {
        &self.index
    }

    /// The vocabulary learned so far.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Consume the trainer, returning the vocabulary learned so far.
    pub fn into_vocabulary(self) -> Vocabulary {
        self.vocab
    }

}
