//! The pair index.
//!
//! For every pair of symbols currently adjacent somewhere in the corpus the
//! index keeps the set of sequences containing it and its weighted count.
//! The index is built once with a full scan and then kept exact through
//! incremental [`PairIndex::adjust`] calls; an entry whose weight reaches
//! zero is removed, never kept around at zero.

use ahash::{AHashMap, AHashSet};
use bpetrain_core::{
    MergeCandidate, Pair, PairPriorityQueue, SequenceId, SequenceStore, SymbolTable,
};
use std::cmp::Ordering;
use std::str::FromStr;

/// Stale heap entries tolerated per live entry before the queue is rebuilt.
const COMPACT_RATIO: usize = 4;

/// Queue size below which compaction is never attempted.
const COMPACT_MIN: usize = 1 << 12;

/// How the best pair is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Lazily-invalidated max-heap
    #[default]
    Heap,
    /// Linear scan over all live pairs
    Scan,
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heap" => Ok(Self::Heap),
            "scan" => Ok(Self::Scan),
            other => Err(format!(
                "unknown selection '{}' (expected heap or scan)",
                other
            )),
        }
    }
}

/// Index entry for one pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairEntry {
    /// Sum over sequences of (occurrences in sequence x sequence weight)
    pub weight: u64,
    /// Sequences that contain the pair at least once
    pub sequences: AHashSet<SequenceId>,
}

/// Pair -> (occurrence set, weight) index with best-pair selection.
#[derive(Debug)]
pub struct PairIndex {
    entries: AHashMap<Pair, PairEntry>,
    /// Candidates for the heap selection
    queue: PairPriorityQueue,
    /// Pairs whose weight changed since the queue was last refreshed
    dirty: AHashSet<Pair>,
    selection: Selection,
    /// Queue size below which compaction is skipped
    compact_min: usize,
}

impl Default for PairIndex {
    fn default() -> Self {
        Self {
            entries: AHashMap::new(),
            queue: PairPriorityQueue::new(),
            dirty: AHashSet::new(),
            selection: Selection::default(),
            compact_min: COMPACT_MIN,
        }
    }
}

impl PairIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from scratch with one scan over every sequence.
    ///
    /// Each adjacent pair in a sequence of weight `w` adds `w`, so a pair
    /// that occurs twice in one word counts twice.
    pub fn build(store: &SequenceStore) -> Self {
        let mut entries: AHashMap<Pair, PairEntry> = AHashMap::new();

        for (id, seq) in store.iter() {
            for window in seq.symbols.windows(2) {
                let entry = entries.entry((window[0], window[1])).or_default();
                entry.weight += seq.weight;
                entry.sequences.insert(id);
            }
        }

        let dirty = entries.keys().copied().collect();
        Self {
            queue: PairPriorityQueue::with_capacity(entries.len()),
            entries,
            dirty,
            selection: Selection::default(),
            compact_min: COMPACT_MIN,
        }
    }

    /// Set the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    #[cfg(test)]
    fn with_compact_min(mut self, compact_min: usize) -> Self {
        self.compact_min = compact_min;
        self
    }

    /// The selection strategy in use.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The pair with maximum weight, with its weight.
    ///
    /// Ties go to the pair whose symbol texts are lexicographically smallest
    /// (left text first, then right text), which keeps training reproducible.
    pub fn peek_best(&mut self, symbols: &SymbolTable) -> Option<(Pair, u64)> {
        match self.selection {
            Selection::Heap => self.peek_best_heap(symbols),
            Selection::Scan => self.peek_best_scan(symbols),
        }
    }

    fn peek_best_heap(&mut self, symbols: &SymbolTable) -> Option<(Pair, u64)> {
        self.refresh_queue(symbols);

        let entries = &self.entries;
        self.queue
            .peek_valid(|pair| entries.get(&pair).map(|e| e.weight))
            .map(|c| (c.pair, c.weight))
    }

    fn peek_best_scan(&self, symbols: &SymbolTable) -> Option<(Pair, u64)> {
        self.entries
            .iter()
            .map(|(&pair, entry)| (pair, entry.weight))
            .max_by(|&a, &b| rank_pairs(symbols, a, b))
    }

    /// Push fresh candidates for changed pairs, compacting if the heap is
    /// mostly stale.
    fn refresh_queue(&mut self, symbols: &SymbolTable) {
        if self.queue.len() >= self.compact_min
            && self.queue.len() + self.dirty.len() > COMPACT_RATIO * self.entries.len()
        {
            self.dirty.clear();
            self.queue.rebuild(
                self.entries
                    .iter()
                    .map(|(&pair, e)| MergeCandidate::new(pair, e.weight, symbols)),
            );
            return;
        }

        for pair in self.dirty.drain() {
            if let Some(entry) = self.entries.get(&pair) {
                self.queue
                    .push(MergeCandidate::new(pair, entry.weight, symbols));
            }
        }
    }

    /// Delete a pair's entry entirely.
    pub fn remove(&mut self, pair: Pair) -> Option<PairEntry> {
        self.dirty.remove(&pair);
        self.entries.remove(&pair)
    }

    /// Apply a signed weight change for one sequence.
    ///
    /// `now_present` says whether `sequence_id` still contains the pair after
    /// the change. An entry whose weight drops to zero or below is deleted.
    pub fn adjust(&mut self, pair: Pair, delta: i128, sequence_id: SequenceId, now_present: bool) {
        let entry = self.entries.entry(pair).or_default();
        let weight = i128::from(entry.weight) + delta;
        debug_assert!(weight >= 0, "pair {:?} weight went negative", pair);

        if weight <= 0 {
            self.entries.remove(&pair);
            self.dirty.remove(&pair);
            return;
        }

        entry.weight = u64::try_from(weight).unwrap_or(u64::MAX);
        if now_present {
            entry.sequences.insert(sequence_id);
        } else {
            entry.sequences.remove(&sequence_id);
        }
        if delta != 0 {
            self.dirty.insert(pair);
        }
    }

    /// Get the entry for a pair.
    #[inline]
    pub fn get(&self, pair: Pair) -> Option<&PairEntry> {
        self.entries.get(&pair)
    }

    /// Get the weight of a pair (0 when absent).
    #[inline]
    pub fn weight(&self, pair: Pair) -> u64 {
        self.entries.get(&pair).map_or(0, |e| e.weight)
    }

    /// Sequences containing a pair, in ascending ID order.
    pub fn sequences_of(&self, pair: Pair) -> Vec<SequenceId> {
        let mut ids: Vec<SequenceId> = self
            .entries
            .get(&pair)
            .map(|e| e.sequences.iter().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    /// Number of distinct live pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no pair is left.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over live entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Pair, &PairEntry)> {
        self.entries.iter().map(|(&pair, e)| (pair, e))
    }

    /// Number of queued (possibly stale) heap candidates.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

/// Indexes are equal when they hold the same weights and occurrence sets;
/// queue contents and selection strategy are ignored.
impl PartialEq for PairIndex {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for PairIndex {}

/// Order two `(pair, weight)` selections the way [`PairIndex::peek_best`]
/// ranks them: greater means preferred.
pub fn rank_pairs(symbols: &SymbolTable, a: (Pair, u64), b: (Pair, u64)) -> Ordering {
    a.1.cmp(&b.1).then_with(|| symbols.cmp_pairs(b.0, a.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpetrain_core::DEFAULT_END_OF_WORD;

    fn setup(words: &[(&str, u64)]) -> (SequenceStore, SymbolTable) {
        let mut symbols = SymbolTable::new();
        let store =
            SequenceStore::initialize(words.iter().copied(), &mut symbols, DEFAULT_END_OF_WORD)
                .unwrap();
        (store, symbols)
    }

    fn pair(symbols: &SymbolTable, a: &str, b: &str) -> Pair {
        (symbols.get_id(a).unwrap(), symbols.get_id(b).unwrap())
    }

    #[test]
    fn test_build_counts_weighted_occurrences() {
        let (store, symbols) = setup(&[("aaab", 1)]);
        let index = PairIndex::build(&store);

        assert_eq!(index.len(), 3);
        assert_eq!(index.weight(pair(&symbols, "a", "a")), 2);
        assert_eq!(index.weight(pair(&symbols, "a", "b")), 1);
        assert_eq!(index.weight(pair(&symbols, "b", "§")), 1);
    }

    #[test]
    fn test_build_occurrence_sets() {
        let (store, symbols) = setup(&[("ab", 3), ("ba", 2), ("abab", 1)]);
        let index = PairIndex::build(&store);

        let ab = pair(&symbols, "a", "b");
        assert_eq!(index.weight(ab), 3 + 2);
        assert_eq!(index.sequences_of(ab), vec![0, 2]);

        let ba = pair(&symbols, "b", "a");
        assert_eq!(index.weight(ba), 2 + 1);
        assert_eq!(index.sequences_of(ba), vec![1, 2]);
    }

    #[test]
    fn test_peek_best_by_weight() {
        let (store, symbols) = setup(&[("ab", 3), ("ba", 2)]);
        let mut index = PairIndex::build(&store);

        // (a,b)=3 and (b,§)=3 tie; "a" < "b" so (a,b) wins
        assert_eq!(
            index.peek_best(&symbols),
            Some((pair(&symbols, "a", "b"), 3))
        );
    }

    #[test]
    fn test_heap_and_scan_agree_on_ties() {
        let (store, symbols) = setup(&[("xy", 1), ("ab", 1), ("ba", 1)]);

        let mut heap = PairIndex::build(&store);
        let mut scan = PairIndex::build(&store).with_selection(Selection::Scan);

        // Every pair weighs 1; ("a", "b") is the smallest by text
        let expected = Some((pair(&symbols, "a", "b"), 1));
        assert_eq!(heap.peek_best(&symbols), expected);
        assert_eq!(scan.peek_best(&symbols), expected);
    }

    #[test]
    fn test_peek_best_empty() {
        let (store, symbols) = setup(&[]);
        let mut index = PairIndex::build(&store);

        assert!(index.is_empty());
        assert_eq!(index.peek_best(&symbols), None);
    }

    #[test]
    fn test_adjust_updates_weight_and_membership() {
        let (store, symbols) = setup(&[("ab", 3), ("ab", 2)]);
        let mut index = PairIndex::build(&store);
        let ab = pair(&symbols, "a", "b");

        index.adjust(ab, -3, 0, false);
        assert_eq!(index.weight(ab), 2);
        assert_eq!(index.sequences_of(ab), vec![1]);

        index.adjust(ab, 4, 0, true);
        assert_eq!(index.weight(ab), 6);
        assert_eq!(index.sequences_of(ab), vec![0, 1]);
    }

    #[test]
    fn test_adjust_to_zero_removes_entry() {
        let (store, symbols) = setup(&[("ab", 3)]);
        let mut index = PairIndex::build(&store);
        let ab = pair(&symbols, "a", "b");

        index.adjust(ab, -3, 0, false);
        assert!(index.get(ab).is_none());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_adjust_creates_entry() {
        let (store, mut symbols) = setup(&[("ab", 3)]);
        let mut index = PairIndex::build(&store);
        let x = symbols.intern("ab");
        let marker = symbols.get_id("§").unwrap();

        index.adjust((x, marker), 3, 0, true);
        let entry = index.get((x, marker)).unwrap();
        assert_eq!(entry.weight, 3);
        assert!(entry.sequences.contains(&0));
    }

    #[test]
    fn test_heap_sees_adjusted_weights() {
        let (store, symbols) = setup(&[("ab", 3), ("cd", 2)]);
        let mut index = PairIndex::build(&store);
        let ab = pair(&symbols, "a", "b");
        let cd = pair(&symbols, "c", "d");

        assert_eq!(index.peek_best(&symbols).map(|(p, _)| p), Some(ab));

        index.adjust(cd, 5, 1, true);
        assert_eq!(index.peek_best(&symbols), Some((cd, 7)));

        index.remove(cd);
        // (a,b) and (b,§) tie at 3
        assert_eq!(index.peek_best(&symbols), Some((ab, 3)));
    }

    #[test]
    fn test_stale_heap_is_compacted() {
        let (store, symbols) = setup(&[("ab", 3), ("cd", 2)]);
        let mut index = PairIndex::build(&store).with_compact_min(8);
        let ab = pair(&symbols, "a", "b");
        let live = index.len();

        assert_eq!(index.peek_best(&symbols), Some((ab, 3)));
        assert_eq!(index.queued(), live);

        // Every bump leaves the previous (a, b) candidate stale in the heap
        let mut peak = 0;
        for bump in 1..=40 {
            index.adjust(ab, 1, 0, true);
            assert_eq!(index.peek_best(&symbols), Some((ab, 3 + bump)));
            assert!(index.queued() <= COMPACT_RATIO * live + 1);
            peak = peak.max(index.queued());
        }
        assert!(peak >= 8, "queue never reached the compaction threshold");
        assert!(index.queued() < peak, "queue was never rebuilt");
        assert_eq!(index.weight(ab), 43);
    }

    #[test]
    fn test_adjust_large_weights() {
        let (store, symbols) = setup(&[("ab", u64::MAX - 1)]);
        let mut index = PairIndex::build(&store);
        let ab = pair(&symbols, "a", "b");

        index.adjust(ab, -i128::from(u64::MAX - 2), 0, true);
        assert_eq!(index.weight(ab), 1);
        index.adjust(ab, i128::from(u64::MAX - 1), 0, true);
        assert_eq!(index.weight(ab), u64::MAX);
    }

    #[test]
    fn test_remove() {
        let (store, symbols) = setup(&[("ab", 1)]);
        let mut index = PairIndex::build(&store);
        let ab = pair(&symbols, "a", "b");

        let removed = index.remove(ab).unwrap();
        assert_eq!(removed.weight, 1);
        assert!(index.remove(ab).is_none());
        assert_eq!(index.weight(ab), 0);
    }

    #[test]
    fn test_equality_ignores_queue_state() {
        let (store, symbols) = setup(&[("hello", 2), ("help", 1)]);
        let mut warmed = PairIndex::build(&store);
        warmed.peek_best(&symbols);
        let fresh = PairIndex::build(&store).with_selection(Selection::Scan);

        assert!(warmed.queued() > 0);
        assert_eq!(warmed, fresh);
    }

    #[test]
    fn test_rank_pairs() {
        let (_, symbols) = setup(&[("ab", 1)]);
        let ab = pair(&symbols, "a", "b");
        let bm = pair(&symbols, "b", "§");

        assert_eq!(rank_pairs(&symbols, (ab, 2), (bm, 1)), Ordering::Greater);
        assert_eq!(rank_pairs(&symbols, (ab, 1), (bm, 1)), Ordering::Greater);
        assert_eq!(rank_pairs(&symbols, (bm, 1), (ab, 1)), Ordering::Less);
    }

    #[test]
    fn test_selection_from_str() {
        assert_eq!("heap".parse::<Selection>(), Ok(Selection::Heap));
        assert_eq!("SCAN".parse::<Selection>(), Ok(Selection::Scan));
        assert!("fast".parse::<Selection>().is_err());
    }
}
