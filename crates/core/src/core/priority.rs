//! Priority queue for BPE merge candidates.
//!
//! Pair weights change after every merge. Rather than updating entries in
//! place, a new candidate is pushed whenever a weight changes and old ones
//! are discarded lazily: a candidate is only trusted when its weight matches
//! the live weight the caller reports for that pair.

use super::symbols::{Pair, Symbol, SymbolTable};
use dary_heap::OctonaryHeap;
use std::cmp::Ordering;

/// A merge candidate: a pair and the weight it had when pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of symbol IDs to merge
    pub pair: Pair,
    /// Weight of the pair at push time
    pub weight: u64,
    /// Symbol texts of the pair, used for tie-breaking
    key: (Symbol, Symbol),
}

impl MergeCandidate {
    /// Create a candidate, resolving the pair's texts for tie-breaking.
    pub fn new(pair: Pair, weight: u64, symbols: &SymbolTable) -> Self {
        let (left, right) = symbols.pair_texts(pair);
        Self {
            pair,
            weight,
            key: (Symbol::new(left), Symbol::new(right)),
        }
    }
}

// Max-heap order: higher weight first; among equal weights the
// lexicographically smallest pair of texts ranks highest.
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lazily-invalidated priority queue of merge candidates.
///
/// Uses an 8-ary heap for better cache locality than a binary heap.
#[derive(Debug, Default)]
pub struct PairPriorityQueue {
    heap: OctonaryHeap<MergeCandidate>,
}

impl PairPriorityQueue {
    /// Create a new empty priority queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new priority queue with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: OctonaryHeap::with_capacity(capacity),
        }
    }

    /// Push a candidate. Older candidates for the same pair become stale.
    pub fn push(&mut self, candidate: MergeCandidate) {
        self.heap.push(candidate);
    }

    /// Peek at the best candidate that is still live.
    ///
    /// `live_weight` reports the current weight of a pair, or `None` when the
    /// pair no longer exists. Stale candidates on top of the heap are popped
    /// and dropped; the returned candidate stays queued.
    pub fn peek_valid<F>(&mut self, mut live_weight: F) -> Option<&MergeCandidate>
    where
        F: FnMut(Pair) -> Option<u64>,
    {
        while let Some(top) = self.heap.peek() {
            if live_weight(top.pair) == Some(top.weight) {
                break;
            }
            self.heap.pop();
        }
        self.heap.peek()
    }

    /// Pop the best candidate that is still live.
    pub fn pop_valid<F>(&mut self, live_weight: F) -> Option<MergeCandidate>
    where
        F: FnMut(Pair) -> Option<u64>,
    {
        self.peek_valid(live_weight)?;
        self.heap.pop()
    }

    /// Replace the contents with exactly one candidate per live pair.
    pub fn rebuild<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = MergeCandidate>,
    {
        self.heap = candidates.into_iter().collect();
    }

    /// Get the number of (potentially stale) entries in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Clear all entries from the queue.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
