//! The learned vocabulary.
//!
//! Training appends one [`Merge`] per completed merge step. The order is the
//! merge priority a tokenizer would apply, so it is never re-sorted.

use super::symbols::Symbol;

/// A completed merge: `left + right -> symbol`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merge {
    /// Left input symbol
    pub left: Symbol,
    /// Right input symbol
    pub right: Symbol,
    /// The composite symbol created by this merge
    pub symbol: Symbol,
    /// Corpus-wide weight of the pair when it was selected
    pub weight: u64,
}

impl Merge {
    /// Create a merge record; the composite symbol is `left` followed by `right`.
    pub fn new(left: &str, right: &str, weight: u64) -> Self {
        let mut symbol = Symbol::with_capacity(left.len() + right.len());
        symbol.push_str(left);
        symbol.push_str(right);
        Self {
            left: Symbol::new(left),
            right: Symbol::new(right),
            symbol,
            weight,
        }
    }
}

/// Append-only, merge-ordered list of learned symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    merges: Vec<Merge>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty vocabulary with room for `capacity` merges.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            merges: Vec::with_capacity(capacity),
        }
    }

    /// Record a merge. Its rank is its position.
    pub fn push(&mut self, merge: Merge) {
        self.merges.push(merge);
    }

    /// Get the merge with the given rank.
    #[inline]
    pub fn get(&self, rank: usize) -> Option<&Merge> {
        self.merges.get(rank)
    }

    /// The most recent merge.
    #[inline]
    pub fn last(&self) -> Option<&Merge> {
        self.merges.last()
    }

    /// Number of merges recorded.
    #[inline]
    pub fn len(&self) -> usize {
        self.merges.len()
    }

    /// Check if no merge has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    /// Iterate over merges in merge order.
    pub fn iter(&self) -> std::slice::Iter<'_, Merge> {
        self.merges.iter()
    }

    /// Composite symbols in merge order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.merges.iter().map(|m| m.symbol.as_str())
    }

    /// Consume the vocabulary, returning the merges.
    pub fn into_merges(self) -> Vec<Merge> {
        self.merges
    }
}

impl<'a> IntoIterator for &'a Vocabulary {
    type Item = &'a Merge;
    type IntoIter = std::slice::Iter<'a, Merge>;

    fn into_iter(self) -> Self::IntoIter {
        self.merges.iter()
    }
}
