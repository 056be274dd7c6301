//! Merging a pair within one sequence.

use bpetrain_core::{Pair, SymbolId};

/// Result of rewriting one sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The sequence after the merge
    pub symbols: Vec<SymbolId>,
    /// Unweighted pair occurrence changes, one entry per boundary touched
    pub changes: Vec<(Pair, i64)>,
    /// Number of positions merged
    pub merged: usize,
}

/// Merge every non-overlapping occurrence of `pair` into `new_symbol`.
///
/// The scan runs left to right, takes the leftmost match and resumes after
/// it, so `a a a` merging `(a, a)` yields `aa a`. For each merge position the
/// returned changes remove the merged occurrence and the old boundary pairs
/// and add the new ones. The left neighbour is read from the already
/// rewritten output, which keeps chained merges (`a b a b`) exact.
pub fn merge_pair(symbols: &[SymbolId], pair: Pair, new_symbol: SymbolId) -> Rewrite {
    let (a, b) = pair;
    let mut out = Vec::with_capacity(symbols.len());
    let mut changes = Vec::new();
    let mut merged = 0;
    let mut i = 0;

    while i < symbols.len() {
        if i + 1 < symbols.len() && symbols[i] == a && symbols[i + 1] == b {
            changes.push((pair, -1));

            if let Some(&left) = out.last() {
                changes.push(((left, a), -1));
                changes.push(((left, new_symbol), 1));
            }
            if let Some(&right) = symbols.get(i + 2) {
                changes.push(((b, right), -1));
                changes.push(((new_symbol, right), 1));
            }

            out.push(new_symbol);
            merged += 1;
            i += 2;
        } else {
            out.push(symbols[i]);
            i += 1;
        }
    }

    Rewrite {
        symbols: out,
        changes,
        merged,
    }
}
