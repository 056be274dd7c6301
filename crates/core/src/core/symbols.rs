//! Symbol interning.
//!
//! Every symbol text (a single character, the end-of-word marker, or a merged
//! composite) is stored once in a [`SymbolTable`] and referred to by a dense
//! [`SymbolId`]. Symbols are never mutated; a merge interns a new one.

use crate::error::{Result, TrainerError};
use ahash::AHashMap;
use compact_str::CompactString;
use std::cmp::Ordering;

/// Interned symbol identifier.
pub type SymbolId = u32;

/// Symbol text.
pub type Symbol = CompactString;

/// An ordered pair of adjacent symbols.
pub type Pair = (SymbolId, SymbolId);

/// Bidirectional symbol text <-> id mapping.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    /// Forward mapping: text -> ID
    ids: AHashMap<Symbol, SymbolId>,
    /// Reverse mapping: ID -> text, indexed by ID
    texts: Vec<Symbol>,
}

impl SymbolTable {
    /// Create an empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a symbol table with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: AHashMap::with_capacity(capacity),
            texts: Vec::with_capacity(capacity),
        }
    }

    /// Intern a symbol, returning its ID.
    ///
    /// Interning the same text twice returns the same ID.
    pub fn intern(&mut self, text: &str) -> SymbolId {
        if let Some(&id) = self.ids.get(text) {
            return id;
        }

        let id = self.texts.len() as SymbolId;
        let text = CompactString::new(text);
        self.texts.push(text.clone());
        self.ids.insert(text, id);
        id
    }

    /// Intern the concatenation of two existing symbols.
    pub fn concat(&mut self, left: SymbolId, right: SymbolId) -> Result<SymbolId> {
        let mut merged = CompactString::new(self.try_text(left)?);
        merged.push_str(self.try_text(right)?);
        Ok(self.intern(&merged))
    }

    /// Get the ID of an already interned symbol.
    #[inline]
    pub fn get_id(&self, text: &str) -> Option<SymbolId> {
        self.ids.get(text).copied()
    }

    /// Get the text of a symbol.
    #[inline]
    pub fn get(&self, id: SymbolId) -> Option<&str> {
        self.texts.get(id as usize).map(|s| s.as_str())
    }

    /// Get the text of a symbol, failing on unknown IDs.
    pub fn try_text(&self, id: SymbolId) -> Result<&str> {
        self.get(id).ok_or(TrainerError::UnknownSymbol(id))
    }

    /// Text of a symbol known to be interned in this table.
    ///
    /// IDs handed out by this table are never invalidated, so a miss means
    /// the ID came from a different table; it renders as the empty string.
    #[inline]
    pub fn text(&self, id: SymbolId) -> &str {
        self.get(id).unwrap_or("")
    }

    /// Render a symbol sequence as texts.
    pub fn render(&self, ids: &[SymbolId]) -> Vec<&str> {
        ids.iter().map(|&id| self.text(id)).collect()
    }

    /// Texts of both halves of a pair.
    pub fn pair_texts(&self, pair: Pair) -> (&str, &str) {
        (self.text(pair.0), self.text(pair.1))
    }

    /// Lexicographic ordering of two pairs by their symbol texts.
    ///
    /// This is the tie-break order between pairs of equal weight: the pair
    /// with the smaller left text wins, then the smaller right text.
    pub fn cmp_pairs(&self, a: Pair, b: Pair) -> Ordering {
        self.pair_texts(a).cmp(&self.pair_texts(b))
    }

    /// Number of interned symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Check if no symbol has been interned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Iterate over `(id, text)` in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &str)> {
        self.texts
            .iter()
            .enumerate()
            .map(|(id, text)| (id as SymbolId, text.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern() {
        let mut symbols = SymbolTable::new();
        let a = symbols.intern("a");
        let b = symbols.intern("b");

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(symbols.get_id("a"), Some(0));
        assert_eq!(symbols.get(1), Some("b"));
        assert_eq!(symbols.get(2), None);
    }

    #[test]
    fn test_intern_duplicate() {
        let mut symbols = SymbolTable::new();
        let first = symbols.intern("th");
        let second = symbols.intern("th");

        assert_eq!(first, second);
        assert_eq!(symbols.len(), 1);
    }

    #[test]
    fn test_concat() {
        let mut symbols = SymbolTable::new();
        let t = symbols.intern("t");
        let h = symbols.intern("h");
        let th = symbols.concat(t, h).unwrap();

        assert_eq!(symbols.get(th), Some("th"));
        // Concatenating again must not create a second entry
        assert_eq!(symbols.concat(t, h).unwrap(), th);
        assert!(matches!(
            symbols.concat(t, 99),
            Err(TrainerError::UnknownSymbol(99))
        ));
    }

    #[test]
    fn test_cmp_pairs_uses_text_not_ids() {
        let mut symbols = SymbolTable::new();
        // Intern in reverse lexical order so ID order disagrees with text order
        let aa = symbols.intern("aa");
        let a = symbols.intern("a");
        let b = symbols.intern("b");

        assert_eq!(symbols.cmp_pairs((a, b), (aa, a)), Ordering::Less);
        assert_eq!(symbols.cmp_pairs((aa, a), (a, b)), Ordering::Greater);
        assert_eq!(symbols.cmp_pairs((a, b), (a, b)), Ordering::Equal);
    }
}
