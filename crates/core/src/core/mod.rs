//! Core data structures for BPE training.
//!
//! Symbols are interned once and referred to by id everywhere else; sequences
//! and pairs are built from those ids.

pub mod priority;
pub mod sequence;
pub mod symbols;
pub mod vocab;

pub use priority::{MergeCandidate, PairPriorityQueue};
pub use sequence::{Sequence, SequenceId, SequenceStore, DEFAULT_END_OF_WORD};
pub use symbols::{Pair, Symbol, SymbolId, SymbolTable};
pub use vocab::{Merge, Vocabulary};
