//! bpetrain-core - data model for incremental BPE training
//!
//! This crate holds the pieces of BPE training that are pure state: interned
//! symbols, the per-word sequence store, the priority queue used to pick the
//! best pair, and the ordered vocabulary that training produces.
//!
//! # Example
//!
//! ```rust
//! use bpetrain_core::{SequenceStore, SymbolTable};
//!
//! let mut symbols = SymbolTable::new();
//! let store = SequenceStore::initialize([("low", 5u64), ("lower", 2)], &mut symbols, "§")?;
//!
//! assert_eq!(store.len(), 2);
//! let (seq, weight) = store.get(0)?;
//! assert_eq!(symbols.render(seq), vec!["l", "o", "w", "§"]);
//! assert_eq!(weight, 5);
//! # Ok::<(), bpetrain_core::TrainerError>(())
//! ```

pub mod error;
pub use error::{Result, TrainerError};

pub mod core;
pub use core::{
    Merge, MergeCandidate, Pair, PairPriorityQueue, Sequence, SequenceId, SequenceStore, Symbol,
    SymbolId, SymbolTable, Vocabulary, DEFAULT_END_OF_WORD,
};
