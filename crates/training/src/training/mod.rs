//! Training infrastructure for BPE vocabularies.
//!
//! `index` keeps pair weights and occurrence sets, `merge` rewrites a single
//! sequence, and `trainer` drives the merge loop over both.

pub mod config;
pub mod index;
pub mod merge;
pub mod trainer;

pub use config::{TrainingConfig, TrainingConfigBuilder};
pub use index::{rank_pairs, PairEntry, PairIndex, Selection};
pub use merge::{merge_pair, Rewrite};
pub use trainer::{BpeTrainer, Phase, StopReason};
