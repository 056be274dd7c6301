//! bpetrain-training - incremental BPE training
//!
//! This crate learns BPE merges from a `word -> count` table. The pair index
//! is built once and then repaired incrementally after each merge, so the
//! cost of a merge depends on how often the merged pair occurs rather than on
//! the size of the corpus.
//!
//! # Example
//!
//! ```rust
//! use bpetrain_training::{BpeTrainer, TrainingConfig};
//!
//! let config = TrainingConfig::builder().num_merges(2).build()?;
//! let trainer = BpeTrainer::new(config, [("aaab", 1u64)])?;
//! let vocab = trainer.train()?;
//!
//! assert_eq!(vocab.symbols().collect::<Vec<_>>(), vec!["aa", "ab"]);
//! # Ok::<(), bpetrain_training::TrainerError>(())
//! ```

pub use bpetrain_core::{Merge, Result, TrainerError, Vocabulary};

pub mod training;
pub use training::{
    BpeTrainer, PairEntry, PairIndex, Phase, Selection, StopReason, TrainingConfig,
    TrainingConfigBuilder,
};
