//! Corpus handling for bpetrain.
//!
//! Reads raw text, turns it into a `word -> count` table for the trainer,
//! and writes the learned vocabulary back out.
//!
//! ```
//! use bpetrain_corpus::{PreprocessConfig, Preprocessor};
//!
//! let pre = Preprocessor::new(PreprocessConfig {
//!     lowercase: true,
//!     ..Default::default()
//! });
//! let counts = pre.count_words("The cat\nthe dog");
//! assert_eq!(counts.get("the"), 2);
//! ```

pub mod io;
pub mod preprocess;

pub use bpetrain_core::{Result, TrainerError};
pub use io::{CorpusReader, ReadConfig, TrainingSummary, VocabularyWriter, STDIO_PATH};
pub use preprocess::{
    NormalizationForm, Normalizer, PreprocessConfig, Preprocessor, WordCounts, WordSplitter,
};
