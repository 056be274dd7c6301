//! Corpus input and vocabulary output.

pub mod read;
pub mod save;
pub mod summary;

pub use read::{CorpusReader, ReadConfig, STDIO_PATH};
pub use save::VocabularyWriter;
pub use summary::TrainingSummary;
