//! CLI commands for bpetrain.

pub mod train;

pub use train::TrainCommand;
