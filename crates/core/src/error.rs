//! Error types for the BPE trainer.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::{SequenceId, SymbolId};

/// Main error type for the trainer libraries.
///
/// The merge loop itself never fails; these variants cover configuration,
/// lookups by id, and the I/O around training.
#[derive(Error, Debug)]
pub enum TrainerError {
    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown sequence ID
    #[error("Unknown sequence ID: {0}")]
    UnknownSequence(SequenceId),

    /// Unknown symbol ID
    #[error("Unknown symbol ID: {0}")]
    UnknownSymbol(SymbolId),
}

impl TrainerError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            err,
        }
    }
}

/// Result type alias for trainer operations.
pub type Result<T> = std::result::Result<T, TrainerError>;
