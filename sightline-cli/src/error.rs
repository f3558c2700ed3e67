//! Errors raised while processing a batch.

use std::path::PathBuf;

use thiserror::Error;

/// A failure on one document or on the ledger.
///
/// Document-level errors are logged and counted; the batch moves on.
#[derive(Error, Debug)]
pub enum BatchError {
    /// An input document could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The document.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An output or quarantine file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The file being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The ledger could not be read or appended to.
    #[error("ledger {path}: {source}")]
    Ledger {
        /// The ledger file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Records could not be encoded as JSON.
    #[error("failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),
}
