//! Batch driver for the sightline hidden-text detector.
//!
//! Walks input files and directories, analyzes each HTML document, writes
//! one JSONL file of records per document and keeps a resume ledger of
//! finished paths. Documents that hide text can be copied aside together
//! with their records.

pub mod batch;
pub mod error;
pub mod ledger;

pub use batch::{
    BatchOptions, BatchRunner, BatchSummary, DocumentInput, DocumentOutcome, collect_documents,
};
pub use error::BatchError;
pub use ledger::{Ledger, LedgerStatus};
