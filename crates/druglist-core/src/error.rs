//! Error type for the ingestion pipeline and the drug store.
//!
//! Invalid individual records are *not* errors: they are filtered out and
//! reported through [`IngestReport`](crate::IngestReport). Only source-level
//! and storage-level failures surface here.

use thiserror::Error;

/// Result alias used throughout druglist-core.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures that abort an ingestion run or a store operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The ingestion source is not parseable JSON.
    #[error("malformed input: not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The payload is neither an array nor an object with a `drugs` or
    /// `data` array.
    #[error("malformed input: could not find an array of drugs (expected a bare array, `drugs` or `data`)")]
    NoRecordArray,

    /// SQLite failed to open, read or write.
    #[error("storage unavailable: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The connection lock was poisoned by a panic in another thread.
    #[error("storage unavailable: connection lock poisoned")]
    StorageLock,

    /// Reading an ingestion source from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// `true` for failures caused by the shape or syntax of the input.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Error::InvalidJson(_) | Error::NoRecordArray)
    }

    /// `true` for failures of the persistence medium.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::StorageLock)
    }
}
