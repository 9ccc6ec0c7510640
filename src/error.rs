use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::record::RecordId;

/// Error type for record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record carries the requested ID.
    #[error("record {id} not found")]
    NotFound { id: RecordId },
    /// The backing file could not be read or written.
    #[error("storage unavailable at {}: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The backing file exists but does not hold a record array.
    #[error("corrupt record file {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
    /// Every ID up to `RecordId::MAX` is already taken.
    #[error("no record ids left to assign")]
    IdSpaceExhausted,
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

impl StoreError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::StorageUnavailable {
            path: path.into(),
            source,
        }
    }

    /// True for the one domain error; everything else is a storage failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
