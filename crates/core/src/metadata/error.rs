//! Metadata store error types.

use filedock_shared::FileId;
use thiserror::Error;

/// Metadata store operation errors.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// No record exists for the requested id.
    #[error("file record not found: {0}")]
    NotFound(FileId),

    /// A record already exists for the id being created.
    #[error("file record already exists: {0}")]
    Duplicate(FileId),

    /// Failure while reading from the store.
    #[error("metadata read failed: {0}")]
    Read(String),

    /// Failure while writing to the store.
    #[error("metadata write failed: {0}")]
    Write(String),

    /// The store is unreachable.
    #[error("metadata store connection failed: {0}")]
    Connection(String),
}

impl MetadataError {
    /// Create a read error.
    #[must_use]
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    /// Create a write error.
    #[must_use]
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }
}
