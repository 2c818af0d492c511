//! File service error types.

use thiserror::Error;

use crate::metadata::MetadataError;
use crate::storage::StorageError;

/// Errors surfaced by file service operations.
///
/// Backend errors keep their kind; the HTTP layer maps kind to status code
/// exactly once.
#[derive(Debug, Error)]
pub enum FileServiceError {
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The metadata store failed.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

impl FileServiceError {
    /// Whether this error means the requested file does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Storage(StorageError::NotFound { .. }) | Self::Metadata(MetadataError::NotFound(_))
        )
    }
}
