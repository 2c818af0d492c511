//! File service result types.

use filedock_shared::FileId;

use crate::metadata::FileRecord;

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Generated file identifier.
    pub file_id: FileId,
    /// Externally visible location of the stored bytes.
    pub file_path: String,
}

/// Result of a successful download.
#[derive(Debug, Clone)]
pub struct Download {
    /// The stored payload.
    pub bytes: Vec<u8>,
    /// The metadata record, when one exists. Storage is authoritative for
    /// downloads; a missing record does not fail the operation.
    pub record: Option<FileRecord>,
}
