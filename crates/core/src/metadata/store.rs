//! Metadata store trait.

use filedock_shared::FileId;

use super::error::MetadataError;
use super::types::{FileRecord, RecordPatch};

/// Persistence trait for file records.
///
/// Implemented by [`super::MemoryStore`] (key-value) in this crate and by the
/// relational repository in `filedock-db`. Neither implementation knows about
/// byte storage; the file service owns the sequencing across the two.
pub trait MetadataStore: Send + Sync {
    /// Short backend name for logging and health reporting.
    fn name(&self) -> &'static str;

    /// Create a new record. Fails with `Duplicate` if the id already exists.
    fn create(
        &self,
        record: FileRecord,
    ) -> impl std::future::Future<Output = Result<FileRecord, MetadataError>> + Send;

    /// Fetch the record for `id`. Fails with `NotFound` if absent.
    fn get(
        &self,
        id: FileId,
    ) -> impl std::future::Future<Output = Result<FileRecord, MetadataError>> + Send;

    /// Fetch all records. Ordering is backend-dependent; no pagination.
    fn list_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<FileRecord>, MetadataError>> + Send;

    /// Apply a partial update, bumping `modified_at`. Fails with `NotFound`
    /// if absent.
    fn update(
        &self,
        id: FileId,
        patch: RecordPatch,
    ) -> impl std::future::Future<Output = Result<FileRecord, MetadataError>> + Send;

    /// Change the primary key from `id` to `new_id`, bumping `modified_at`.
    ///
    /// The key-value variant implements this as insert-new-then-remove-old,
    /// which is not atomic.
    fn rename(
        &self,
        id: FileId,
        new_id: FileId,
    ) -> impl std::future::Future<Output = Result<FileRecord, MetadataError>> + Send;

    /// Delete the record for `id`. Fails with `NotFound` if absent.
    fn delete(
        &self,
        id: FileId,
    ) -> impl std::future::Future<Output = Result<(), MetadataError>> + Send;

    /// Delete every record, returning how many were removed.
    fn delete_all(&self)
    -> impl std::future::Future<Output = Result<u64, MetadataError>> + Send;

    /// Number of records in the store.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, MetadataError>> + Send;

    /// Probe the store connection. Used once at startup.
    fn check_connection(
        &self,
    ) -> impl std::future::Future<Output = Result<(), MetadataError>> + Send;
}
