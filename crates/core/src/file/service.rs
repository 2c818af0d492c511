//! File operations across storage and metadata.

use std::sync::Arc;

use filedock_shared::FileId;

use crate::metadata::{ContentKind, FileRecord, MetadataStore, RecordPatch};
use crate::storage::Storage;

use super::error::FileServiceError;
use super::types::{Download, StoredFile};

/// Orchestrates file operations over a storage backend and a metadata store.
///
/// Both halves are injected at startup and shared behind `Arc`; the service
/// itself is cheap to clone. Operations touch storage first, then metadata,
/// and stop at the first failure. There is no rollback: a failed second step
/// leaves the backends out of sync and the caller sees the error.
#[derive(Debug)]
pub struct FileService<M> {
    storage: Arc<Storage>,
    metadata: Arc<M>,
}

impl<M> Clone for FileService<M> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            metadata: Arc::clone(&self.metadata),
        }
    }
}

impl<M: MetadataStore> FileService<M> {
    /// Build a service over the given backends.
    pub fn new(storage: Arc<Storage>, metadata: Arc<M>) -> Self {
        Self { storage, metadata }
    }

    /// The storage backend name, for logging and health reporting.
    #[must_use]
    pub fn storage_name(&self) -> &'static str {
        self.storage.provider_name()
    }

    /// The metadata backend name, for logging and health reporting.
    #[must_use]
    pub fn metadata_name(&self) -> &'static str {
        self.metadata.name()
    }

    /// Store a new file under a freshly generated id and record its metadata.
    ///
    /// If the metadata insert fails the bytes remain in storage, orphaned
    /// under an id no record points to.
    ///
    /// # Errors
    ///
    /// Returns storage write errors, or metadata errors from the insert.
    pub async fn upload(
        &self,
        name: &str,
        mime: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, FileServiceError> {
        let file_id = FileId::new();

        self.storage.put(file_id, bytes).await?;

        let size = i64::try_from(bytes.len()).unwrap_or(i64::MAX);
        let record = FileRecord::new(file_id, name, ContentKind::from_mime(mime), size);
        self.metadata.create(record).await?;

        Ok(StoredFile {
            file_id,
            file_path: self.storage.location(file_id),
        })
    }

    /// Read the bytes for `id`, attaching the metadata record when present.
    ///
    /// Storage is authoritative: a missing record does not fail the download.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the bytes are absent, or storage read errors.
    pub async fn download(&self, id: FileId) -> Result<Download, FileServiceError> {
        let bytes = self.storage.get(id).await?;
        let record = self.metadata.get(id).await.ok();

        Ok(Download { bytes, record })
    }

    /// Overwrite the content for an existing file and refresh its derived
    /// metadata fields. The id and original filename are unchanged.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no content exists for `id`, storage write
    /// errors, or metadata errors from the update.
    pub async fn replace(
        &self,
        id: FileId,
        mime: &str,
        bytes: &[u8],
    ) -> Result<FileRecord, FileServiceError> {
        if !self.storage.exists(id).await? {
            return Err(crate::storage::StorageError::not_found(id.to_string()).into());
        }

        self.storage.put(id, bytes).await?;

        let size = i64::try_from(bytes.len()).unwrap_or(i64::MAX);
        let patch = RecordPatch::content(ContentKind::from_mime(mime), size);
        let record = self.metadata.update(id, patch).await?;

        Ok(record)
    }

    /// Re-key a file from `id` to `new_id` in storage, then in metadata.
    ///
    /// A metadata failure after the storage move leaves the record under the
    /// old id while the bytes live under the new one.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is absent, `Duplicate` if `new_id` already
    /// has a record, or backend errors.
    pub async fn rename(&self, id: FileId, new_id: FileId) -> Result<FileRecord, FileServiceError> {
        self.storage.rename(id, new_id).await?;
        let record = self.metadata.rename(id, new_id).await?;

        Ok(record)
    }

    /// Remove the bytes for `id`, then its metadata record.
    ///
    /// A metadata failure after the storage delete leaves a record pointing
    /// at nothing.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the bytes are absent, or backend errors.
    pub async fn delete(&self, id: FileId) -> Result<(), FileServiceError> {
        self.storage.delete(id).await?;
        self.metadata.delete(id).await?;

        Ok(())
    }

    /// Fetch the metadata record for `id`. Storage is not consulted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record exists.
    pub async fn record(&self, id: FileId) -> Result<FileRecord, FileServiceError> {
        Ok(self.metadata.get(id).await?)
    }

    /// Fetch every metadata record.
    ///
    /// # Errors
    ///
    /// Returns metadata read errors.
    pub async fn records(&self) -> Result<Vec<FileRecord>, FileServiceError> {
        Ok(self.metadata.list_all().await?)
    }

    /// Number of metadata records.
    ///
    /// # Errors
    ///
    /// Returns metadata read errors.
    pub async fn record_count(&self) -> Result<u64, FileServiceError> {
        Ok(self.metadata.count().await?)
    }

    /// Delete the metadata record for `id` without touching storage. The
    /// bytes, if any, are orphaned.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record exists.
    pub async fn delete_record(&self, id: FileId) -> Result<(), FileServiceError> {
        Ok(self.metadata.delete(id).await?)
    }

    /// Delete every metadata record without touching storage, returning how
    /// many were removed.
    ///
    /// # Errors
    ///
    /// Returns metadata write errors.
    pub async fn delete_all_records(&self) -> Result<u64, FileServiceError> {
        Ok(self.metadata.delete_all().await?)
    }

    /// Probe the metadata store connection.
    ///
    /// # Errors
    ///
    /// Returns `Connection` if the probe fails.
    pub async fn check_metadata_connection(&self) -> Result<(), FileServiceError> {
        Ok(self.metadata.check_connection().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{MemoryStore, MetadataError};
    use crate::storage::StorageProvider;
    use tempfile::TempDir;

    async fn service_with_dirs() -> (FileService<MemoryStore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let provider =
            StorageProvider::local(dir.path().join("uploads"), dir.path().join("downloads"));
        let storage = Storage::from_provider(&provider).await.unwrap();

        let service = FileService::new(Arc::new(storage), Arc::new(MemoryStore::new()));
        (service, dir)
    }

    /// Metadata store where every write fails. Reads delegate nowhere.
    struct FailingMetadata;

    impl MetadataStore for FailingMetadata {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn create(&self, _record: FileRecord) -> Result<FileRecord, MetadataError> {
            Err(MetadataError::write("insert failed"))
        }

        async fn get(&self, id: FileId) -> Result<FileRecord, MetadataError> {
            Err(MetadataError::NotFound(id))
        }

        async fn list_all(&self) -> Result<Vec<FileRecord>, MetadataError> {
            Err(MetadataError::read("select failed"))
        }

        async fn update(&self, _id: FileId, _patch: RecordPatch) -> Result<FileRecord, MetadataError> {
            Err(MetadataError::write("update failed"))
        }

        async fn rename(&self, _id: FileId, _new_id: FileId) -> Result<FileRecord, MetadataError> {
            Err(MetadataError::write("rename failed"))
        }

        async fn delete(&self, _id: FileId) -> Result<(), MetadataError> {
            Err(MetadataError::write("delete failed"))
        }

        async fn delete_all(&self) -> Result<u64, MetadataError> {
            Err(MetadataError::write("delete failed"))
        }

        async fn count(&self) -> Result<u64, MetadataError> {
            Err(MetadataError::read("count failed"))
        }

        async fn check_connection(&self) -> Result<(), MetadataError> {
            Err(MetadataError::connection("unreachable"))
        }
    }

    async fn failing_service(dir: &TempDir) -> FileService<FailingMetadata> {
        let provider =
            StorageProvider::local(dir.path().join("uploads"), dir.path().join("downloads"));
        let storage = Storage::from_provider(&provider).await.unwrap();
        FileService::new(Arc::new(storage), Arc::new(FailingMetadata))
    }

    #[tokio::test]
    async fn test_backend_names() {
        let (service, _dir) = service_with_dirs().await;
        assert_eq!(service.storage_name(), "local");
        assert_eq!(service.metadata_name(), "memory");
    }

    #[tokio::test]
    async fn test_upload_stores_bytes_and_record() {
        let (service, _dir) = service_with_dirs().await;

        let stored = service
            .upload("test.txt", "text/plain", b"test content1")
            .await
            .unwrap();

        assert!(stored.file_path.ends_with(&stored.file_id.to_string()));

        let record = service.record(stored.file_id).await.unwrap();
        assert_eq!(record.name, "test.txt");
        assert_eq!(record.content_kind, ContentKind::Text);
        assert_eq!(record.size, 13);
        assert_eq!(record.created_at, record.modified_at);
    }

    #[tokio::test]
    async fn test_uploads_get_distinct_ids() {
        let (service, _dir) = service_with_dirs().await;

        let first = service.upload("a.txt", "text/plain", b"a").await.unwrap();
        let second = service.upload("a.txt", "text/plain", b"a").await.unwrap();

        assert_ne!(first.file_id, second.file_id);
        assert_eq!(service.record_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_download_returns_bytes_and_record() {
        let (service, _dir) = service_with_dirs().await;
        let stored = service
            .upload("pic.png", "image/png", b"not really a png")
            .await
            .unwrap();

        let download = service.download(stored.file_id).await.unwrap();
        assert_eq!(download.bytes, b"not really a png");

        let record = download.record.unwrap();
        assert_eq!(record.content_kind, ContentKind::Image);
    }

    #[tokio::test]
    async fn test_download_missing_is_not_found() {
        let (service, _dir) = service_with_dirs().await;

        let err = service.download(FileId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_download_without_record_still_serves_bytes() {
        let (service, _dir) = service_with_dirs().await;
        let stored = service.upload("a.txt", "text/plain", b"abc").await.unwrap();

        service.delete_record(stored.file_id).await.unwrap();

        let download = service.download(stored.file_id).await.unwrap();
        assert_eq!(download.bytes, b"abc");
        assert!(download.record.is_none());
    }

    #[tokio::test]
    async fn test_replace_updates_content_and_derived_fields() {
        let (service, _dir) = service_with_dirs().await;
        let stored = service.upload("doc.txt", "text/plain", b"v1").await.unwrap();
        let original = service.record(stored.file_id).await.unwrap();

        let record = service
            .replace(stored.file_id, "application/pdf", b"v2 longer")
            .await
            .unwrap();

        assert_eq!(record.name, "doc.txt");
        assert_eq!(record.content_kind, ContentKind::Application);
        assert_eq!(record.size, 9);
        assert_eq!(record.created_at, original.created_at);
        assert!(record.modified_at >= original.modified_at);

        let download = service.download(stored.file_id).await.unwrap();
        assert_eq!(download.bytes, b"v2 longer");
    }

    #[tokio::test]
    async fn test_replace_missing_is_not_found() {
        let (service, _dir) = service_with_dirs().await;

        let err = service
            .replace(FileId::new(), "text/plain", b"x")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_rename_moves_both_backends() {
        let (service, _dir) = service_with_dirs().await;
        let stored = service.upload("a.txt", "text/plain", b"abc").await.unwrap();
        let new_id = FileId::new();

        let record = service.rename(stored.file_id, new_id).await.unwrap();
        assert_eq!(record.file_id, new_id);
        assert_eq!(record.name, "a.txt");

        assert_eq!(service.download(new_id).await.unwrap().bytes, b"abc");
        assert!(service.download(stored.file_id).await.unwrap_err().is_not_found());
        assert!(service.record(stored.file_id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_rename_missing_is_not_found() {
        let (service, _dir) = service_with_dirs().await;

        let err = service.rename(FileId::new(), FileId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_removes_both_backends() {
        let (service, _dir) = service_with_dirs().await;
        let stored = service.upload("a.txt", "text/plain", b"abc").await.unwrap();

        service.delete(stored.file_id).await.unwrap();

        assert!(service.download(stored.file_id).await.unwrap_err().is_not_found());
        assert!(service.record(stored.file_id).await.unwrap_err().is_not_found());
        assert_eq!(service.record_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (service, _dir) = service_with_dirs().await;

        let err = service.delete(FileId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_failed_metadata_insert_orphans_bytes() {
        let dir = TempDir::new().unwrap();
        let service = failing_service(&dir).await;

        let err = service
            .upload("a.txt", "text/plain", b"orphan")
            .await
            .unwrap_err();
        assert!(matches!(err, FileServiceError::Metadata(_)));

        // The storage write already happened and is not rolled back.
        let entries: Vec<_> = std::fs::read_dir(dir.path().join("uploads"))
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_metadata_delete_leaves_dangling_record() {
        let dir = TempDir::new().unwrap();
        let service = failing_service(&dir).await;

        let id = FileId::new();
        std::fs::write(dir.path().join("uploads").join(id.to_string()), b"x").unwrap();

        let err = service.delete(id).await.unwrap_err();
        assert!(matches!(err, FileServiceError::Metadata(_)));

        // Bytes are gone even though the record delete failed.
        assert!(service.download(id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_records_and_delete_all_records() {
        let (service, _dir) = service_with_dirs().await;
        service.upload("a.txt", "text/plain", b"a").await.unwrap();
        let kept = service.upload("b.txt", "text/plain", b"b").await.unwrap();

        assert_eq!(service.records().await.unwrap().len(), 2);
        assert_eq!(service.delete_all_records().await.unwrap(), 2);
        assert_eq!(service.record_count().await.unwrap(), 0);

        // delete_all_records never touches storage.
        assert!(service.download(kept.file_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_check_metadata_connection() {
        let (service, _dir) = service_with_dirs().await;
        service.check_metadata_connection().await.unwrap();

        let dir = TempDir::new().unwrap();
        let failing = failing_service(&dir).await;
        let err = failing.check_metadata_connection().await.unwrap_err();
        assert!(matches!(
            err,
            FileServiceError::Metadata(MetadataError::Connection(_))
        ));
    }
}
