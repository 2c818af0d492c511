//! Metadata backend selection.

use filedock_core::metadata::{FileRecord, MemoryStore, MetadataError, MetadataStore, RecordPatch};
use filedock_shared::FileId;

use crate::repositories::FileRecordRepository;

/// Metadata store backend, selected once at startup from configuration.
///
/// Dispatches between the in-process key-value store and the relational
/// repository so the file service can be instantiated over a single type.
#[derive(Debug)]
pub enum MetadataBackend {
    /// In-process key-value store, the default.
    Memory(MemoryStore),
    /// Postgres-backed relational store.
    Postgres(FileRecordRepository),
}

impl MetadataStore for MetadataBackend {
    fn name(&self) -> &'static str {
        match self {
            Self::Memory(store) => store.name(),
            Self::Postgres(repo) => repo.name(),
        }
    }

    async fn create(&self, record: FileRecord) -> Result<FileRecord, MetadataError> {
        match self {
            Self::Memory(store) => store.create(record).await,
            Self::Postgres(repo) => repo.create(record).await,
        }
    }

    async fn get(&self, id: FileId) -> Result<FileRecord, MetadataError> {
        match self {
            Self::Memory(store) => store.get(id).await,
            Self::Postgres(repo) => repo.get(id).await,
        }
    }

    async fn list_all(&self) -> Result<Vec<FileRecord>, MetadataError> {
        match self {
            Self::Memory(store) => store.list_all().await,
            Self::Postgres(repo) => repo.list_all().await,
        }
    }

    async fn update(&self, id: FileId, patch: RecordPatch) -> Result<FileRecord, MetadataError> {
        match self {
            Self::Memory(store) => store.update(id, patch).await,
            Self::Postgres(repo) => repo.update(id, patch).await,
        }
    }

    async fn rename(&self, id: FileId, new_id: FileId) -> Result<FileRecord, MetadataError> {
        match self {
            Self::Memory(store) => store.rename(id, new_id).await,
            Self::Postgres(repo) => repo.rename(id, new_id).await,
        }
    }

    async fn delete(&self, id: FileId) -> Result<(), MetadataError> {
        match self {
            Self::Memory(store) => store.delete(id).await,
            Self::Postgres(repo) => repo.delete(id).await,
        }
    }

    async fn delete_all(&self) -> Result<u64, MetadataError> {
        match self {
            Self::Memory(store) => store.delete_all().await,
            Self::Postgres(repo) => repo.delete_all().await,
        }
    }

    async fn count(&self) -> Result<u64, MetadataError> {
        match self {
            Self::Memory(store) => store.count().await,
            Self::Postgres(repo) => repo.count().await,
        }
    }

    async fn check_connection(&self) -> Result<(), MetadataError> {
        match self {
            Self::Memory(store) => store.check_connection().await,
            Self::Postgres(repo) => repo.check_connection().await,
        }
    }
}
