//! In-process key-value metadata store.

use dashmap::DashMap;
use filedock_shared::FileId;

use super::error::MetadataError;
use super::store::MetadataStore;
use super::types::{FileRecord, RecordPatch};

/// Key-value metadata store backed by a concurrent map.
///
/// The default "local" variant; records do not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<FileId, FileRecord>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, record: FileRecord) -> Result<FileRecord, MetadataError> {
        if self.records.contains_key(&record.file_id) {
            return Err(MetadataError::Duplicate(record.file_id));
        }
        self.records.insert(record.file_id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: FileId) -> Result<FileRecord, MetadataError> {
        self.records
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or(MetadataError::NotFound(id))
    }

    async fn list_all(&self) -> Result<Vec<FileRecord>, MetadataError> {
        Ok(self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn update(&self, id: FileId, patch: RecordPatch) -> Result<FileRecord, MetadataError> {
        let mut entry = self.records.get_mut(&id).ok_or(MetadataError::NotFound(id))?;
        patch.apply(entry.value_mut());
        Ok(entry.clone())
    }

    async fn rename(&self, id: FileId, new_id: FileId) -> Result<FileRecord, MetadataError> {
        if self.records.contains_key(&new_id) {
            return Err(MetadataError::Duplicate(new_id));
        }

        let mut record = self
            .records
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or(MetadataError::NotFound(id))?;

        record.file_id = new_id;
        record.modified_at = chrono::Utc::now();

        // Overwrite-then-delete-old-key; not atomic across the two keys.
        self.records.insert(new_id, record.clone());
        self.records.remove(&id);

        Ok(record)
    }

    async fn delete(&self, id: FileId) -> Result<(), MetadataError> {
        self.records
            .remove(&id)
            .map(|_| ())
            .ok_or(MetadataError::NotFound(id))
    }

    async fn delete_all(&self) -> Result<u64, MetadataError> {
        let removed = self.records.len() as u64;
        self.records.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, MetadataError> {
        Ok(self.records.len() as u64)
    }

    async fn check_connection(&self) -> Result<(), MetadataError> {
        Ok(())
    }
}
