//! Local filesystem storage backend.
//!
//! Files are stored under their bare `FileId` with no extension. Uploads and
//! downloads use separate directories: a download first copies the bytes from
//! the upload directory into the download-staging directory and then serves
//! the staged copy. That produces a second durable copy per download, which
//! is a deliberate simplification carried over from the original design.

use std::path::{Path, PathBuf};

use filedock_shared::FileId;
use tokio::fs;

use super::error::StorageError;

/// Local filesystem storage with separate upload and download directories.
#[derive(Debug, Clone)]
pub struct LocalStore {
    upload_dir: PathBuf,
    download_dir: PathBuf,
}

impl LocalStore {
    /// Create the store, making both directories if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` if a directory cannot be created.
    pub async fn create(
        upload_dir: impl Into<PathBuf>,
        download_dir: impl Into<PathBuf>,
    ) -> Result<Self, StorageError> {
        let upload_dir = upload_dir.into();
        let download_dir = download_dir.into();

        fs::create_dir_all(&upload_dir)
            .await
            .map_err(|e| StorageError::write(e.to_string()))?;
        fs::create_dir_all(&download_dir)
            .await
            .map_err(|e| StorageError::write(e.to_string()))?;

        Ok(Self {
            upload_dir,
            download_dir,
        })
    }

    /// Path of the stored bytes for `id` in the upload directory.
    #[must_use]
    pub fn upload_path(&self, id: FileId) -> PathBuf {
        self.upload_dir.join(id.to_string())
    }

    /// Path of the staged download copy for `id`.
    #[must_use]
    pub fn download_path(&self, id: FileId) -> PathBuf {
        self.download_dir.join(id.to_string())
    }

    /// The configured upload directory.
    #[must_use]
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Write the content for `id`, overwriting any existing object.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` on I/O failure.
    pub async fn put(&self, id: FileId, bytes: &[u8]) -> Result<(), StorageError> {
        fs::write(self.upload_path(id), bytes)
            .await
            .map_err(|e| StorageError::write(e.to_string()))
    }

    /// Read the content for `id`, staging a copy in the download directory
    /// first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no object exists for `id`, or
    /// `StorageError::Read` on I/O failure.
    pub async fn get(&self, id: FileId) -> Result<Vec<u8>, StorageError> {
        let source = self.upload_path(id);
        let staged = self.download_path(id);
        let key = id.to_string();

        fs::copy(&source, &staged)
            .await
            .map_err(|e| StorageError::from_io_read(&key, &e))?;

        fs::read(&staged)
            .await
            .map_err(|e| StorageError::from_io_read(&key, &e))
    }

    /// Check whether an object exists for `id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read` if the check itself fails.
    pub async fn exists(&self, id: FileId) -> Result<bool, StorageError> {
        fs::try_exists(self.upload_path(id))
            .await
            .map_err(|e| StorageError::read(e.to_string()))
    }

    /// Remove the object for `id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if absent, or `StorageError::Write`
    /// on failure to remove.
    pub async fn delete(&self, id: FileId) -> Result<(), StorageError> {
        let key = id.to_string();
        fs::remove_file(self.upload_path(id))
            .await
            .map_err(|e| StorageError::from_io_write(&key, &e))
    }

    /// Rename the object from `old_id` to `new_id`.
    ///
    /// Filesystem rename is atomic; there is no window where both names
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if `old_id` is absent, or
    /// `StorageError::Write` on failure.
    pub async fn rename(&self, old_id: FileId, new_id: FileId) -> Result<(), StorageError> {
        let key = old_id.to_string();
        fs::rename(self.upload_path(old_id), self.upload_path(new_id))
            .await
            .map_err(|e| StorageError::from_io_write(&key, &e))
    }
}
