//! Storage backend selection and dispatch.

use filedock_shared::FileId;

use super::config::StorageProvider;
use super::error::StorageError;
use super::local::LocalStore;
use super::object::ObjectStore;

/// Storage backend, selected once at startup from configuration.
///
/// A tagged union rather than a trait object: there are exactly two variants
/// and the file service owns the only reference.
#[derive(Debug, Clone)]
pub enum Storage {
    /// Local filesystem variant.
    Local(LocalStore),
    /// Object store variant.
    Object(ObjectStore),
}

impl Storage {
    /// Build the backend described by `provider`.
    ///
    /// The local variant creates its directories; object variants validate
    /// their builder configuration. No network call is made here.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be initialized.
    pub async fn from_provider(provider: &StorageProvider) -> Result<Self, StorageError> {
        match provider {
            StorageProvider::Local {
                upload_dir,
                download_dir,
            } => Ok(Self::Local(
                LocalStore::create(upload_dir, download_dir).await?,
            )),
            StorageProvider::S3 { .. } | StorageProvider::AzureBlob { .. } => {
                Ok(Self::Object(ObjectStore::from_provider(provider)?))
            }
        }
    }

    /// Write the content addressed by `id`, overwriting if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` on I/O failure.
    pub async fn put(&self, id: FileId, bytes: &[u8]) -> Result<(), StorageError> {
        match self {
            Self::Local(store) => store.put(id, bytes).await,
            Self::Object(store) => store.put(id, bytes).await,
        }
    }

    /// Read the content addressed by `id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if absent, `StorageError::Read` on
    /// I/O failure.
    pub async fn get(&self, id: FileId) -> Result<Vec<u8>, StorageError> {
        match self {
            Self::Local(store) => store.get(id).await,
            Self::Object(store) => store.get(id).await,
        }
    }

    /// Check whether content exists for `id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read` if the check itself fails.
    pub async fn exists(&self, id: FileId) -> Result<bool, StorageError> {
        match self {
            Self::Local(store) => store.exists(id).await,
            Self::Object(store) => store.exists(id).await,
        }
    }

    /// Remove the content addressed by `id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if absent, `StorageError::Write` on
    /// failure to remove.
    pub async fn delete(&self, id: FileId) -> Result<(), StorageError> {
        match self {
            Self::Local(store) => store.delete(id).await,
            Self::Object(store) => store.delete(id).await,
        }
    }

    /// Move content from `old_id` to `new_id`.
    ///
    /// Atomic for the local variant; copy-then-delete for object stores.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if `old_id` is absent, or
    /// `StorageError::Write` on failure.
    pub async fn rename(&self, old_id: FileId, new_id: FileId) -> Result<(), StorageError> {
        match self {
            Self::Local(store) => store.rename(old_id, new_id).await,
            Self::Object(store) => store.rename(old_id, new_id).await,
        }
    }

    /// Externally visible location of the content for `id`.
    #[must_use]
    pub fn location(&self, id: FileId) -> String {
        match self {
            Self::Local(store) => store.upload_path(id).display().to_string(),
            Self::Object(store) => store.uri(id),
        }
    }

    /// The backend name for logging and responses.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Object(_) => "object_store",
        }
    }
}
