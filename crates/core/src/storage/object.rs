//! Object storage backend using Apache OpenDAL.
//!
//! Objects are keyed by bare `FileId`. Rename is implemented as
//! copy-then-delete-original, which is NOT atomic: a crash between the copy
//! and the delete leaves both objects present. This window is documented
//! behavior, not hidden or compensated.

use filedock_shared::FileId;
use opendal::{Operator, services};

use super::config::StorageProvider;
use super::error::StorageError;

/// Object storage backend (S3-compatible or Azure Blob).
#[derive(Debug, Clone)]
pub struct ObjectStore {
    operator: Operator,
    scheme: &'static str,
    bucket: String,
}

impl ObjectStore {
    /// Create an object store from a provider configuration.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Configuration` if the provider cannot be
    /// initialized, or if a local provider is passed here.
    pub fn from_provider(provider: &StorageProvider) -> Result<Self, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                let operator = Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish();

                Ok(Self {
                    operator,
                    scheme: "s3",
                    bucket: bucket.clone(),
                })
            }
            StorageProvider::AzureBlob {
                account,
                access_key,
                container,
            } => {
                let builder = services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container);

                let operator = Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish();

                Ok(Self {
                    operator,
                    scheme: "azblob",
                    bucket: container.clone(),
                })
            }
            StorageProvider::Local { .. } => Err(StorageError::configuration(
                "local provider is not an object store",
            )),
        }
    }

    /// The bucket or container name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// URI of the object for `id`, e.g. `s3://bucket/key`.
    #[must_use]
    pub fn uri(&self, id: FileId) -> String {
        format!("{}://{}/{}", self.scheme, self.bucket, id)
    }

    /// Write the content for `id`, overwriting any existing object.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Write` on failure.
    pub async fn put(&self, id: FileId, bytes: &[u8]) -> Result<(), StorageError> {
        let key = id.to_string();
        self.operator
            .write(&key, bytes.to_vec())
            .await
            .map(|_| ())
            .map_err(|e| StorageError::from_opendal_write(&key, &e))
    }

    /// Read the content for `id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if absent, `StorageError::Read` on
    /// failure.
    pub async fn get(&self, id: FileId) -> Result<Vec<u8>, StorageError> {
        let key = id.to_string();
        self.operator
            .read(&key)
            .await
            .map(|buf| buf.to_vec())
            .map_err(|e| StorageError::from_opendal_read(&key, &e))
    }

    /// Check whether an object exists for `id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read` if the check itself fails.
    pub async fn exists(&self, id: FileId) -> Result<bool, StorageError> {
        let key = id.to_string();
        match self.operator.stat(&key).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == opendal::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::read(e.to_string())),
        }
    }

    /// Remove the object for `id`.
    ///
    /// OpenDAL delete is idempotent, so absence is probed first to keep the
    /// not-found contract.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if absent, `StorageError::Write` on
    /// failure to remove.
    pub async fn delete(&self, id: FileId) -> Result<(), StorageError> {
        let key = id.to_string();
        self.operator
            .stat(&key)
            .await
            .map_err(|e| StorageError::from_opendal_read(&key, &e))?;

        self.operator
            .delete(&key)
            .await
            .map_err(|e| StorageError::from_opendal_write(&key, &e))
    }

    /// Rename the object from `old_id` to `new_id` as copy-then-delete.
    ///
    /// If the delete fails after a successful copy, both keys remain; no
    /// cleanup is attempted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if `old_id` is absent, or
    /// `StorageError::Write` on failure.
    pub async fn rename(&self, old_id: FileId, new_id: FileId) -> Result<(), StorageError> {
        let old_key = old_id.to_string();
        let new_key = new_id.to_string();

        self.operator
            .copy(&old_key, &new_key)
            .await
            .map_err(|e| StorageError::from_opendal_write(&old_key, &e))?;

        self.operator
            .delete(&old_key)
            .await
            .map_err(|e| StorageError::from_opendal_write(&old_key, &e))
    }
}
