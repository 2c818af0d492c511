//! Storage error types.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No object exists for the requested key.
    #[error("file not found in storage: {key}")]
    NotFound {
        /// Storage key that was not found.
        key: String,
    },

    /// I/O failure while reading stored content.
    #[error("storage read failed: {0}")]
    Read(String),

    /// I/O failure while writing, renaming, or removing stored content.
    #[error("storage write failed: {0}")]
    Write(String),

    /// Storage provider configuration error.
    #[error("storage configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

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

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Map an I/O error from a read path, keeping not-found distinct.
    pub(crate) fn from_io_read(key: &str, err: &std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(key)
        } else {
            Self::read(err.to_string())
        }
    }

    /// Map an I/O error from a write path, keeping not-found distinct.
    pub(crate) fn from_io_write(key: &str, err: &std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(key)
        } else {
            Self::write(err.to_string())
        }
    }

    /// Map an OpenDAL error from a read path.
    pub(crate) fn from_opendal_read(key: &str, err: &opendal::Error) -> Self {
        if err.kind() == opendal::ErrorKind::NotFound {
            Self::not_found(key)
        } else {
            Self::read(err.to_string())
        }
    }

    /// Map an OpenDAL error from a write path.
    pub(crate) fn from_opendal_write(key: &str, err: &opendal::Error) -> Self {
        if err.kind() == opendal::ErrorKind::NotFound {
            Self::not_found(key)
        } else {
            Self::write(err.to_string())
        }
    }
}
