//! Byte storage backends keyed by file identifier.
//!
//! Two variants, selected once at startup:
//! - Local filesystem with separate upload and download-staging directories
//! - Object storage (S3-compatible or Azure Blob) through Apache OpenDAL
//!
//! Neither variant knows about the metadata store; sequencing across the two
//! is owned entirely by the file service.

mod config;
mod error;
mod local;
mod object;
mod service;

pub use config::StorageProvider;
pub use error::StorageError;
pub use local::LocalStore;
pub use object::ObjectStore;
pub use service::Storage;
