//! File service orchestrating storage and metadata.
//!
//! Every client operation is two non-atomic backend calls, always ordered
//! storage-first, metadata-second. Partial failures are propagated, never
//! rolled back; the resulting inconsistency windows (orphaned bytes,
//! dangling records) are part of the contract.

mod error;
mod service;
mod types;

pub use error::FileServiceError;
pub use service::FileService;
pub use types::{Download, StoredFile};
