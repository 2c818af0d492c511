//! Metadata store for file records.
//!
//! One record per stored file identifier: name, content kind, size, and
//! timestamps. Two variants implement the [`MetadataStore`] trait:
//! - [`MemoryStore`] - in-process key-value map
//! - `FileRecordRepository` in `filedock-db` - relational (Postgres)

mod error;
mod memory;
mod store;
mod types;

pub use error::MetadataError;
pub use memory::MemoryStore;
pub use store::MetadataStore;
pub use types::{ContentKind, FileRecord, RecordPatch};
