//! Core file service logic for Filedock.
//!
//! This crate contains the storage and metadata coordination logic with ZERO
//! web or database dependencies. The relational metadata variant lives in
//! `filedock-db`; the HTTP surface lives in `filedock-api`.
//!
//! # Modules
//!
//! - `storage` - Byte storage backends (local filesystem, object store)
//! - `metadata` - File record store trait + in-memory key-value variant
//! - `file` - The file service orchestrating both backends

pub mod file;
pub mod metadata;
pub mod storage;
