//! Relational metadata store backed by `SeaORM`.
//!
//! This crate provides:
//! - The `files` entity definition
//! - A repository implementing the core metadata store trait
//! - Database migrations
//! - Backend selection between the in-process and relational stores

pub mod backend;
pub mod entities;
pub mod migration;
pub mod repositories;

pub use backend::MetadataBackend;
pub use repositories::FileRecordRepository;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options.max_connections(max_connections);
    Database::connect(options).await
}
