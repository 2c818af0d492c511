//! Filedock API Server
//!
//! Main entry point for the file transfer service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filedock_api::{AppState, create_router};
use filedock_core::file::FileService;
use filedock_core::metadata::MemoryStore;
use filedock_core::storage::{Storage, StorageProvider};
use filedock_db::migration::{Migrator, MigratorTrait};
use filedock_db::{FileRecordRepository, MetadataBackend};
use filedock_shared::AppConfig;
use filedock_shared::config::{
    MetadataBackendKind, MetadataSettings, StorageBackendKind, StorageSettings,
};

/// Build the storage provider described by the flat settings block.
fn storage_provider(settings: &StorageSettings) -> anyhow::Result<StorageProvider> {
    match settings.backend {
        StorageBackendKind::Local => Ok(StorageProvider::local(
            &settings.upload_dir,
            &settings.download_dir,
        )),
        StorageBackendKind::ObjectStore => {
            let endpoint = settings
                .endpoint
                .clone()
                .context("storage.endpoint is required for the object-store backend")?;
            let bucket = settings
                .bucket
                .clone()
                .context("storage.bucket is required for the object-store backend")?;
            let access_key_id = settings
                .access_key_id
                .clone()
                .context("storage.access_key_id is required for the object-store backend")?;
            let secret_access_key = settings
                .secret_access_key
                .clone()
                .context("storage.secret_access_key is required for the object-store backend")?;

            Ok(StorageProvider::s3(
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                settings.region.clone(),
            ))
        }
    }
}

/// Build the metadata backend, running migrations for the remote variant.
async fn metadata_backend(settings: &MetadataSettings) -> anyhow::Result<MetadataBackend> {
    match settings.backend {
        MetadataBackendKind::Local => Ok(MetadataBackend::Memory(MemoryStore::new())),
        MetadataBackendKind::Remote => {
            let url = settings
                .url
                .as_deref()
                .context("metadata.url is required for the remote backend")?;

            let db = filedock_db::connect(url, settings.max_connections).await?;
            Migrator::up(&db, None).await?;
            info!("Database migrations applied");

            Ok(MetadataBackend::Postgres(FileRecordRepository::new(db)))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "filedock=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Build storage backend
    let provider = storage_provider(&config.storage)?;
    let storage = Storage::from_provider(&provider).await?;
    info!(provider = provider.name(), "Storage backend ready");

    // Build metadata backend and probe it once
    let metadata = metadata_backend(&config.metadata).await?;
    let service = FileService::new(Arc::new(storage), Arc::new(metadata));
    service
        .check_metadata_connection()
        .await
        .context("Metadata store connection probe failed")?;
    info!(
        storage = service.storage_name(),
        metadata = service.metadata_name(),
        "Backends ready"
    );

    // Create application state and router
    let state = AppState {
        service: Arc::new(service),
    };
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
