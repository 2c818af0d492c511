//! Application configuration management.
//!
//! Configuration is loaded once at process start and stays immutable for the
//! life of the process.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage backend configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Metadata store configuration.
    #[serde(default)]
    pub metadata: MetadataSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Which storage backend holds the file bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackendKind {
    /// Local filesystem with separate upload and download directories.
    #[default]
    Local,
    /// Remote object store (S3-compatible or Azure Blob).
    ObjectStore,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Selected backend.
    #[serde(default)]
    pub backend: StorageBackendKind,
    /// Directory holding uploaded files (local backend).
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// Staging directory for downloads (local backend).
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
    /// Bucket or container name (object-store backend).
    pub bucket: Option<String>,
    /// Endpoint URL (S3-compatible object stores).
    pub endpoint: Option<String>,
    /// Region (S3-compatible object stores).
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key id (object-store backend).
    pub access_key_id: Option<String>,
    /// Secret access key (object-store backend).
    pub secret_access_key: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::Local,
            upload_dir: default_upload_dir(),
            download_dir: default_download_dir(),
            bucket: None,
            endpoint: None,
            region: default_region(),
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("data/uploads")
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("data/downloads")
}

fn default_region() -> String {
    "auto".to_string()
}

/// Which metadata store holds the file records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetadataBackendKind {
    /// In-process key-value store.
    #[default]
    Local,
    /// Relational database (Postgres).
    Remote,
}

/// Metadata store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataSettings {
    /// Selected backend.
    #[serde(default)]
    pub backend: MetadataBackendKind,
    /// Database connection URL (remote backend).
    pub url: Option<String>,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            backend: MetadataBackendKind::Local,
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FILEDOCK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
