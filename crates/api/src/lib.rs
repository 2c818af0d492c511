//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - File transfer routes (upload, download, replace, rename, delete)
//! - Metadata inspection routes under `/database`
//! - Error-to-status mapping in one place

pub mod error;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use filedock_core::file::FileService;
use filedock_db::MetadataBackend;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// File service over the configured storage and metadata backends.
    pub service: Arc<FileService<MetadataBackend>>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
