//! Health endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health payload, reporting which backends the service was started with.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Active storage backend.
    pub storage: &'static str,
    /// Active metadata backend.
    pub metadata: &'static str,
}

/// GET `/health`
/// Report liveness and the configured backend pair.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.service.storage_name(),
        metadata: state.service.metadata_name(),
    })
}

/// Creates the health routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use filedock_core::file::FileService;
    use filedock_core::metadata::MemoryStore;
    use filedock_core::storage::{Storage, StorageProvider};
    use filedock_db::MetadataBackend;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_backends() {
        let dir = TempDir::new().unwrap();
        let provider =
            StorageProvider::local(dir.path().join("uploads"), dir.path().join("downloads"));
        let storage = Storage::from_provider(&provider).await.unwrap();
        let service = FileService::new(
            Arc::new(storage),
            Arc::new(MetadataBackend::Memory(MemoryStore::new())),
        );

        let app = routes().with_state(AppState {
            service: Arc::new(service),
        });

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["storage"], "local");
        assert_eq!(json["metadata"], "memory");
        assert!(!json["version"].as_str().unwrap().is_empty());
    }
}
