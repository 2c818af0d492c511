//! Metadata inspection routes.
//!
//! These operate on the metadata store only and never touch byte storage;
//! deleting a record here orphans any stored content.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::json;
use tracing::info;

use crate::{AppState, error::ApiError};
use filedock_shared::FileId;

/// Creates the metadata inspection routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/database/select/{file_id}", get(select_record))
        .route("/database/select_all", get(select_all_records))
        .route("/database/count", get(count_records))
        .route("/database/delete/{file_id}", delete(delete_record))
        .route("/database/delete_all", delete(delete_all_records))
}

/// GET `/database/select/{file_id}`
/// Fetch a single file record.
async fn select_record(
    State(state): State<AppState>,
    Path(file_id): Path<FileId>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.service.record(file_id).await?;
    Ok(Json(record))
}

/// GET `/database/select_all`
/// Fetch every file record.
async fn select_all_records(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.service.records().await?;
    Ok(Json(records))
}

/// GET `/database/count`
/// Number of file records.
async fn count_records(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let count = state.service.record_count().await?;
    Ok(Json(count))
}

/// DELETE `/database/delete/{file_id}`
/// Remove a single record, leaving any stored bytes behind.
async fn delete_record(
    State(state): State<AppState>,
    Path(file_id): Path<FileId>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete_record(file_id).await?;

    info!(file_id = %file_id, "File record deleted");

    Ok(Json(json!({ "file_id": file_id })))
}

/// DELETE `/database/delete_all`
/// Remove every record, leaving stored bytes behind.
async fn delete_all_records(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.service.delete_all_records().await?;

    info!(deleted, "All file records deleted");

    Ok(Json(json!({ "deleted": deleted })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, Bytes};
    use axum::http::{Request, StatusCode};
    use filedock_core::file::FileService;
    use filedock_core::metadata::MemoryStore;
    use filedock_core::storage::{Storage, StorageProvider};
    use filedock_db::MetadataBackend;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn test_app(dir: &TempDir) -> (Router, Arc<FileService<MetadataBackend>>) {
        let provider =
            StorageProvider::local(dir.path().join("uploads"), dir.path().join("downloads"));
        let storage = Storage::from_provider(&provider).await.unwrap();
        let service = Arc::new(FileService::new(
            Arc::new(storage),
            Arc::new(MetadataBackend::Memory(MemoryStore::new())),
        ));

        let app = crate::routes::api_routes().with_state(AppState {
            service: Arc::clone(&service),
        });
        (app, service)
    }

    async fn request(app: &Router, method: &str, uri: &str) -> (StatusCode, Bytes) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body)
    }

    #[tokio::test]
    async fn test_select_and_select_all() {
        let dir = TempDir::new().unwrap();
        let (app, service) = test_app(&dir).await;

        let (status, body) = request(&app, "GET", "/database/select_all").await;
        assert_eq!(status, StatusCode::OK);
        let records: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(records.as_array().unwrap().is_empty());

        let stored = service.upload("a.txt", "text/plain", b"abc").await.unwrap();

        let (status, body) =
            request(&app, "GET", &format!("/database/select/{}", stored.file_id)).await;
        assert_eq!(status, StatusCode::OK);
        let record: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(record["file_id"], stored.file_id.to_string());
        assert_eq!(record["size"], 3);

        let (status, body) = request(&app, "GET", "/database/select_all").await;
        assert_eq!(status, StatusCode::OK);
        let records: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(records.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_select_missing_is_404() {
        let dir = TempDir::new().unwrap();
        let (app, _service) = test_app(&dir).await;

        let (status, body) =
            request(&app, "GET", &format!("/database/select/{}", FileId::new())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["name"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_count() {
        let dir = TempDir::new().unwrap();
        let (app, service) = test_app(&dir).await;

        let (status, body) = request(&app, "GET", "/database/count").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"0");

        service.upload("a.txt", "text/plain", b"a").await.unwrap();
        service.upload("b.txt", "text/plain", b"b").await.unwrap();

        let (_, body) = request(&app, "GET", "/database/count").await;
        assert_eq!(&body[..], b"2");
    }

    #[tokio::test]
    async fn test_delete_record_leaves_bytes() {
        let dir = TempDir::new().unwrap();
        let (app, service) = test_app(&dir).await;

        let stored = service.upload("a.txt", "text/plain", b"abc").await.unwrap();

        let (status, _) =
            request(&app, "DELETE", &format!("/database/delete/{}", stored.file_id)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) =
            request(&app, "GET", &format!("/database/select/{}", stored.file_id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // The bytes were never touched.
        let (status, body) = request(&app, "GET", &format!("/files/{}", stored.file_id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"abc");
    }

    #[tokio::test]
    async fn test_delete_missing_record_is_404() {
        let dir = TempDir::new().unwrap();
        let (app, _service) = test_app(&dir).await;

        let (status, _) =
            request(&app, "DELETE", &format!("/database/delete/{}", FileId::new())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_all_reports_count() {
        let dir = TempDir::new().unwrap();
        let (app, service) = test_app(&dir).await;

        service.upload("a.txt", "text/plain", b"a").await.unwrap();
        service.upload("b.txt", "text/plain", b"b").await.unwrap();

        let (status, body) = request(&app, "DELETE", "/database/delete_all").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["deleted"], 2);

        let (_, body) = request(&app, "GET", "/database/count").await;
        assert_eq!(&body[..], b"0");
    }
}
