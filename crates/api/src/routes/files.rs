//! File transfer routes.

use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{AppState, error::ApiError};
use filedock_shared::FileId;

/// Creates the file transfer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/files", post(upload_file))
        .route(
            "/files/{file_id}",
            get(download_file).put(rename_file).delete(delete_file),
        )
        .route("/files/replace/{file_id}", put(replace_file))
}

/// The single file carried in a multipart request.
struct UploadedFile {
    name: String,
    mime: String,
    bytes: Bytes,
}

/// Pull the `file` field out of a multipart body.
async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request("INVALID_MULTIPART", e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().unwrap_or("unnamed").to_string();
        let mime = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request("INVALID_MULTIPART", e.to_string()))?;

        return Ok(UploadedFile { name, mime, bytes });
    }

    Err(ApiError::bad_request(
        "MISSING_FILE_FIELD",
        "multipart field `file` is required",
    ))
}

/// POST `/files`
/// Store the uploaded file under a new id.
async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let file = read_file_field(&mut multipart).await?;
    let stored = state
        .service
        .upload(&file.name, &file.mime, &file.bytes)
        .await?;

    info!(
        file_id = %stored.file_id,
        name = %file.name,
        size = file.bytes.len(),
        "File uploaded"
    );

    Ok(Json(json!({
        "file_id": stored.file_id,
        "file_path": stored.file_path,
    })))
}

/// GET `/files/{file_id}`
/// Serve the stored bytes.
async fn download_file(
    State(state): State<AppState>,
    Path(file_id): Path<FileId>,
) -> Result<Response, ApiError> {
    let download = state.service.download(file_id).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    let disposition = download.record.as_ref().and_then(|record| {
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", record.name)).ok()
    });
    if let Some(value) = disposition {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok((headers, download.bytes).into_response())
}

/// Query parameters for renaming a file.
#[derive(Debug, Deserialize)]
struct RenameParams {
    /// The id the file should be stored under from now on.
    new_file_id: FileId,
}

/// PUT `/files/{file_id}?new_file_id=`
/// Move the file and its record to a new id.
async fn rename_file(
    State(state): State<AppState>,
    Path(file_id): Path<FileId>,
    Query(params): Query<RenameParams>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.service.rename(file_id, params.new_file_id).await?;

    info!(old_id = %file_id, new_id = %record.file_id, "File renamed");

    Ok(Json(json!({ "file_id": record.file_id })))
}

/// PUT `/files/replace/{file_id}`
/// Overwrite the content of an existing file.
async fn replace_file(
    State(state): State<AppState>,
    Path(file_id): Path<FileId>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let file = read_file_field(&mut multipart).await?;
    let record = state
        .service
        .replace(file_id, &file.mime, &file.bytes)
        .await?;

    info!(file_id = %file_id, size = file.bytes.len(), "File content replaced");

    Ok(Json(record))
}

/// DELETE `/files/{file_id}`
/// Remove the file and its record.
async fn delete_file(
    State(state): State<AppState>,
    Path(file_id): Path<FileId>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete(file_id).await?;

    info!(file_id = %file_id, "File deleted");

    Ok(Json(json!({ "file_id": file_id })))
}
