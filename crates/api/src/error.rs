//! API error responses.
//!
//! Backend errors are mapped to HTTP statuses here and nowhere else.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use filedock_core::file::FileServiceError;
use filedock_core::metadata::MetadataError;
use filedock_core::storage::StorageError;

/// Error response carrying a status, a stable error name, and a message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    name: &'static str,
    message: String,
}

impl ApiError {
    /// Build an error with an explicit status and name.
    #[must_use]
    pub fn new(status: StatusCode, name: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            name,
            message: message.into(),
        }
    }

    /// 400 response for malformed requests.
    #[must_use]
    pub fn bad_request(name: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, name, message)
    }
}

impl From<FileServiceError> for ApiError {
    fn from(err: FileServiceError) -> Self {
        let (status, name) = match &err {
            FileServiceError::Storage(StorageError::NotFound { .. })
            | FileServiceError::Metadata(MetadataError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND")
            }
            FileServiceError::Metadata(MetadataError::Duplicate(_)) => {
                (StatusCode::CONFLICT, "DUPLICATE_FILE")
            }
            FileServiceError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            FileServiceError::Metadata(_) => (StatusCode::INTERNAL_SERVER_ERROR, "METADATA_ERROR"),
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %err, "File operation failed");
        }

        Self::new(status, name, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "name": self.name,
                "message": self.message,
            })),
        )
            .into_response()
    }
}
