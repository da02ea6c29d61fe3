use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use unispace_shared::{QrError, RoleParseError};
use unispace_store::{ScanError, StoreError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Space not found: {0}")]
    NotFound(String),

    #[error("Invalid QR code: {0}")]
    InvalidQrCode(#[from] QrError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => ServerError::BadRequest(msg),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl From<RoleParseError> for ServerError {
    fn from(err: RoleParseError) -> Self {
        ServerError::BadRequest(err.to_string())
    }
}

impl From<ScanError> for ServerError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::InvalidCode(e) => ServerError::InvalidQrCode(e),
            ScanError::NotFound(id) => ServerError::NotFound(id.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ServerError::InvalidQrCode(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),
            ServerError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
