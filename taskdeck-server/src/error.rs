//! Handler-boundary error taxonomy and response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use taskdeck_proto::wire::ErrorBody;

use crate::store::StoreError;

/// Errors a request handler can produce, each mapped to a status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad input from the client (400).
    #[error("{0}")]
    Validation(String),

    /// The targeted task does not exist (404).
    #[error("task not found")]
    NotFound,

    /// The task store is unreachable or failing (500).
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(reason) => Self::StoreUnavailable(reason),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::StoreUnavailable(reason) => {
                tracing::error!(error = %reason, "store operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
