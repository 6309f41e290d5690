use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use folio_core::errors::{Error as CoreError, StoreError};

/// API-level error: maps engine errors to HTTP statuses and a JSON body.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    Core(CoreError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Core(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message.clone()),
            ApiError::Core(err) => match err {
                CoreError::Validation(_) | CoreError::Trade(_) => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                CoreError::Store(StoreError::NotFound(_)) => {
                    (StatusCode::NOT_FOUND, err.to_string())
                }
                _ => {
                    tracing::error!("Request failed: {}", err);
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
            },
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
