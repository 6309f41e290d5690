use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;

/// The already-authenticated user identifier, supplied by the upstream
/// session layer in the `x-user-id` header. The server performs no
/// authentication itself.
pub struct UserId(pub String);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(|value| UserId(value.to_string()))
            .ok_or_else(|| ApiError::Unauthorized("Unauthorized: No valid session".to_string()))
    }
}
