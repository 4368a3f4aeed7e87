use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::backend::{BackendError, FALLBACK_MESSAGE};
use crate::draft::DraftError;

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    NotImplemented(String),
    Upstream(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            ApiError::NotImplemented(msg) => (StatusCode::NOT_IMPLEMENTED, msg).into_response(),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response(),
        }
    }
}

impl From<BackendError> for ApiError {
    fn from(value: BackendError) -> Self {
        match value {
            BackendError::Rejected { status, message } => match status {
                StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
                StatusCode::NOT_FOUND => ApiError::NotFound(message),
                _ => ApiError::Upstream(message),
            },
            BackendError::Http(err) => {
                error!("backend request failed: {err}");
                ApiError::Upstream(FALLBACK_MESSAGE.into())
            }
            BackendError::InvalidBody(err) => {
                error!("backend response did not match the expected shape: {err}");
                ApiError::Upstream(FALLBACK_MESSAGE.into())
            }
        }
    }
}

impl From<DraftError> for ApiError {
    fn from(value: DraftError) -> Self {
        ApiError::BadRequest(value.to_string())
    }
}
