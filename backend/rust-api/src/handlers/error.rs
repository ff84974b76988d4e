use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::services::{format_selector::SelectionError, ServiceError};
use crate::store::StoreError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    Unprocessable(String),
    Internal(String),
}

impl ApiError {
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(message) => ApiError::NotFound(message),
            ServiceError::Unauthorized(message) => ApiError::Unauthorized(message),
            ServiceError::Assessment(e) => ApiError::BadRequest(e.to_string()),
            ServiceError::Selection(e @ SelectionError::NoAvailableFormat) => {
                ApiError::Unprocessable(e.to_string())
            }
            ServiceError::Store(StoreError::Conflict(message)) => ApiError::Conflict(message),
            ServiceError::Store(e @ StoreError::NotFound { .. }) => ApiError::NotFound(e.to_string()),
            ServiceError::Auth(e) => ApiError::Unauthorized(e.to_string()),
            ServiceError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::Unprocessable(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (
            status,
            Json(json!({
                "message": message,
                "status": status.as_u16(),
            })),
        )
            .into_response()
    }
}
