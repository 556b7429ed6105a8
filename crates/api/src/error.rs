use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::AppError;
use serde::Serialize;

#[derive(Debug)]
pub enum ApiError {
    Unauthenticated(String),
    NotFound(String),
    BadRequest(String),
    Upstream(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let message = err.to_string();
        match err {
            AppError::Unauthenticated => Self::Unauthenticated(message),
            // An expired or revoked token is rejected by upstream with 401.
            AppError::Upstream { status: 401, .. } => Self::Unauthenticated(message),
            AppError::NotFound(_) => Self::NotFound(message),
            AppError::InvalidArgument(_) => Self::BadRequest(message),
            AppError::Upstream { .. } => Self::Upstream(message),
            _ => Self::Internal(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        if status.is_server_error() {
            tracing::warn!(%status, error = %message, "request failed");
        }
        let body = Json(ErrorBody { error: message });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
