use common::AppError;
use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("user not authenticated")]
    Unauthenticated,
    #[error("not found: {endpoint}")]
    NotFound { endpoint: String, message: String },
    #[error("unexpected status {status} for {endpoint}: {message}")]
    Status {
        status: StatusCode,
        endpoint: String,
        message: String,
    },
    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("request to {endpoint} failed: {reason}")]
    Request { endpoint: String, reason: String },
    #[error("malformed response body from {endpoint}: {reason}")]
    Body { endpoint: String, reason: String },
}

impl TransportError {
    pub fn status(
        status: StatusCode,
        endpoint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let endpoint = endpoint.into();
        let message = message.into();
        if status == StatusCode::NOT_FOUND {
            Self::NotFound { endpoint, message }
        } else {
            Self::Status {
                status,
                endpoint,
                message,
            }
        }
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            TransportError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for AppError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Unauthenticated => AppError::Unauthenticated,
            TransportError::NotFound { endpoint, .. } => AppError::NotFound(endpoint),
            TransportError::Status {
                status,
                endpoint,
                message,
            } => AppError::Upstream {
                status: status.as_u16(),
                endpoint,
                message,
            },
            other => AppError::http(other),
        }
    }
}
