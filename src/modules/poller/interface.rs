use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::schema::ErrorResponse;

// =============================================================================
// ERROR TYPES
// =============================================================================

pub type Result<T> = std::result::Result<T, ApiError>;

/// Failures detected before any outbound call is attempted
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to read request body")]
    BodyRead,

    #[error("Invalid JSON input")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Only POST requests are supported")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BodyRead => StatusCode::BAD_REQUEST,
            Self::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
