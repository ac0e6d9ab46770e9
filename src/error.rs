//! Centralized request error type.
//!
//! Handlers return `Result<_, AppError>`; the `IntoResponse` impl maps each
//! error onto an HTTP status and a plain-text reason. Imaging and font errors
//! carry their own status mapping and are wrapped transparently.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::fonts::FontError;
use crate::imaging::ImageError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing request input
    #[error("{0}")]
    BadRequest(String),

    /// Font resolution or download failure
    #[error(transparent)]
    Font(#[from] FontError),

    /// Imaging adapter failure
    #[error(transparent)]
    Imaging(#[from] ImageError),

    /// Unexpected server-side failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        AppError::BadRequest(reason.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Font(e) => {
                StatusCode::from_u16(e.to_http_status()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            AppError::Imaging(e) => StatusCode::from_u16(e.to_http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %message, "Request rejected");
        }

        (status, message).into_response()
    }
}
