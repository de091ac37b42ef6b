//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`tb_core::Error`] so that route handlers
//! can return `Result<T, AppError>` and use `?` on store calls directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError(pub tb_core::Error);

impl From<tb_core::Error> for AppError {
    fn from(e: tb_core::Error) -> Self {
        Self(e)
    }
}

impl AppError {
    fn code(&self) -> &'static str {
        match &self.0 {
            tb_core::Error::NotFound { .. } => "not_found",
            tb_core::Error::Validation(_) => "validation_error",
            tb_core::Error::Io { .. } => "io_error",
            tb_core::Error::Storage { .. } => "storage_error",
            tb_core::Error::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.0,
                "Server error in API handler"
            );
        }

        let body = json!({
            "detail": self.0.to_string(),
            "code": self.code(),
        });

        (status, axum::Json(body)).into_response()
    }
}
