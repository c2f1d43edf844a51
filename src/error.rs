//! Error types for the render server

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::pdf::RenderError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
///
/// Every render failure collapses to a 500 whose body is the error
/// description; callers get no finer distinction.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match &self {
            AppError::Render(e) => tracing::error!("Render failed: {}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}
