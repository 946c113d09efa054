//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::timeline::TimelineError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    Repository(RepositoryError),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ApiError) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Repository(e) => {
                let (status, code) = if e.is_not_found() {
                    (StatusCode::NOT_FOUND, "NOT_FOUND")
                } else if e.is_validation() {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
                } else if e.is_retryable() {
                    (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "REPOSITORY_ERROR")
                };
                let mut body = ApiError::new(code, e.to_string());
                if let Some(operation) = e.context().operation.as_deref() {
                    body = body.with_details(format!("operation: {}", operation));
                }
                (status, body)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!("{} {}", error.code, error.message);
        }
        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<TimelineError> for AppError {
    fn from(err: TimelineError) -> Self {
        match err {
            TimelineError::Fetch(e) => AppError::Repository(e),
            TimelineError::Commit(failure) => AppError::Repository(failure.source),
            TimelineError::UnknownItem { .. } => AppError::NotFound(err.to_string()),
            TimelineError::InvalidRange { .. } | TimelineError::Unscheduled { .. } => {
                AppError::BadRequest(err.to_string())
            }
            TimelineError::DragInProgress { .. } | TimelineError::NoActiveDrag => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
