//! Translation of internal error kinds to HTTP responses.

use crate::task::{services::TaskCollectionError, views::TaskValidationError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

/// Client-facing error emitted by the task handlers.
///
/// This is the single place internal error kinds become externally
/// visible status codes: validation failures map to 422 with the full
/// field list, missing records to 404 with a detail message, and store
/// failures to an opaque 500.
#[derive(Debug)]
pub enum ApiError {
    /// Constraint-violating input; enumerates the offending fields.
    Validation(TaskValidationError),
    /// The referenced record (or full bulk id set) does not exist.
    NotFound(&'static str),
    /// The persistence layer failed.
    Internal,
}

impl ApiError {
    /// Builds a validation error from a single field violation.
    #[must_use]
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation(TaskValidationError::new(vec![
            crate::task::views::FieldViolation::new(field, message),
        ]))
    }
}

impl From<TaskCollectionError> for ApiError {
    fn from(err: TaskCollectionError) -> Self {
        match err {
            TaskCollectionError::Validation(validation) => Self::Validation(validation),
            TaskCollectionError::NotFound(_) => Self::NotFound("Task not found"),
            TaskCollectionError::NoMatches => Self::NotFound("No matching tasks found"),
            TaskCollectionError::Repository(repository) => {
                error!(error = %repository, "store operation failed");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(validation) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": validation.violations() })),
            )
                .into_response(),
            Self::NotFound(detail) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
            }
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "Internal server error" })),
            )
                .into_response(),
        }
    }
}
