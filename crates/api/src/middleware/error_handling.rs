//! # Error Handling Middleware
//!
//! Maps scheduling errors to HTTP status codes and JSON error bodies so every
//! endpoint reports failures the same way.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use coursesched_core::errors::SchedError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use coursesched_api::middleware::error_handling::AppError;
/// use coursesched_core::errors::SchedError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(SchedError::NotFound("Course".to_string())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SchedError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SchedError::NotFound(_) => StatusCode::NOT_FOUND,
            SchedError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SchedError::Conflict { .. } => StatusCode::CONFLICT,
            SchedError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SchedError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `SchedResult` values inside handlers.
impl From<SchedError> for AppError {
    fn from(err: SchedError) -> Self {
        AppError(err)
    }
}

/// Malformed request bodies are reported like any other invalid input.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(SchedError::InvalidInput(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(SchedError::InvalidInput(rejection.body_text()))
    }
}
