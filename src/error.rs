use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::password::PasswordError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Password processing error: {0}")]
    Password(#[from] PasswordError),
    #[error("Malformed JSON body: {0}")]
    Json(#[from] JsonRejection),
    #[error("Malformed query string: {0}")]
    Query(#[from] QueryRejection),
    #[error("Malformed path parameter: {0}")]
    Path(#[from] PathRejection),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation failed"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "Conflict"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            AppError::Store(StoreError::Duplicate(_)) => (StatusCode::CONFLICT, "Conflict"),
            AppError::Store(StoreError::MissingReference(_)) => (StatusCode::NOT_FOUND, "Not found"),
            AppError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            AppError::Password(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Password processing error"),
            AppError::Json(_) | AppError::Query(_) | AppError::Path(_) => {
                (StatusCode::BAD_REQUEST, "Malformed request")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Server-side failures are logged in full and reported generically
        let detail = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": detail,
            "code": code,
        }));

        (status, body).into_response()
    }
}
