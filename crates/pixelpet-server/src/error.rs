//! Unified error handling for the server.
//!
//! Every handler returns [`AppResult`]; each variant declares its HTTP
//! status. Storage failures are logged here and reach the client only as
//! a generic 500.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::auth::AuthError;
use crate::store::StoreError;

/// Application error type with HTTP response mapping.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing, malformed or duplicate input (400).
    #[error("{0}")]
    Validation(String),

    /// Bad credentials or token (401).
    #[error("{0}")]
    Unauthorized(String),

    /// No record for the user (404).
    #[error("{0}")]
    NotFound(String),

    /// Storage or other internal failure (500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AlreadyExists(_) => AppError::Validation("Username already exists".into()),
            StoreError::InvalidUsername(_) => AppError::Validation(
                "Username must be 1-32 letters, digits, '_' or '-'".into(),
            ),
            StoreError::NotFound(_) => AppError::NotFound("User not found".into()),
            e @ (StoreError::Io { .. } | StoreError::Json { .. }) => {
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken
            | AuthError::MalformedHeader
            | AuthError::InvalidToken
            | AuthError::InvalidCredentials => AppError::Unauthorized(e.to_string()),
            AuthError::EmptyPassword => AppError::Validation("Password is required".into()),
            AuthError::Hash(_) | AuthError::Encode(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", e.body_text()))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Internal(detail) => {
                log::error!("server error: {detail}");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
