// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::pages;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Password does not meet complexity requirements")]
    WeakPassword,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::WeakPassword => StatusCode::BAD_REQUEST,
            AppError::UsernameTaken(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "VAL_001",
            AppError::UsernameTaken(_) => "REG_001",
            AppError::WeakPassword => "REG_002",
            AppError::InvalidCredentials => "AUTH_001",
            AppError::Config(_) => "CFG_001",
            AppError::Internal(_) => "INT_001",
            AppError::Json(_) => "JSON_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::InvalidInput(_) => "Invalid input provided".to_string(),
            AppError::UsernameTaken(_) => "Username already exists".to_string(),
            AppError::WeakPassword => "Password is too weak".to_string(),
            AppError::InvalidCredentials => "Authentication failed".to_string(),
            AppError::Config(_) | AppError::Internal(_) | AppError::Json(_) => {
                "An internal server error occurred".to_string()
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        if status.is_server_error() {
            tracing::error!(code = error_code, error = %self, "request failed");
        }

        (status, Html(pages::error_page(status, error_code, &message))).into_response()
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Blocking task failed: {err}"))
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
