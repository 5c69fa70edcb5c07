//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across all backend modules. It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx) - User/input issues
//!    - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//!    - [`Unauthorized`](AppError::Unauthorized) → 401 Unauthorized
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!
//! 2. **Server Errors** (5xx) - Internal/system issues
//!    - [`Config`](AppError::Config) → 500 Internal Server Error
//!    - [`Internal`](AppError::Internal) → 500 Internal Server Error
//!
//! Server errors never leak their context string to the client; it is logged
//! and replaced with a generic message.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_title(title: &str) -> Result<String> {
//!     if title.is_empty() {
//!         return Err(AppError::InvalidInput("title cannot be empty".to_string()));
//!     }
//!     Ok(title.to_string())
//! }
//! ```
//!
//! ## Error Conversion
//!
//! - `From<anyhow::Error>` - Convert anyhow errors to AppError
//! - `From<sqlx::Error>` - Convert database errors to AppError
//! - `From<lib_auth::Error>` - Token rejections become 401, hashing failures 500
//! - `From<JsonRejection>` - Unreadable request bodies become 400

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use crate::dto::ErrorResponse;
use thiserror::Error;

/// Generic message returned for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
///
/// Each variant includes a descriptive `String` for context. The `#[error]` attribute
/// from `thiserror` provides automatic `Display` implementation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input validation error.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing, malformed or expired credentials.
    ///
    /// **HTTP Status**: 401 Unauthorized
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Requested resource not found.
    ///
    /// **HTTP Status**: 404 Not Found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error (unexpected failures).
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For internal errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) | AppError::Unauthorized(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            AppError::Config(_) | AppError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// Variant name, sent to clients as the `code` field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Full error message goes to server logs only
        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.user_message(),
            code: Some(self.code().to_string()),
        });

        (status, body).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `sqlx::Error` to `AppError`.
///
/// Every store failure is opaque to clients. Absence and email conflicts are
/// mapped by the repositories before reaching this conversion.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                AppError::Internal(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert `lib_auth::Error` to `AppError`.
impl From<lib_auth::Error> for AppError {
    fn from(err: lib_auth::Error) -> Self {
        if err.is_token_rejection() {
            AppError::Unauthorized(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

/// Convert axum's JSON body rejection to `AppError`.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}
