//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//! Responses are JSON objects with a single `message` field.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::{AuthError, TokenError};

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidUsername(_) => StatusCode::BAD_REQUEST,
                AuthError::DuplicateUsername => StatusCode::CONFLICT,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::Token(TokenError::Key) | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                AuthError::Token(_) => StatusCode::UNAUTHORIZED,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => "not found".to_string(),
                _ => "internal server error".to_string(),
            },
            Self::Auth(err) => match err {
                AuthError::InvalidUsername(e) => e.to_string(),
                AuthError::DuplicateUsername => "username already exists".to_string(),
                AuthError::InvalidCredentials => "invalid credentials".to_string(),
                AuthError::Token(TokenError::Key) | AuthError::Repository(_) => {
                    "internal server error".to_string()
                }
                AuthError::Token(_) => "invalid or expired token".to_string(),
            },
            Self::Internal(_) => "internal server error".to_string(),
            Self::NotFound(msg) | Self::Unauthorized(msg) | Self::BadRequest(msg) => msg.clone(),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            ..Default::default()
        }));
    });
}
