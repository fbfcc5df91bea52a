//! Authentication middleware and extractors.
//!
//! Provides an extractor for requiring a bearer token in route handlers.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use ticklist_core::UserId;

use crate::error::ErrorBody;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// Reads the `Authorization: Bearer <token>` header, verifies the token,
/// and yields the user ID it was issued for.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(AuthUser(user_id): AuthUser) -> impl IntoResponse {
///     format!("hello, user {user_id}")
/// }
/// ```
pub struct AuthUser(pub UserId);

/// Error returned when a request lacks a usable bearer token.
pub enum AuthRejection {
    /// No `Authorization` header, or one without a `Bearer` scheme.
    MissingToken,
    /// The token failed verification.
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::MissingToken => "missing bearer token",
            Self::InvalidToken => "invalid or expired token",
        };
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody {
                message: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthRejection::MissingToken)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthRejection::MissingToken)?;

        let auth = AuthService::new(state.pool(), state.hasher(), state.tokens());
        let user_id = auth
            .parse_token(token)
            .map_err(|_| AuthRejection::InvalidToken)?;

        // Associate any later errors on this request with the user
        crate::error::set_sentry_user(&user_id);

        Ok(Self(user_id))
    }
}
