//! Authentication routes.
//!
//! JSON endpoints for account creation and token issuance. Everything under
//! `/api` requires the token these endpoints hand out.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use ticklist_core::UserId;

use crate::error::Result;
use crate::models::NewUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Request to sign in.
///
/// No `Debug` impl so the plaintext password cannot leak into logs.
#[derive(Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Response from creating an account.
#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub id: UserId,
}

/// Response from signing in.
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
}

/// Create a new account.
///
/// POST /auth/sign-up
///
/// # Errors
///
/// Returns 400 if the username fails validation and 409 if it is already
/// taken.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<NewUser>,
) -> Result<Json<SignUpResponse>> {
    let auth = AuthService::new(state.pool(), state.hasher(), state.tokens());
    let id = auth.create_user(&req).await?;

    tracing::info!(user_id = %id, "account created");

    Ok(Json(SignUpResponse { id }))
}

/// Exchange a username and password for a bearer token.
///
/// POST /auth/sign-in
///
/// # Errors
///
/// Returns 401 if the pair matches no account; the response never says
/// which half was wrong.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<SignInResponse>> {
    let auth = AuthService::new(state.pool(), state.hasher(), state.tokens());
    let token = auth
        .generate_token(&req.username, &req.password)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "sign-in failed"))?;

    Ok(Json(SignInResponse { token }))
}
