//! Auth routes: credential exchange, token validation, revocation.

use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::state::{AppState, DEMO_EMAIL, DEMO_PASSWORD, DemoUser};

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Caller holding a live bearer token. Use as a handler parameter to require
/// authentication.
pub struct AuthUser {
    pub user: DemoUser,
    pub token: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError::MissingToken)?;
        let app_state = AppState::from_ref(state);
        if !app_state.is_live(token).await {
            return Err(ApiError::InvalidToken);
        }
        Ok(Self { user: DemoUser::scout_master(), token: token.to_owned() })
    }
}

pub(crate) fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default, alias = "username")]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: DemoUser,
}

/// `POST /api/auth/login`: exchange the demo credentials for a token.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginBody>) -> Result<Json<LoginResponse>, ApiError> {
    if body.email.trim() != DEMO_EMAIL || body.password != DEMO_PASSWORD {
        info!("login rejected");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.issue_token().await;
    state.record("login", None).await;
    info!("login accepted");
    Ok(Json(LoginResponse { success: true, token, user: DemoUser::scout_master() }))
}

#[derive(Debug, Deserialize)]
pub struct ValidateBody {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub user: DemoUser,
}

/// `POST /api/auth/validate`: confirm a token is still live.
pub async fn validate(
    State(state): State<AppState>,
    Json(body): Json<ValidateBody>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let token = body.token.trim();
    if token.is_empty() {
        return Err(ApiError::MissingToken);
    }
    if !state.is_live(token).await {
        return Err(ApiError::InvalidToken);
    }
    Ok(Json(ValidateResponse { valid: true, user: DemoUser::scout_master() }))
}

/// `GET /api/auth/me`: return the current user.
pub async fn me(auth: AuthUser) -> Json<DemoUser> {
    Json(auth.user)
}

/// `POST /api/auth/logout`: revoke the caller's token.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if state.revoke(&auth.token).await {
        state.record("logout", None).await;
        info!("token revoked");
    }
    StatusCode::NO_CONTENT
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
