//! Login, signup, and logout endpoints
//!
//! These are the only routes that talk to the backend without a session.
//! A successful authentication creates a server-side session and hands the
//! browser an opaque cookie; the bearer token itself never reaches the page.

use super::error_reply;
use crate::{
    middleware::AuthSession,
    session::{clear_session_cookie, session_cookie},
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;
use voiceiq_core::types::AuthResponse;

/// Login request body
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email
    #[validate(email(message = "a valid email is required"))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Signup request body
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Login email
    #[validate(email(message = "a valid email is required"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,

    /// Display name
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}

/// Authenticate against the backend and establish a session
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Response {
    if let Err(errors) = request.validate() {
        return validation_reply(&errors);
    }

    match state
        .api_client
        .login(&request.email, &request.password)
        .await
    {
        Ok(auth) => {
            info!(user = %auth.user.email, "user logged in");
            establish_session(&state, auth)
        }
        Err(e) => error_reply(&e),
    }
}

/// Create an account on the backend and establish a session
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Response {
    if let Err(errors) = request.validate() {
        return validation_reply(&errors);
    }

    match state
        .api_client
        .signup(&request.email, &request.password, &request.name)
        .await
    {
        Ok(auth) => {
            info!(user = %auth.user.email, "user signed up");
            establish_session(&state, auth)
        }
        Err(e) => error_reply(&e),
    }
}

/// Tear down the session
///
/// The backend logout is best-effort: the session entry and cookie are
/// cleared even when the backend call fails, since the cookie is the state
/// this tier is responsible for.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthSession>,
) -> Response {
    if let Err(e) = state
        .api_client
        .with_token(auth.session.token.as_str())
        .logout()
        .await
    {
        warn!("backend logout failed: {e}");
    }

    state.sessions.remove(auth.id);
    info!(user = %auth.session.user.email, "user logged out");

    let cookie = clear_session_cookie(&state.config.session.cookie_name);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "success": true })),
    )
        .into_response()
}

/// Store the session and answer with the user plus the session cookie
fn establish_session(state: &AppState, auth: AuthResponse) -> Response {
    let id = state.sessions.insert(auth.user.clone(), auth.token);
    let cookie = session_cookie(
        &state.config.session.cookie_name,
        id,
        state.config.session.ttl_seconds,
    );

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "user": auth.user })),
    )
        .into_response()
}

/// Answer a request that failed body validation
fn validation_reply(errors: &validator::ValidationErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": errors.to_string() })),
    )
        .into_response()
}
