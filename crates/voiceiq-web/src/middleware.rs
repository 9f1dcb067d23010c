//! Session guard middleware
//!
//! Resolves the session cookie and injects the session into request
//! extensions. Requests without a live session are redirected to the login
//! page (page routes) or answered with 401 (JSON and WebSocket routes);
//! nothing else changes for authenticated requests.

use crate::{
    session::{Session, session_id_from_headers},
    state::AppState,
};
use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Error body returned on unauthenticated API requests
#[derive(Debug, Serialize)]
pub struct GuardError {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

/// A resolved session together with its store identifier
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Store key, needed to tear the session down on logout
    pub id: Uuid,

    /// The session itself
    pub session: Session,
}

/// Resolve the session referenced by the request cookie, if any
#[must_use]
pub fn resolve_session(state: &AppState, headers: &HeaderMap) -> Option<AuthSession> {
    let id = session_id_from_headers(headers, &state.config.session.cookie_name)?;
    let session = state.sessions.get(id)?;

    Some(AuthSession { id, session })
}

/// Guard wrapping every authenticated route
pub async fn session_guard(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    match resolve_session(&state, request.headers()) {
        Some(auth) => {
            debug!(user = %auth.session.user.email, "session resolved");
            request.extensions_mut().insert(auth);
            next.run(request).await
        }
        None => {
            let path = request.uri().path();
            if path.starts_with("/api") || path.starts_with("/ws") {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(GuardError {
                        error: "Authentication required".to_string(),
                        code: "SESSION_REQUIRED".to_string(),
                    }),
                )
                    .into_response()
            } else {
                Redirect::to("/login").into_response()
            }
        }
    }
}
