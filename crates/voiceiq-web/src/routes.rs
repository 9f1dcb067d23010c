//! Route definitions for the web interface

use crate::{
    handlers::{api, auth, live, pages},
    state::AppState,
};
use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

/// Guarded page routes
pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(pages::dashboard_page))
        .route("/upload", get(pages::upload_page))
        .route("/calls/:id", get(pages::call_page))
}

/// Guarded JSON and WebSocket routes backing the pages
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/calls", get(api::list_calls))
        .route(
            "/api/calls/:id",
            get(api::get_call).delete(api::delete_call),
        )
        .route("/api/upload/call", post(api::upload_call))
        .route("/api/auth/logout", post(auth::logout))
        // WebSocket for the live dashboard feed
        .route("/ws", get(live::websocket_handler))
}

/// Public routes: login/signup pages and their JSON endpoints
pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(pages::login_page))
        .route("/signup", get(pages::signup_page))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/signup", post(auth::signup))
}

/// Static assets and health check
pub fn asset_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/static/app.css", get(pages::app_css))
        .route("/static/app.js", get(pages::app_js))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Handle 404 Not Found errors
pub async fn not_found_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Not Found",
            "code": "ROUTE_NOT_FOUND",
            "message": "The requested page or endpoint does not exist"
        })),
    )
}
