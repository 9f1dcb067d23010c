//! Web server setup and configuration

use crate::{middleware::session_guard, routes, state::AppState};
use axum::{Router, extract::DefaultBodyLimit};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use voiceiq_core::{Config, Result};

/// Extra room on top of the upload limit for multipart framing
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Build the complete web application with all routes and state
///
/// # Errors
///
/// Returns an error if the application state cannot be constructed.
pub fn build_app(config: Config) -> Result<Router> {
    let state = Arc::new(AppState::new(config)?);
    Ok(build_routes(state))
}

/// Assemble the router around existing state
pub fn build_routes(state: Arc<AppState>) -> Router {
    let body_limit = usize::try_from(state.config.upload.max_file_size)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    let guarded = Router::new()
        .merge(routes::page_routes())
        .merge(routes::api_routes())
        .layer(axum::middleware::from_fn_with_state(
            Arc::clone(&state),
            session_guard,
        ));

    Router::new()
        .merge(routes::auth_routes())
        .merge(routes::asset_routes())
        .merge(guarded)
        .fallback(routes::not_found_handler)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .with_state(state)
}
