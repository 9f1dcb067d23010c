//! Request handlers for pages, auth, JSON proxies, and the live feed

pub mod api;
pub mod auth;
pub mod live;
pub mod pages;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use voiceiq_core::Error;

/// Turn a client error into the JSON reply the pages expect
///
/// The backend's message is passed through verbatim with the backend's
/// status; everything else maps onto the error's own status.
pub(crate) fn error_reply(error: &Error) -> Response {
    let status = StatusCode::from_u16(error.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(serde_json::json!({ "error": error.user_message() })),
    )
        .into_response()
}
