//! JSON endpoints consumed by the page scripts
//!
//! Thin proxies over the backend API: each handler derives an authenticated
//! client from the request's session, forwards exactly one backend call, and
//! relays the decoded body or the error message.

use super::error_reply;
use crate::{middleware::AuthSession, state::AppState};
use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;
use voiceiq_core::{DetailTab, utils::format_file_size};

/// List all calls for the dashboard
pub async fn list_calls(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthSession>,
) -> Response {
    let client = state.api_client.with_token(auth.session.token.as_str());

    match client.list_calls().await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            error!("failed to list calls: {e}");
            error_reply(&e)
        }
    }
}

/// Fetch one call with its scores
///
/// The response carries two derived fields next to the backend payload:
/// `default_tab`, the tab the detail page opens on, and `in_progress`,
/// which tells the page whether to keep polling.
pub async fn get_call(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Response {
    let client = state.api_client.with_token(auth.session.token.as_str());

    match client.get_call(id).await {
        Ok(detail) => {
            let default_tab = DetailTab::pick(detail.call.has_summary(), detail.scores.len());
            let in_progress = detail.call.status.is_in_progress();

            Json(serde_json::json!({
                "call": detail.call,
                "scores": detail.scores,
                "default_tab": default_tab,
                "in_progress": in_progress,
            }))
            .into_response()
        }
        Err(e) => {
            error!(call = %id, "failed to fetch call: {e}");
            error_reply(&e)
        }
    }
}

/// Delete one call
pub async fn delete_call(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Response {
    let client = state.api_client.with_token(auth.session.token.as_str());

    match client.delete_call(id).await {
        Ok(ack) => {
            info!(call = %id, "call deleted");
            Json(ack).into_response()
        }
        Err(e) => {
            error!(call = %id, "failed to delete call: {e}");
            error_reply(&e)
        }
    }
}

/// Accept a recording from the browser and forward it to the backend
///
/// The request carries a single multipart field named `audio`. Extension
/// and size are validated before the backend is contacted; rejected files
/// never produce an outbound request.
pub async fn upload_call(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthSession>,
    mut multipart: Multipart,
) -> Response {
    let mut audio: Option<(String, Vec<u8>)> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("audio") {
                    let filename = field.file_name().map(String::from);
                    match field.bytes().await {
                        Ok(data) => {
                            audio = Some((filename.unwrap_or_default(), data.to_vec()));
                        }
                        Err(e) => {
                            error!("failed to read audio field: {e}");
                            return upload_error(StatusCode::BAD_REQUEST, "Failed to read audio data");
                        }
                    }
                }
                // Unknown fields are ignored for forward compatibility
            }
            Ok(None) => break,
            Err(e) => {
                error!("invalid multipart data: {e}");
                return upload_error(
                    StatusCode::BAD_REQUEST,
                    &format!("Invalid multipart data: {e}"),
                );
            }
        }
    }

    let Some((filename, bytes)) = audio else {
        return upload_error(StatusCode::BAD_REQUEST, "No audio file provided");
    };

    if filename.is_empty() {
        return upload_error(StatusCode::BAD_REQUEST, "Audio filename is required");
    }

    info!(
        filename = %filename,
        size = %format_file_size(bytes.len() as u64),
        user = %auth.session.user.email,
        "forwarding call upload"
    );

    let client = state.api_client.with_token(auth.session.token.as_str());
    match client
        .upload_call(&filename, bytes, &state.config.upload)
        .await
    {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            error!("upload failed: {e}");
            error_reply(&e)
        }
    }
}

/// Upload-specific error reply
fn upload_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({ "success": false, "error": message })),
    )
        .into_response()
}
