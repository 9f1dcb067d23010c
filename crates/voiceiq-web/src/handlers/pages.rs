//! Page handlers serving the HTML templates
//!
//! Templates are embedded at compile time and rendered with a handful of
//! placeholder substitutions; everything dynamic beyond the user identity
//! is fetched by the page scripts through the JSON endpoints.

use crate::{middleware::{AuthSession, resolve_session}, state::AppState};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};
use std::sync::Arc;
use uuid::Uuid;
use voiceiq_core::utils::initials;

const LOGIN_TEMPLATE: &str = include_str!("../../templates/login.html");
const SIGNUP_TEMPLATE: &str = include_str!("../../templates/signup.html");
const DASHBOARD_TEMPLATE: &str = include_str!("../../templates/dashboard.html");
const UPLOAD_TEMPLATE: &str = include_str!("../../templates/upload.html");
const CALL_TEMPLATE: &str = include_str!("../../templates/call.html");

const APP_CSS: &str = include_str!("../../static/app.css");
const APP_JS: &str = include_str!("../../static/app.js");

/// Login page; an existing session goes straight to the dashboard
pub async fn login_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if resolve_session(&state, &headers).is_some() {
        return Redirect::to("/").into_response();
    }

    Html(LOGIN_TEMPLATE).into_response()
}

/// Signup page; an existing session goes straight to the dashboard
pub async fn signup_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if resolve_session(&state, &headers).is_some() {
        return Redirect::to("/").into_response();
    }

    Html(SIGNUP_TEMPLATE).into_response()
}

/// Dashboard page
pub async fn dashboard_page(Extension(auth): Extension<AuthSession>) -> Html<String> {
    render_for_user(DASHBOARD_TEMPLATE, &auth)
}

/// Upload page
pub async fn upload_page(Extension(auth): Extension<AuthSession>) -> Html<String> {
    render_for_user(UPLOAD_TEMPLATE, &auth)
}

/// Call detail page
pub async fn call_page(
    Extension(auth): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Html<String> {
    let Html(page) = render_for_user(CALL_TEMPLATE, &auth);
    Html(page.replace("{{call_id}}", &id.to_string()))
}

/// Shared stylesheet
pub async fn app_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], APP_CSS)
}

/// Shared page script (toasts, formatting, navigation shell)
pub async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
}

/// Substitute the signed-in user into a template's navigation shell
fn render_for_user(template: &str, auth: &AuthSession) -> Html<String> {
    let user = &auth.session.user;
    let name = user.name.as_deref().unwrap_or("User");

    Html(
        template
            .replace("{{user_name}}", &escape_html(name))
            .replace("{{user_email}}", &escape_html(&user.email))
            .replace(
                "{{user_initials}}",
                &escape_html(&initials(user.name.as_deref(), &user.email)),
            ),
    )
}

/// Minimal HTML escaping for substituted values
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
