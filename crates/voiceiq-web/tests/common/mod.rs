//! Test helpers for the web tier integration tests

use axum::{Router, body::Body};
use http::{Request, StatusCode, header};
use tower::ServiceExt;
use uuid::Uuid;
use voiceiq_core::Config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A router wired against a stubbed backend
pub struct TestApp {
    /// The application under test
    pub app: Router,
    /// Stub of the external backend REST API
    pub backend: MockServer,
}

/// Build the application against a fresh mock backend
pub async fn spawn_app() -> TestApp {
    let backend = MockServer::start().await;

    let mut config = Config::default();
    config.backend.base_url = backend.uri();

    let app = voiceiq_web::build_app(config).expect("failed to build app");

    TestApp { app, backend }
}

/// The user payload the stub backend hands out
pub fn user_json() -> serde_json::Value {
    serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000001",
        "email": "ada@example.com",
        "name": "Ada Lovelace"
    })
}

/// Stub a successful backend login yielding the given token
pub async fn mount_login(backend: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": user_json(),
            "token": token,
        })))
        .mount(backend)
        .await;
}

/// Log in through the application and return the session cookie pair
pub async fn login(app: &TestApp, token: &str) -> String {
    mount_login(&app.backend, token).await;

    let response = app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({
                "email": "ada@example.com",
                "password": "hunter2"
            }),
        ))
        .await
        .expect("login request failed");

    assert_eq!(response.status(), StatusCode::OK, "login should succeed");

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set the session cookie")
        .to_str()
        .expect("cookie must be valid text");

    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

/// Build a JSON request
pub fn json_request(verb: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(verb)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

/// Build a multipart upload request with a single `audio` field
pub fn multipart_request(cookie: &str, filename: &str, content: &[u8]) -> Request<Body> {
    let boundary = "voiceiq-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"audio\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/upload/call")
        .header(header::COOKIE, cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("request should build")
}

/// Decode a response body as JSON
pub async fn body_json(response: http::Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Read a response body as text
pub async fn body_text(response: http::Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

/// A fixed call identifier for stubbed payloads
pub fn call_id() -> Uuid {
    Uuid::parse_str("00000000-0000-0000-0000-0000000000aa").expect("valid uuid")
}
