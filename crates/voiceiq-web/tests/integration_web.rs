//! Integration tests for the web tier
//!
//! Every test drives the assembled router against a stubbed backend; no
//! real backend or browser is involved.

mod common;

use axum::body::Body;
use common::*;
use http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use tower::ServiceExt;
use wiremock::matchers::{header as header_matcher, method, path};
use wiremock::{Mock, ResponseTemplate};

fn page_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request should build")
}

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let response = app
        .app
        .clone()
        .oneshot(page_request("/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn guarded_page_redirects_to_login_without_session() {
    let app = spawn_app().await;

    for uri in ["/", "/upload", "/calls/00000000-0000-0000-0000-0000000000aa"] {
        let response = app
            .app
            .clone()
            .oneshot(page_request(uri, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login",
            "{uri}"
        );
    }
}

#[tokio::test]
async fn guarded_api_answers_unauthorized_without_session() {
    let app = spawn_app().await;

    let response = app
        .app
        .clone()
        .oneshot(page_request("/api/calls", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["code"], "SESSION_REQUIRED");
}

#[tokio::test]
async fn login_page_is_public_and_redirects_once_signed_in() {
    let app = spawn_app().await;

    let response = app
        .app
        .clone()
        .oneshot(page_request("/login", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = login(&app, "token-123").await;

    let response = app
        .app
        .clone()
        .oneshot(page_request("/login", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
}

#[tokio::test]
async fn login_renders_user_into_dashboard() {
    let app = spawn_app().await;
    let cookie = login(&app, "token-123").await;

    let response = app
        .app
        .clone()
        .oneshot(page_request("/", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("Ada Lovelace"));
    assert!(page.contains("ada@example.com"));
    assert!(page.contains(">AL<"));
}

#[tokio::test]
async fn login_failure_passes_backend_message_through() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "Invalid credentials"
        })))
        .mount(&app.backend)
        .await;

    let response = app
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({
                "email": "ada@example.com",
                "password": "wrong"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn list_calls_proxies_with_bearer_token() {
    let app = spawn_app().await;
    let cookie = login(&app, "token-123").await;

    Mock::given(method("GET"))
        .and(path("/calls"))
        .and(header_matcher("authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "calls": [{
                "id": call_id(),
                "original_filename": "call1.mp3",
                "status": "completed",
                "file_size": 2_097_152,
                "score_count": 3
            }]
        })))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .app
        .clone()
        .oneshot(page_request("/api/calls", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["calls"][0]["original_filename"], "call1.mp3");
    assert_eq!(body["calls"][0]["status"], "completed");
}

#[tokio::test]
async fn logout_clears_session_and_later_visits_redirect() {
    let app = spawn_app().await;
    let cookie = login(&app, "token-123").await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true
        })))
        .mount(&app.backend)
        .await;

    let response = app
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cleared = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cleared.contains("Max-Age=0"));

    // The old cookie no longer resolves to a session
    let response = app
        .app
        .clone()
        .oneshot(page_request("/", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
}

#[tokio::test]
async fn delete_issues_exactly_one_backend_call() {
    let app = spawn_app().await;
    let cookie = login(&app, "token-123").await;
    let id = call_id();

    Mock::given(method("DELETE"))
        .and(path(format!("/calls/{id}")))
        .and(header_matcher("authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true
        })))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/calls/{id}"))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let deletes = app
        .backend
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "DELETE")
        .count();
    assert_eq!(deletes, 1);
}

#[tokio::test]
async fn upload_with_bad_extension_is_rejected_before_the_backend() {
    let app = spawn_app().await;
    let cookie = login(&app, "token-123").await;

    let response = app
        .app
        .clone()
        .oneshot(multipart_request(&cookie, "notes.txt", b"hello"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let requests = app.backend.received_requests().await.unwrap();
    assert!(
        requests.iter().all(|r| r.url.path() != "/upload/call"),
        "the backend must never see a rejected upload"
    );
}

#[tokio::test]
async fn upload_without_audio_field_is_rejected() {
    let app = spawn_app().await;
    let cookie = login(&app, "token-123").await;

    let boundary = "voiceiq-test-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{boundary}--\r\n"
    );

    let response = app
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/upload/call")
                .header(header::COOKIE, &cookie)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "No audio file provided");
}

#[tokio::test]
async fn upload_forwards_one_multipart_post_and_relays_call_id() {
    let app = spawn_app().await;
    let cookie = login(&app, "token-123").await;
    let id = call_id();

    Mock::given(method("POST"))
        .and(path("/upload/call"))
        .and(header_matcher("authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "callId": id
        })))
        .expect(1)
        .mount(&app.backend)
        .await;

    let content = vec![0_u8; 2 * 1024 * 1024];
    let response = app
        .app
        .clone()
        .oneshot(multipart_request(&cookie, "call1.mp3", &content))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["callId"], id.to_string());
}

#[tokio::test]
async fn call_detail_defaults_to_scores_tab_when_summary_is_missing() {
    let app = spawn_app().await;
    let cookie = login(&app, "token-123").await;
    let id = call_id();

    Mock::given(method("GET"))
        .and(path(format!("/calls/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "call": {
                "id": id,
                "original_filename": "call1.mp3",
                "status": "completed",
                "transcript": "hello\nworld",
                "score_count": 2
            },
            "scores": [
                {
                    "id": "00000000-0000-0000-0000-0000000000b1",
                    "question_text": "Did the agent greet the caller?",
                    "score_value": "yes"
                },
                {
                    "id": "00000000-0000-0000-0000-0000000000b2",
                    "question_text": "Was a next step agreed?",
                    "score_value": "no"
                }
            ]
        })))
        .mount(&app.backend)
        .await;

    let response = app
        .app
        .clone()
        .oneshot(page_request(&format!("/api/calls/{id}"), Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["default_tab"], "scores");
    assert_eq!(body["in_progress"], false);
    assert_eq!(body["scores"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn call_detail_prefers_summary_tab_and_reports_polling_state() {
    let app = spawn_app().await;
    let cookie = login(&app, "token-123").await;
    let id = call_id();

    Mock::given(method("GET"))
        .and(path(format!("/calls/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "call": {
                "id": id,
                "original_filename": "call1.mp3",
                "status": "processing",
                "summary": {
                    "agenda": "Quarterly review",
                    "keyTopics": ["pricing"]
                },
                "score_count": 1
            },
            "scores": [{
                "id": "00000000-0000-0000-0000-0000000000b1",
                "question_text": "Did the agent greet the caller?",
                "score_value": "yes"
            }]
        })))
        .mount(&app.backend)
        .await;

    let response = app
        .app
        .clone()
        .oneshot(page_request(&format!("/api/calls/{id}"), Some(&cookie)))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["default_tab"], "summary");
    assert_eq!(body["in_progress"], true);
}

#[tokio::test]
async fn backend_failure_surfaces_error_banner_payload() {
    let app = spawn_app().await;
    let cookie = login(&app, "token-123").await;

    Mock::given(method("GET"))
        .and(path("/calls"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "database unavailable"
        })))
        .mount(&app.backend)
        .await;

    let response = app
        .app
        .clone()
        .oneshot(page_request("/api/calls", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "database unavailable");
}

#[tokio::test]
async fn unknown_route_answers_json_not_found() {
    let app = spawn_app().await;

    let response = app
        .app
        .clone()
        .oneshot(page_request("/definitely/not/here", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["code"], "ROUTE_NOT_FOUND");
}
