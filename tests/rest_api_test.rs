// ============================================================================
// REST API Tests
// ============================================================================
//
// Drives the full router in-process with `tower::ServiceExt::oneshot`:
// - /messages CRUD mapping and status codes
// - error bodies for missing ids and malformed bodies
// - static file fallback and /health
//
// ============================================================================

use std::path::Path;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use board::{App, BoardServer};

fn router(app: &App) -> Router {
    BoardServer::router(app.clone(), Path::new(env!("CARGO_MANIFEST_DIR")))
}

async fn send(app: &App, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router(app)
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_crud_scenario() {
    let app = App::default();

    let (status, body) = send(&app, Method::POST, "/messages", Some(json!({"text": "a"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 1, "text": "a"}));

    let (_, body) = send(&app, Method::POST, "/messages", Some(json!({"text": "b"}))).await;
    assert_eq!(body, json!({"id": 2, "text": "b"}));

    let (status, body) = send(&app, Method::GET, "/messages", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": 1, "text": "a"}, {"id": 2, "text": "b"}]));

    let (status, body) = send(&app, Method::PATCH, "/messages/1", Some(json!({"text": "c"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "text": "c"}));

    let (status, body) = send(&app, Method::DELETE, "/messages/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 2, "text": "b"}));

    let (_, body) = send(&app, Method::GET, "/messages", None).await;
    assert_eq!(body, json!([{"id": 1, "text": "c"}]));

    let (status, body) = send(&app, Method::GET, "/messages/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "name": "NotFound",
            "message": "Message with id 2 not found",
            "code": 404,
            "className": "not-found"
        })
    );
}

#[tokio::test]
async fn test_put_replaces_and_keeps_id() {
    let app = App::default();
    send(&app, Method::POST, "/messages", Some(json!({"text": "old"}))).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/messages/1",
        Some(json!({"id": 99, "text": "new", "author": "ignored"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "text": "new"}));

    let (status, _) = send(&app, Method::GET, "/messages/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_patch_keeps_text() {
    let app = App::default();
    send(&app, Method::POST, "/messages", Some(json!({"text": "same"}))).await;

    let (_, body) = send(&app, Method::PATCH, "/messages/1", Some(json!({}))).await;
    assert_eq!(body, json!({"id": 1, "text": "same"}));
}

#[tokio::test]
async fn test_bodyless_requests_use_defaults() {
    let app = App::default();
    send(&app, Method::POST, "/messages", Some(json!({"text": "same"}))).await;

    // no body and no content type
    let (status, body) = send(&app, Method::PATCH, "/messages/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "text": "same"}));

    let (status, body) = send(&app, Method::POST, "/messages", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 2, "text": ""}));
}

#[tokio::test]
async fn test_missing_ids_are_404_for_every_verb() {
    let app = App::default();

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(json!({"text": "x"}))),
        (Method::PATCH, Some(json!({"text": "x"}))),
        (Method::DELETE, None),
    ] {
        let (status, value) = send(&app, method.clone(), "/messages/5", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} /messages/5", method);
        assert_eq!(value["name"], "NotFound");
    }

    let (status, value) = send(&app, Method::GET, "/messages/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["message"], "Message with id abc not found");

    assert_eq!(app.messages().count(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = App::default();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/messages")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router(&app).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["name"], "BadRequest");
    assert_eq!(body["code"], 400);
    assert_eq!(app.messages().count(), 0);
}

#[tokio::test]
async fn test_health_reports_counts() {
    let app = App::default();
    send(&app, Method::POST, "/messages", Some(json!({"text": "a"}))).await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "clients": 0, "messages": 1}));
}

#[tokio::test]
async fn test_static_files_served_from_root() {
    let app = App::default();

    let request = Request::builder()
        .uri("/Cargo.toml")
        .body(Body::empty())
        .unwrap();
    let response = router(&app).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("message-board"));

    let request = Request::builder()
        .uri("/no-such-file.txt")
        .body(Body::empty())
        .unwrap();
    let response = router(&app).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
