//! Integration tests for error shaping and the CSRF header echo.

use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use souq_client::ApiError;
use souq_client::http::ApiClient;
use souq_integration_tests::spawn;

async fn structured_error() -> impl IntoResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": {
                "code": "VALIDATION_ERROR",
                "message": "Invalid product",
                "details": [
                    {"field": "sku", "message": "required"},
                    {"field": "price", "message": "must be positive"}
                ]
            }
        })),
    )
}

async fn opaque_error() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "<html>upstream died</html>")
}

async fn issue_csrf() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, "csrf_token=tok123; Path=/")],
        Json(json!({"data": {"message": "ok"}})),
    )
}

/// Echoes back whatever `x-csrf-token` header arrived (or `null`).
async fn echo_csrf(headers: HeaderMap) -> impl IntoResponse {
    let token = headers
        .get("x-csrf-token")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    Json(json!({"data": {"token": token}}))
}

async fn delete_no_body() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

fn router() -> Router {
    Router::new()
        .route("/bad/structured", get(structured_error))
        .route("/bad/opaque", get(opaque_error))
        .route("/csrf/issue", get(issue_csrf))
        .route("/csrf/echo", post(echo_csrf).get(echo_csrf))
        .route("/things/1", delete(delete_no_body))
}

async fn client() -> ApiClient {
    let server = spawn(router()).await;
    ApiClient::new(&server.client_config())
}

#[tokio::test]
async fn test_structured_error_body_becomes_combined_message() {
    let client = client().await;

    let err = client
        .get::<Value>("/bad/structured")
        .await
        .expect_err("should fail");

    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(message.contains("Invalid product"));
            assert!(message.contains("sku: required"));
            assert!(message.contains("price: must be positive"));
        }
        other => panic!("expected ApiError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_opaque_error_body_degrades_to_status() {
    let client = client().await;

    let err = client
        .get::<Value>("/bad/opaque")
        .await
        .expect_err("should fail");

    assert!(matches!(err, ApiError::Http(StatusCode::BAD_GATEWAY)));
    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
}

#[tokio::test]
async fn test_csrf_cookie_is_echoed_on_mutating_verbs() {
    let client = client().await;

    // no cookie yet: the POST goes out without the header
    let before: Value = client
        .post::<_, ()>("/csrf/echo", None)
        .await
        .expect("echo should succeed");
    assert_eq!(before["data"]["token"], Value::Null);

    // server sets the readable CSRF cookie
    let _: Value = client.get("/csrf/issue").await.expect("issue should succeed");

    // now the POST carries it back as a header
    let after: Value = client
        .post::<_, ()>("/csrf/echo", None)
        .await
        .expect("echo should succeed");
    assert_eq!(after["data"]["token"], "tok123");
}

#[tokio::test]
async fn test_csrf_header_is_not_sent_on_get() {
    let client = client().await;

    let _: Value = client.get("/csrf/issue").await.expect("issue should succeed");

    let response: Value = client.get("/csrf/echo").await.expect("echo should succeed");
    assert_eq!(response["data"]["token"], Value::Null);
}

#[tokio::test]
async fn test_empty_response_body_parses_as_null() {
    let client = client().await;

    let value: Value = client.delete("/things/1").await.expect("delete should succeed");
    assert_eq!(value, Value::Null);
}
