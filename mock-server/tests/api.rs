use axum::http::{self, Request, StatusCode};
use hmac::{Hmac, Mac};
use http_body_util::BodyExt;
use md5::Md5;
use mock_server::{app, MockConfig};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tower::ServiceExt;

const CLIENT_ID: &str = "test-client";
const SECRET: &str = "test-secret-1234";
const HOST: &str = "mock.local";
const EPOCH: &str = "1700000000000";

fn test_app() -> axum::Router {
    app(MockConfig::new(CLIENT_ID, SECRET))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Build a request signed the way the real client signs: HMAC-SHA256 over
/// full URL, stripped-body MD5 digest, and epoch.
fn signed(method: &str, uri: &str, body: &str) -> Request<String> {
    let stripped: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    let digest = if stripped.is_empty() {
        String::new()
    } else {
        hex::encode(Md5::digest(stripped.as_bytes()))
    };
    let url = format!("http://{HOST}{uri}");
    let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
    mac.update(url.as_bytes());
    mac.update(digest.as_bytes());
    mac.update(EPOCH.as_bytes());
    let hmac = hex::encode(mac.finalize().into_bytes());

    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::HOST, HOST)
        .header("X_CLIENT_UUID", CLIENT_ID)
        .header("EPOCH", EPOCH)
        .header("X_STILT_HMAC", hmac)
        .header("Content-MD5", digest);
    if !body.is_empty() {
        builder = builder.header(http::header::CONTENT_TYPE, "application/json");
    }
    builder.body(body.to_string()).unwrap()
}

// --- signature gate ---

#[tokio::test]
async fn unsigned_request_is_rejected() {
    let resp = test_app()
        .oneshot(
            Request::builder()
                .uri("/v1/users")
                .header(http::header::HOST, HOST)
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let payload = body_json(resp).await;
    assert_eq!(payload["message"], "unknown client");
}

#[tokio::test]
async fn tampered_body_is_rejected() {
    let mut req = signed("POST", "/v1/users", r#"{"first_name":"Chip"}"#);
    *req.body_mut() = r#"{"first_name":"Mallory"}"#.to_string();
    let resp = test_app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let payload = body_json(resp).await;
    assert_eq!(payload["message"], "invalid signature");
}

#[tokio::test]
async fn signature_covers_the_full_request_path() {
    // an HMAC over the path with the /v1 prefix stripped must not pass
    let mut req = signed("GET", "/v1/users", "");
    let url = format!("http://{HOST}/users");
    let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
    mac.update(url.as_bytes());
    mac.update(EPOCH.as_bytes());
    let forged = hex::encode(mac.finalize().into_bytes());
    req.headers_mut()
        .insert("X_STILT_HMAC", forged.parse().unwrap());

    let resp = test_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["message"], "invalid signature");
}

#[tokio::test]
async fn body_whitespace_does_not_break_the_signature() {
    let req = signed(
        "POST",
        "/v1/users",
        "{ \"first_name\": \"Chip\",\n  \"user_type\": \"CONSUMER\" }",
    );
    let resp = test_app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}

// --- users ---

#[tokio::test]
async fn list_users_empty_envelope() {
    let resp = test_app()
        .oneshot(signed("GET", "/v1/users", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let payload = body_json(resp).await;
    assert_eq!(payload["data"], json!([]));
    assert_eq!(payload["pagination"]["total"], 0);
}

#[tokio::test]
async fn create_user_assigns_uuid_and_echoes_wire_keys() {
    let resp = test_app()
        .oneshot(signed(
            "POST",
            "/v1/users",
            r#"{"user_type":"CONSUMER","first_name":"Chip","last_name":"Chipperson"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let user = body_json(resp).await;
    assert!(user["uuid"].as_str().is_some());
    assert_eq!(user["first_name"], "Chip");
    assert_eq!(user["user_type"], "CONSUMER");
}

#[tokio::test]
async fn missing_user_is_a_json_404() {
    let resp = test_app()
        .oneshot(signed("GET", "/v1/users/nope", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let payload = body_json(resp).await;
    assert_eq!(payload["message"], "not found");
}

#[tokio::test]
async fn delete_user_returns_confirmation() {
    let app = test_app();
    let resp = app
        .clone()
        .oneshot(signed("POST", "/v1/users", r#"{"first_name":"Chip"}"#))
        .await
        .unwrap();
    let user = body_json(resp).await;
    let uuid = user["uuid"].as_str().unwrap();

    let resp = app
        .oneshot(signed("DELETE", &format!("/v1/users/{uuid}"), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!("deleted"));
}

// --- loc lifecycle ---

#[tokio::test]
async fn application_through_statement_flow() {
    let app = test_app();
    let resp = app
        .clone()
        .oneshot(signed("POST", "/v1/users", r#"{"first_name":"Chip"}"#))
        .await
        .unwrap();
    let user_id = body_json(resp).await["uuid"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(signed(
            "POST",
            &format!("/v1/users/{user_id}/loc/applications"),
            r#"{"amount":5000.0}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let loc = body_json(resp).await;
    let offer_id = loc["offers"][0]["uuid"].as_str().unwrap().to_string();
    assert_eq!(loc["status"]["name"], "PENDING");

    // activation addresses the offer uuid, not the loc uuid
    let resp = app
        .clone()
        .oneshot(signed(
            "PATCH",
            &format!("/v1/users/{user_id}/loc/{offer_id}"),
            r#"{"status":"ACTIVE","document_uuid":"doc-1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ACTIVE");

    let resp = app
        .clone()
        .oneshot(signed(
            "POST",
            &format!("/v1/users/{user_id}/loc/{offer_id}/draw"),
            r#"{"amount":1500.0}"#,
        ))
        .await
        .unwrap();
    let summary = body_json(resp).await;
    assert_eq!(summary["available_credit"], 3500.0);
    assert_eq!(summary["current_credit"], 1500.0);

    let resp = app
        .clone()
        .oneshot(signed(
            "POST",
            &format!("/v1/users/{user_id}/loc/{offer_id}/payments"),
            r#"{"amount":500.0,"payment_type":"ACH","payment_date":"2024-01-20"}"#,
        ))
        .await
        .unwrap();
    let receipt = body_json(resp).await;
    assert_eq!(receipt["available_credit"], 4000.0);
    assert!(receipt["repayment_uuid"].as_str().is_some());

    let resp = app
        .clone()
        .oneshot(signed(
            "GET",
            &format!("/v1/users/{user_id}/loc/{offer_id}/statements"),
            "",
        ))
        .await
        .unwrap();
    let statement = body_json(resp).await;
    assert_eq!(statement["data"]["credit_limit"], 5000.0);
    assert_eq!(statement["data"]["current_credit"], 1000.0);

    // the repayment produced a webhook message
    let resp = app
        .oneshot(signed("GET", "/v1/webhooks/endpoints/messages", ""))
        .await
        .unwrap();
    let messages = body_json(resp).await;
    assert_eq!(messages["pagination"]["total"], 1);
    assert_eq!(messages["data"][0]["event"], "payment.updated");
}

// --- webhooks ---

#[tokio::test]
async fn endpoint_list_is_a_bare_array() {
    let app = test_app();
    let resp = app
        .clone()
        .oneshot(signed(
            "POST",
            "/v1/webhooks/endpoints",
            r#"{"url":"https://hooks.example.com/onbo"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .oneshot(signed("GET", "/v1/webhooks/endpoints", ""))
        .await
        .unwrap();
    let endpoints = body_json(resp).await;
    let list = endpoints.as_array().expect("bare array");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["url"], "https://hooks.example.com/onbo");
}
