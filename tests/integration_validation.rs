//! Input-validation and gating paths. None of these reach the database, so
//! they run against the lazy pool without Postgres.

use reqwest::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn create_entry_requires_employee_id() {
    let app = common::TestApp::spawn().await;

    for payload in [json!({}), json!({ "employeeId": "   " }), json!({ "note": "no id" })] {
        let resp = app.client.post(format!("{}/createEntry", app.server_url)).json(&payload).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "EMPLOYEE_REQUIRED", "payload: {payload}");
    }
}

#[tokio::test]
async fn malformed_bodies_still_get_structured_errors() {
    let app = common::TestApp::spawn().await;

    // An unparseable body is tolerated as an empty payload, so field
    // validation answers with the usual JSON error shape.
    let resp = app
        .client
        .post(format!("{}/createEntry", app.server_url))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "EMPLOYEE_REQUIRED");
    assert!(body["message"].is_string());

    // Same for a body-less request and for login.
    let resp = app.client.post(format!("{}/completeEntry", app.server_url)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "ENTRY_ID_REQUIRED");

    let resp = app.client.post(format!("{}/login", app.server_url)).body("{broken").send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "MISSING_FIELDS");
}

#[tokio::test]
async fn create_entry_rejects_unparseable_start() {
    let app = common::TestApp::spawn().await;

    let resp = app
        .client
        .post(format!("{}/createEntry", app.server_url))
        .json(&json!({ "employeeId": "E1", "startedAt": "not-a-date" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "INVALID_START");
}

#[tokio::test]
async fn complete_entry_requires_a_usable_reference() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.post(format!("{}/completeEntry", app.server_url)).json(&json!({})).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "ENTRY_ID_REQUIRED");

    let resp = app
        .client
        .post(format!("{}/completeEntry", app.server_url))
        .json(&json!({ "entryId": "not-a-uuid" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "INVALID_ENTRY_ID");
}

#[tokio::test]
async fn login_requires_both_fields() {
    let app = common::TestApp::spawn().await;

    for payload in [json!({}), json!({ "username": "alice" }), json!({ "contraseña": "secret" })] {
        let resp = app.client.post(format!("{}/login", app.server_url)).json(&payload).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {payload}");
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "MISSING_FIELDS");
    }
}

#[tokio::test]
async fn create_user_rejects_bad_setup_token() {
    let app = common::TestApp::spawn().await;

    // Wrong token, canonical field names.
    let resp = app
        .client
        .post(format!("{}/createUser", app.server_url))
        .header("x-setup-token", "wrong")
        .json(&json!({ "username": "alice", "password": "secret" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "UNAUTHORIZED");

    // Missing header, Spanish aliases still parse.
    let resp = app
        .client
        .post(format!("{}/createUser", app.server_url))
        .json(&json!({ "usuario": "alice", "contraseña": "secret", "nombre": "Alice" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_user_requires_fields_even_with_valid_token() {
    let app = common::TestApp::spawn().await;

    let resp = app
        .client
        .post(format!("{}/createUser", app.server_url))
        .header("x-setup-token", common::TEST_SETUP_TOKEN)
        .json(&serde_json::json!({ "username": "alice" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "MISSING_FIELDS");
}

#[tokio::test]
async fn create_user_is_disabled_without_configured_secret() {
    let app = common::TestApp::spawn_without_setup_token().await;

    // Any token must be rejected when no secret is configured.
    let resp = app
        .client
        .post(format!("{}/createUser", app.server_url))
        .header("x-setup-token", "anything")
        .json(&json!({ "username": "alice", "password": "secret" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "CONFIG_ERROR");
}
