//! Shift lifecycle against a real database. Run with a reachable Postgres:
//! `DATABASE_URL=postgres://... cargo test -- --ignored`

use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

mod common;

fn unique_employee(prefix: &str) -> String {
    format!("{prefix}_{}", &Uuid::new_v4().to_string()[..8])
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn create_then_complete_lifecycle() {
    let app = common::TestApp::spawn_with_db().await;
    let employee = unique_employee("lifecycle");

    let resp = app
        .client
        .post(format!("{}/createEntry", app.server_url))
        .json(&json!({ "employeeId": employee, "note": "montaje" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(created["status"], "OPEN");
    assert_eq!(created["employeeId"], employee);
    assert_eq!(created["note"], "montaje");
    assert!(created["checkOut"].is_null());
    assert!(created["workedMinutes"].is_null());
    let entry_id = created["id"].as_str().expect("id assigned").to_string();

    let resp = app
        .client
        .post(format!("{}/completeEntry", app.server_url))
        .json(&json!({ "employeeId": employee }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let completed: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(completed["id"], entry_id.as_str());
    assert_eq!(completed["status"], "COMPLETED");
    assert!(!completed["checkOut"].is_null());
    // Same-instant completion clamps to the one-minute minimum.
    assert!(completed["workedMinutes"].as_i64().unwrap() >= 1);
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn second_open_shift_is_a_conflict() {
    let app = common::TestApp::spawn_with_db().await;
    let employee = unique_employee("conflict");

    let resp = app
        .client
        .post(format!("{}/createEntry", app.server_url))
        .json(&json!({ "employeeId": employee }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .client
        .post(format!("{}/createEntry", app.server_url))
        .json(&json!({ "employeeId": employee }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "SHIFT_ALREADY_OPEN");
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn explicit_timestamps_drive_the_duration_policy() {
    let app = common::TestApp::spawn_with_db().await;
    let employee = unique_employee("duration");

    let resp = app
        .client
        .post(format!("{}/createEntry", app.server_url))
        .json(&json!({ "employeeId": employee, "startedAt": "2026-08-30T08:00:00Z" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = resp.json().await.unwrap();

    // 90 seconds of work rounds up to two whole minutes.
    let resp = app
        .client
        .post(format!("{}/completeEntry", app.server_url))
        .json(&json!({ "entryId": created["id"], "endedAt": "2026-08-30T08:01:30Z" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let completed: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(completed["workedMinutes"], 2);
    assert_eq!(completed["workedHours"], 0.03);
    assert_eq!(completed["date"], "2026-08-30");
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn completing_twice_fails_and_keeps_the_first_result() {
    let app = common::TestApp::spawn_with_db().await;
    let employee = unique_employee("twice");

    let resp = app
        .client
        .post(format!("{}/createEntry", app.server_url))
        .json(&json!({ "employeeId": employee }))
        .send()
        .await
        .unwrap();
    let created: serde_json::Value = resp.json().await.unwrap();

    let resp = app
        .client
        .post(format!("{}/completeEntry", app.server_url))
        .json(&json!({ "entryId": created["id"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let first: serde_json::Value = resp.json().await.unwrap();

    let resp = app
        .client
        .post(format!("{}/completeEntry", app.server_url))
        .json(&json!({ "entryId": created["id"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "ENTRY_NOT_FOUND");

    // The first completion is unchanged and still retrievable.
    let resp = app
        .client
        .get(format!("{}/listEntries?employeeId={employee}", app.server_url))
        .send()
        .await
        .unwrap();
    let entries: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["checkOut"], first["checkOut"]);
    assert_eq!(entries[0]["workedMinutes"], first["workedMinutes"]);
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn completing_without_an_open_shift_is_not_found() {
    let app = common::TestApp::spawn_with_db().await;

    let resp = app
        .client
        .post(format!("{}/completeEntry", app.server_url))
        .json(&json!({ "employeeId": unique_employee("noshift") }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "ENTRY_NOT_FOUND");
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn list_entries_orders_newest_first_and_clamps_the_limit() {
    let app = common::TestApp::spawn_with_db().await;
    let employee = unique_employee("listing");

    for i in 0..3 {
        let start = format!("2026-08-1{i}T08:00:00Z");
        let end = format!("2026-08-1{i}T16:00:00Z");
        let resp = app
            .client
            .post(format!("{}/createEntry", app.server_url))
            .json(&json!({ "employeeId": employee, "startedAt": start }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: serde_json::Value = resp.json().await.unwrap();

        let resp = app
            .client
            .post(format!("{}/completeEntry", app.server_url))
            .json(&json!({ "entryId": created["id"], "endedAt": end }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = app
        .client
        .get(format!("{}/listEntries?employeeId={employee}", app.server_url))
        .send()
        .await
        .unwrap();
    let entries: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert_eq!(entries.len(), 3);
    let dates: Vec<&str> = entries.iter().map(|e| e["date"].as_str().unwrap()).collect();
    assert_eq!(dates, vec!["2026-08-12", "2026-08-11", "2026-08-10"]);

    // Lenient limit parsing: clamp and default.
    let resp = app
        .client
        .get(format!("{}/listEntries?employeeId={employee}&limit=2", app.server_url))
        .send()
        .await
        .unwrap();
    let entries: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert_eq!(entries.len(), 2);

    let resp = app
        .client
        .get(format!("{}/listEntries?employeeId={employee}&limit=banana", app.server_url))
        .send()
        .await
        .unwrap();
    let entries: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert_eq!(entries.len(), 3);
}
