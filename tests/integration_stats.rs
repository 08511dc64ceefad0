//! Dashboard counters against a real database. The shared test database is
//! not wiped between runs, so the assertions are deltas rather than
//! absolutes.

use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

mod common;

async fn fetch_stats(app: &common::TestApp) -> serde_json::Value {
    let resp = app.client.get(format!("{}/getStats", app.server_url)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.unwrap()
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn stats_count_pending_and_todays_hours() {
    let app = common::TestApp::spawn_with_db().await;
    let worker = format!("stats_{}", &Uuid::new_v4().to_string()[..8]);
    let idler = format!("stats_{}", &Uuid::new_v4().to_string()[..8]);

    let before = fetch_stats(&app).await;

    // One completed two-hour shift today.
    let resp = app
        .client
        .post(format!("{}/createEntry", app.server_url))
        .json(&json!({ "employeeId": worker }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = resp.json().await.unwrap();

    let check_in = created["checkIn"].as_str().unwrap();
    let ended_at = {
        // Two hours after the recorded check-in.
        let start = time::OffsetDateTime::parse(check_in, &time::format_description::well_known::Rfc3339).unwrap();
        (start + time::Duration::hours(2)).format(&time::format_description::well_known::Rfc3339).unwrap()
    };
    let resp = app
        .client
        .post(format!("{}/completeEntry", app.server_url))
        .json(&json!({ "entryId": created["id"], "endedAt": ended_at }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // And one shift still open.
    let resp = app
        .client
        .post(format!("{}/createEntry", app.server_url))
        .json(&json!({ "employeeId": idler }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let after = fetch_stats(&app).await;

    let pending_delta = after["pending"].as_i64().unwrap() - before["pending"].as_i64().unwrap();
    assert_eq!(pending_delta, 1);

    let hours_delta = after["hoursToday"].as_f64().unwrap() - before["hoursToday"].as_f64().unwrap();
    assert!((hours_delta - 2.0).abs() < 0.05, "expected ~2h delta, got {hours_delta}");
}

#[tokio::test]
#[ignore = "requires a running Postgres (set DATABASE_URL)"]
async fn active_employees_counts_user_records() {
    let app = common::TestApp::spawn_with_db().await;

    let before = fetch_stats(&app).await;

    let username = format!("stats_user_{}", &Uuid::new_v4().to_string()[..8]);
    let resp = app
        .client
        .post(format!("{}/createUser", app.server_url))
        .header("x-setup-token", common::TEST_SETUP_TOKEN)
        .json(&json!({ "username": username, "password": "password123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let after = fetch_stats(&app).await;
    let delta = after["activeEmployees"].as_i64().unwrap() - before["activeEmployees"].as_i64().unwrap();
    assert_eq!(delta, 1);
}
