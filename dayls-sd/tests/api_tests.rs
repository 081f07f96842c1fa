//! Integration tests for dayls-sd API endpoints
//!
//! Each test runs against a fresh SQLite database in a temp directory and
//! drives the router directly with `tower::ServiceExt::oneshot`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

use dayls_common::db::init_database;
use dayls_sd::{build_router, AppState};

/// Test helper: fresh database and router; the TempDir must stay alive
async fn setup_app() -> (axum::Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("dayls.db"))
        .await
        .expect("Should initialize test database");
    (build_router(AppState::new(pool)), dir)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn put_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// A day with two out-of-order hourly blocks and one instructor event
fn sample_schedule() -> Value {
    json!({
        "hourlyBlocks": [
            {
                "id": "7f3a4b5c-6d7e-8f90-a1b2-c3d4e5f60718",
                "startTime": "2:00 PM",
                "endTime": "3:00 PM",
                "activities": [{
                    "id": "1a2b3c4d-5e6f-7081-92a3-b4c5d6e7f809",
                    "name": "Stage Craft",
                    "notes": "",
                    "performers": [{
                        "id": "090a0b0c-0d0e-0f10-1112-131415161718",
                        "name": "Mila Chen",
                        "roles": "Vocals",
                        "type": "Trial",
                        "notes": ""
                    }],
                    "ageGroup": "TN",
                    "level": "1",
                    "roomName": "ACC"
                }]
            },
            {
                "id": "8c5f1b8e-6f6a-4bb4-9fd2-3f1a2b3c4d5e",
                "startTime": "11:00 AM",
                "endTime": "12:00 PM",
                "activities": [{
                    "id": "0d9e8f7a-1b2c-3d4e-5f60-718293a4b5c6",
                    "name": "Band Lab",
                    "notes": "bring sticks",
                    "performers": [
                        {
                            "id": "d4c3b2a1-0f9e-8d7c-6b5a-493827161504",
                            "name": "Ayaan Raj",
                            "roles": "Drums",
                            "type": "Class",
                            "notes": "solid timing"
                        },
                        {
                            "id": "a1a2a3a4-b1b2-c1c2-d1d2-e1e2e3e4e5e6",
                            "name": "!!!",
                            "roles": "",
                            "type": null,
                            "notes": ""
                        },
                        {
                            "id": "f1f2f3f4-0102-0304-0506-0708090a0b0c",
                            "name": "",
                            "roles": "",
                            "type": null,
                            "notes": ""
                        }
                    ],
                    "ageGroup": "JR",
                    "level": "2",
                    "roomName": "JAM"
                }]
            }
        ],
        "instructors": [{
            "id": "11111111-2222-3333-4444-555555555555",
            "name": "Priya",
            "type": "Teacher",
            "timeSlot": "10:00 AM",
            "status": "Entered"
        }]
    })
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _dir) = setup_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "dayls-sd");
    assert!(body["version"].is_string());
}

// =============================================================================
// Schedule load/save
// =============================================================================

#[tokio::test]
async fn test_load_missing_schedule_is_404() {
    let (app, _dir) = setup_app().await;

    let response = app.oneshot(get("/api/schedule/2024-06-10")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("2024-06-10"));
}

#[tokio::test]
async fn test_save_reports_derived_counts() {
    let (app, _dir) = setup_app().await;

    let response = app
        .oneshot(put_json("/api/schedule/2024-06-10", &sample_schedule()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["date"], "2024-06-10");
    assert_eq!(body["classesUpserted"], 2);
    // "!!!" slugs to empty and the unnamed performer is skipped
    assert_eq!(body["performersUpserted"], 2);
    assert_eq!(body["historyAppended"], 2);
}

#[tokio::test]
async fn test_save_then_load_orders_blocks() {
    let (app, _dir) = setup_app().await;

    let save = app
        .clone()
        .oneshot(put_json("/api/schedule/2024-06-10", &sample_schedule()))
        .await
        .unwrap();
    assert_eq!(save.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/schedule/2024-06-10")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let blocks = body["schedule"]["hourlyBlocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 2);
    // Stored out of order; returned in schedule order
    assert_eq!(blocks[0]["startTime"], "11:00 AM");
    assert_eq!(blocks[1]["startTime"], "2:00 PM");
    assert_eq!(body["schedule"]["instructors"][0]["name"], "Priya");
}

#[tokio::test]
async fn test_resave_updates_classes_but_appends_history() {
    let (app, _dir) = setup_app().await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(put_json("/api/schedule/2024-06-10", &sample_schedule()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Classes dedupe under the composite key
    let response = app
        .clone()
        .oneshot(get("/api/classes/search?date=2024-06-10"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total"], 2);

    // History appends fresh rows per save
    let response = app
        .oneshot(get("/api/performers/Ayaan%20Raj/history"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["entries"].as_array().unwrap().len(), 2);
}

// =============================================================================
// Performers
// =============================================================================

#[tokio::test]
async fn test_performers_list_sorted() {
    let (app, _dir) = setup_app().await;

    let save = app
        .clone()
        .oneshot(put_json("/api/schedule/2024-06-10", &sample_schedule()))
        .await
        .unwrap();
    assert_eq!(save.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/performers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["performers"], json!(["Ayaan Raj", "Mila Chen"]));
}

#[tokio::test]
async fn test_performer_history_fields() {
    let (app, _dir) = setup_app().await;

    let save = app
        .clone()
        .oneshot(put_json("/api/schedule/2024-06-10", &sample_schedule()))
        .await
        .unwrap();
    assert_eq!(save.status(), StatusCode::OK);

    let response = app
        .oneshot(get("/api/performers/Ayaan%20Raj/history"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["performerId"], "ayaan-raj");
    let entry = &body["entries"][0];
    assert_eq!(entry["date"], "2024-06-10");
    assert_eq!(entry["startTime"], "11:00 AM");
    assert_eq!(entry["activityName"], "Band Lab");
    assert_eq!(entry["roles"], "Drums");
    assert_eq!(entry["kind"], "Class");
    assert_eq!(entry["classType"], "J2");
    // 2024-06-10 is a Monday
    assert_eq!(entry["classLabel"], "MON-11AM-J2-JAM");
}

#[tokio::test]
async fn test_performer_history_empty_is_ok() {
    let (app, _dir) = setup_app().await;

    let response = app
        .oneshot(get("/api/performers/Nobody/history"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["entries"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_insight_without_history_is_404() {
    let (app, _dir) = setup_app().await;

    let response = app
        .oneshot(post("/api/performers/Nobody/insight"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_insight_without_api_key_is_503() {
    let (app, _dir) = setup_app().await;

    let save = app
        .clone()
        .oneshot(put_json("/api/schedule/2024-06-10", &sample_schedule()))
        .await
        .unwrap();
    assert_eq!(save.status(), StatusCode::OK);

    // Default settings ship with an empty key, so no upstream call happens
    let response = app
        .oneshot(post("/api/performers/Ayaan%20Raj/insight"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("insight_api_key"));
}

// =============================================================================
// Class search
// =============================================================================

#[tokio::test]
async fn test_class_search_requires_criteria() {
    let (app, _dir) = setup_app().await;

    let response = app.oneshot(get("/api/classes/search")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("criteria"));
}

#[tokio::test]
async fn test_class_search_filters_and_normalizes_time() {
    let (app, _dir) = setup_app().await;

    let save = app
        .clone()
        .oneshot(put_json("/api/schedule/2024-06-10", &sample_schedule()))
        .await
        .unwrap();
    assert_eq!(save.status(), StatusCode::OK);

    // Raw "11am" must match the stored "11:00 AM"
    let response = app
        .clone()
        .oneshot(get("/api/classes/search?start_time=11am"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total"], 1);
    let hit = &body["classes"][0];
    assert_eq!(hit["id"], "2024-06-10-MON-11AM-J2-JAM");
    assert_eq!(hit["activityName"], "Band Lab");
    assert_eq!(hit["performers"][0]["name"], "Ayaan Raj");

    // Unmatched filter combination returns an empty set, not an error
    let response = app
        .oneshot(get("/api/classes/search?room=ACC&age_group=JR"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total"], 0);
}

// =============================================================================
// Clock preview
// =============================================================================

#[tokio::test]
async fn test_clock_preview() {
    let (app, _dir) = setup_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/clock/preview?value=1.30pm"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["canonical"], "01:30 PM");
    assert_eq!(body["sortKey"], 13 * 60 + 30);
    assert_eq!(body["compact"], "130PM");
}

#[tokio::test]
async fn test_clock_preview_garbage_passes_through() {
    let (app, _dir) = setup_app().await;

    let response = app
        .oneshot(get("/api/clock/preview?value=noonish"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["canonical"], "noonish");
    assert!(body["sortKey"].is_null());
    assert_eq!(body["compact"], "noonish");
}
