//! Integration tests for event edits.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, post_json, post_multipart, put_json_auth, put_multipart, token, MultipartBody,
};
use serde_json::json;
use sqlx::PgPool;

async fn create_event(test: &common::TestApp) -> serde_json::Value {
    let response = post_multipart(
        test.app(),
        "/api/v1/events",
        MultipartBody::new()
            .text("title", "Opening night")
            .text("event_date", "2025-03-07")
            .text("venue", "Main Hall")
            .text("description", "Old text"),
        &token("editor"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Test: optional fields can be cleared
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_fields_clear_venue_and_description(pool: PgPool) {
    let test = common::build_test_app(pool);
    let event = create_event(&test).await;
    let id = event["id"].as_i64().unwrap();
    assert_eq!(event["venue"], "Main Hall");

    let response = put_multipart(
        test.app(),
        &format!("/api/v1/events/{id}"),
        MultipartBody::new()
            .text("venue", "")
            .text("description", ""),
        &token("editor"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await["data"].clone();
    assert!(updated["venue"].is_null());
    assert!(updated["description"].is_null());
    assert_eq!(updated["title"], "Opening night");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn omitted_fields_are_kept(pool: PgPool) {
    let test = common::build_test_app(pool);
    let event = create_event(&test).await;
    let id = event["id"].as_i64().unwrap();

    let response = put_multipart(
        test.app(),
        &format!("/api/v1/events/{id}"),
        MultipartBody::new().text("title", "Closing night"),
        &token("editor"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["title"], "Closing night");
    assert_eq!(updated["venue"], "Main Hall");
    assert_eq!(updated["description"], "Old text");
}

// ---------------------------------------------------------------------------
// Test: JSON edits distinguish null from absent
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn submission_null_clears_and_absent_keeps(pool: PgPool) {
    let test = common::build_test_app(pool);
    let response = post_json(
        test.app(),
        "/api/v1/submissions",
        json!({
            "film_title": "River",
            "director": "A. Director",
            "email": "a@example.com",
            "phone": "+44 1234",
            "country": "UK",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        test.app(),
        &format!("/api/v1/submissions/{id}"),
        json!({ "phone": null, "country": " " }),
        &token("editor"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert!(updated["phone"].is_null());
    assert!(updated["country"].is_null());
    assert_eq!(updated["film_title"], "River");

    let response = put_json_auth(
        test.app(),
        &format!("/api/v1/submissions/{id}"),
        json!({ "synopsis": "A film about a river." }),
        &token("editor"),
    )
    .await;
    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["synopsis"], "A film about a river.");
    assert!(updated["phone"].is_null());
}
