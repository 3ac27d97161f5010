//! Integration tests for public inbound forms: contacts, submissions and
//! workshop registrations.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, patch_json_auth, post_json, put_json_auth, token,
};
use serde_json::json;
use sqlx::PgPool;

async fn create_contact(test: &common::TestApp) -> i64 {
    let response = post_json(
        test.app(),
        "/api/v1/contacts",
        json!({
            "name": "Ana",
            "email": "ana@example.com",
            "phone": null,
            "message": "Is there a press pass?"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn public_contact_is_listed_for_editors(pool: PgPool) {
    let test = common::build_test_app(pool);
    create_contact(&test).await;

    let response = get(test.app(), "/api/v1/contacts").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(test.app(), "/api/v1/contacts", &token("viewer")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(test.app(), "/api/v1/contacts", &token("editor")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["name"], "Ana");
    assert_eq!(json["data"][0]["contacted"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn marking_contacted_twice_is_idempotent(pool: PgPool) {
    let test = common::build_test_app(pool);
    let id = create_contact(&test).await;
    let editor = token("editor");
    let uri = format!("/api/v1/contacts/{id}/contacted");

    let first = patch_json_auth(test.app(), &uri, json!({ "contacted": true }), &editor).await;
    assert_eq!(first.status(), StatusCode::OK);
    let first = body_json(first).await;

    let second = patch_json_auth(test.app(), &uri, json!({ "contacted": true }), &editor).await;
    assert_eq!(second.status(), StatusCode::OK);
    let second = body_json(second).await;

    assert_eq!(second["data"]["contacted"], true);
    assert_eq!(first["data"]["updated_at"], second["data"]["updated_at"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_contact_email_is_rejected(pool: PgPool) {
    let test = common::build_test_app(pool);
    let response = post_json(
        test.app(),
        "/api/v1/contacts",
        json!({ "name": "Ana", "email": "not-an-email", "message": "Hello" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("email"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_admin_deletes_contacts(pool: PgPool) {
    let test = common::build_test_app(pool);
    let id = create_contact(&test).await;
    let uri = format!("/api/v1/contacts/{id}");

    let response = delete_auth(test.app(), &uri, &token("editor")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(test.app(), &uri, &token("admin")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(test.app(), &uri, &token("admin")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn submission_status_is_validated(pool: PgPool) {
    let test = common::build_test_app(pool);
    let response = post_json(
        test.app(),
        "/api/v1/submissions",
        json!({
            "film_title": "Tide",
            "director": "M. Rivera",
            "email": "rivera@example.com",
            "duration_minutes": 14
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["status"], "pending");
    let id = created["data"]["id"].as_i64().unwrap();

    let editor = token("editor");
    let uri = format!("/api/v1/submissions/{id}");

    let response = put_json_auth(test.app(), &uri, json!({ "status": "archived" }), &editor).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json!({ "status": "shortlisted" });
    let response = put_json_auth(test.app(), &uri, body, &editor).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "shortlisted");
}

// ---------------------------------------------------------------------------
// Registrations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn registration_for_missing_workshop_is_not_found(pool: PgPool) {
    let test = common::build_test_app(pool);
    let response = post_json(
        test.app(),
        "/api/v1/registrations",
        json!({
            "workshop_id": 999999,
            "full_name": "Ben",
            "email": "ben@example.com"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
