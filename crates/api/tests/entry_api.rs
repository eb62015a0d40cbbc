//! HTTP-level integration tests for the entry endpoints.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth, register_user};
use sqlx::PgPool;

/// Find one of the user's categories by name and return its id.
async fn category_id(app: Router, token: &str, name: &str) -> i64 {
    let response = get_auth(app, "/api/v1/categories", token).await;
    let json = body_json(response).await;
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == name)
        .unwrap_or_else(|| panic!("category {name} should exist"))["id"]
        .as_i64()
        .unwrap()
}

/// Create an entry with categories; returns 201 and the attached
/// categories in the detail payload.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_with_categories(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "alice").await;
    let work = category_id(app.clone(), &token, "Work").await;

    let body = serde_json::json!({
        "entry_date": "2024-06-12",
        "title": "Shipped the release",
        "content": "Deployed to production without incident",
        "mood_rating": 8,
        "category_ids": [work],
    });
    let response = post_json_auth(app, "/api/v1/entries", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Shipped the release");
    assert_eq!(json["data"]["mood_rating"], 8);
    assert_eq!(json["data"]["categories"][0]["name"], "Work");
}

/// An entry with nothing in it is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_empty_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "alice").await;

    let response = post_json_auth(app, "/api/v1/entries", &token, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Mood ratings outside 1-10 are rejected at the API layer.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_mood_out_of_range(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "alice").await;

    for rating in [0, 11] {
        let body = serde_json::json!({ "title": "Mood test", "mood_rating": rating });
        let response = post_json_auth(app.clone(), "/api/v1/entries", &token, body).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "mood {rating} should be rejected"
        );
    }
}

/// Per-field minimum lengths apply only to non-empty fields.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_minimum_lengths(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "alice").await;

    let body = serde_json::json!({ "title": "ab" });
    let response = post_json_auth(app.clone(), "/api/v1/entries", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({ "title": "Gym", "content": "hi" });
    let response = post_json_auth(app.clone(), "/api/v1/entries", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A bare mood rating is a valid entry.
    let body = serde_json::json!({ "mood_rating": 5 });
    let response = post_json_auth(app, "/api/v1/entries", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// A second entry for the same day is a conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_one_entry_per_day(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "alice").await;

    let body = serde_json::json!({ "entry_date": "2024-06-12", "title": "First win" });
    let response = post_json_auth(app.clone(), "/api/v1/entries", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({ "entry_date": "2024-06-12", "title": "Second win" });
    let response = post_json_auth(app, "/api/v1/entries", &token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "You can only have one entry per day.");
}

/// Assigning another user's category is rejected without writing
/// anything.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cross_user_category_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (alice_token, _) = register_user(app.clone(), "alice").await;
    let (bob_token, _) = register_user(app.clone(), "bob").await;
    let bobs_work = category_id(app.clone(), &bob_token, "Work").await;

    let body = serde_json::json!({
        "title": "Sneaky entry",
        "category_ids": [bobs_work],
    });
    let response = post_json_auth(app, "/api/v1/entries", &alice_token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "You can only assign your own categories to your entries."
    );
}

/// Another user's entry is a 404 on read, update, and delete.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cross_user_entry_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (alice_token, _) = register_user(app.clone(), "alice").await;
    let (bob_token, _) = register_user(app.clone(), "bob").await;

    let body = serde_json::json!({ "title": "Private win" });
    let response = post_json_auth(app.clone(), "/api/v1/entries", &alice_token, body).await;
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();

    let response = get_auth(app.clone(), &format!("/api/v1/entries/{id}"), &bob_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = serde_json::json!({ "title": "Hijacked" });
    let response =
        put_json_auth(app.clone(), &format!("/api/v1/entries/{id}"), &bob_token, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, &format!("/api/v1/entries/{id}"), &bob_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// The list is paginated 10 per page, newest first, with filters.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_pagination_and_filters(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "alice").await;
    let work = category_id(app.clone(), &token, "Work").await;

    for day in 1..=12 {
        let body = serde_json::json!({
            "entry_date": format!("2024-06-{day:02}"),
            "title": format!("Win on day {day}"),
        });
        let response = post_json_auth(app.clone(), "/api/v1/entries", &token, body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        if day == 3 {
            let json = body_json(response).await;
            let id = json["data"]["id"].as_i64().unwrap();
            let body = serde_json::json!({ "category_ids": [work] });
            put_json_auth(app.clone(), &format!("/api/v1/entries/{id}"), &token, body).await;
        }
    }

    let response = get_auth(app.clone(), "/api/v1/entries", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 12);
    assert_eq!(json["pages"], 2);
    assert_eq!(json["page"], 1);
    assert_eq!(json["data"].as_array().unwrap().len(), 10);
    assert_eq!(json["data"][0]["entry_date"], "2024-06-12");

    let response = get_auth(app.clone(), "/api/v1/entries?page=2", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let response = get_auth(app.clone(), &format!("/api/v1/entries?category={work}"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["entry_date"], "2024-06-03");

    let response = get_auth(app, "/api/v1/entries?q=day%2011", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
}

/// Update changes fields in place and can clear the mood with null.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "alice").await;

    let body = serde_json::json!({ "title": "Original title", "mood_rating": 6 });
    let response = post_json_auth(app.clone(), "/api/v1/entries", &token, body).await;
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();

    let body = serde_json::json!({ "title": "Updated title", "mood_rating": null });
    let response = put_json_auth(app, &format!("/api/v1/entries/{id}"), &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Updated title");
    assert_eq!(json["data"]["mood_rating"], serde_json::Value::Null);
}

/// An update may not empty the entry out entirely.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_cannot_empty_entry(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "alice").await;

    let body = serde_json::json!({ "title": "Only a title" });
    let response = post_json_auth(app.clone(), "/api/v1/entries", &token, body).await;
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();

    let body = serde_json::json!({ "title": "" });
    let response = put_json_auth(app, &format!("/api/v1/entries/{id}"), &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
