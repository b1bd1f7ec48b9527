//! HTTP-level integration tests for the `/prompts` library.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_user, delete, get, post_empty, post_json, put_json};
use sqlx::PgPool;

async fn create_prompt(pool: &PgPool, token: &str, body: serde_json::Value) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/prompts", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_normalizes_and_dedupes_tags(pool: PgPool) {
    let (_, token) = create_user(&pool, "prompt_author").await;

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/prompts",
        &token,
        serde_json::json!({
            "title": "Neon city",
            "content": "a neon-lit street at night",
            "tags": ["Cyberpunk", " cyberpunk ", "NIGHT"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let tags: Vec<&str> = json["data"]["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t.as_str().unwrap())
        .collect();
    assert_eq!(tags, vec!["cyberpunk", "night"]);
    assert_eq!(json["data"]["useCount"], 0);
    assert_eq!(json["data"]["isFavorite"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_requires_title_and_content(pool: PgPool) {
    let (_, token) = create_user(&pool, "blank_author").await;

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/prompts",
        &token,
        serde_json::json!({"title": "No body", "content": "  "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_and_search(pool: PgPool) {
    let (_, token) = create_user(&pool, "librarian").await;

    create_prompt(
        &pool,
        &token,
        serde_json::json!({"title": "Portrait study", "content": "oil painting portrait", "category": "portrait"}),
    )
    .await;
    let landscape_id = create_prompt(
        &pool,
        &token,
        serde_json::json!({"title": "Mountain vista", "content": "alpine landscape at dawn", "category": "landscape"}),
    )
    .await;

    // Category filter.
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/prompts?category=landscape", &token).await;
    let json = body_json(response).await;
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"].as_i64(), Some(landscape_id));

    // Search matches content too, case-insensitively.
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/prompts?search=ALPINE", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["total"], 1);

    // Favorite filter starts empty.
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/prompts?favorite=true", &token).await;
    let json = body_json(response).await;
    assert!(json["data"]["items"].as_array().unwrap().is_empty());

    // Another user sees none of these prompts.
    let (_, other_token) = create_user(&pool, "other_librarian").await;
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/prompts", &other_token).await;
    let json = body_json(response).await;
    assert!(json["data"]["items"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_favorite_toggle_and_use_counter(pool: PgPool) {
    let (_, token) = create_user(&pool, "toggler").await;
    let id = create_prompt(
        &pool,
        &token,
        serde_json::json!({"title": "Reusable", "content": "a versatile base prompt"}),
    )
    .await;

    let app = build_test_app(pool.clone());
    let response = post_empty(app, &format!("/api/v1/prompts/{id}/favorite"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["isFavorite"], true);

    let app = build_test_app(pool.clone());
    let response = post_empty(app, &format!("/api/v1/prompts/{id}/favorite"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["isFavorite"], false);

    let app = build_test_app(pool.clone());
    post_empty(app, &format!("/api/v1/prompts/{id}/use"), &token).await;
    let app = build_test_app(pool);
    let response = post_empty(app, &format!("/api/v1/prompts/{id}/use"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["useCount"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ownership_guards(pool: PgPool) {
    let (_, owner_token) = create_user(&pool, "p_owner").await;
    let (_, other_token) = create_user(&pool, "p_other").await;

    let private_id = create_prompt(
        &pool,
        &owner_token,
        serde_json::json!({"title": "Private", "content": "hidden prompt"}),
    )
    .await;
    let public_id = create_prompt(
        &pool,
        &owner_token,
        serde_json::json!({"title": "Shared", "content": "public prompt", "isPublic": true}),
    )
    .await;

    // Private prompt: 403 for others.
    let app = build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/prompts/{private_id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Public prompt: readable and usable by others, but not editable.
    let app = build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/prompts/{public_id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = build_test_app(pool.clone());
    let response = post_empty(app, &format!("/api/v1/prompts/{public_id}/use"), &other_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/prompts/{public_id}"),
        &other_token,
        serde_json::json!({"title": "Hijacked"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = build_test_app(pool);
    let response = delete(app, &format!("/api/v1/prompts/{public_id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_and_tag_aggregates(pool: PgPool) {
    let (_, token) = create_user(&pool, "aggregator").await;

    for i in 0..2 {
        create_prompt(
            &pool,
            &token,
            serde_json::json!({
                "title": format!("Portrait {i}"),
                "content": "portrait prompt",
                "category": "portrait",
                "tags": ["face"]
            }),
        )
        .await;
    }
    create_prompt(
        &pool,
        &token,
        serde_json::json!({"title": "Loose", "content": "no category", "tags": ["face", "loose"]}),
    )
    .await;

    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/prompts/categories", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let categories = json["data"].as_array().unwrap();
    assert_eq!(categories[0]["category"], "portrait");
    assert_eq!(categories[0]["count"], 2);
    assert!(categories
        .iter()
        .any(|c| c["category"] == "uncategorized" && c["count"] == 1));

    let app = build_test_app(pool);
    let response = get(app, "/api/v1/prompts/tags", &token).await;
    let json = body_json(response).await;
    let tags = json["data"].as_array().unwrap();
    assert_eq!(tags[0]["tag"], "face");
    assert_eq!(tags[0]["count"], 3);
    assert!(tags.iter().any(|t| t["tag"] == "loose" && t["count"] == 1));
}
