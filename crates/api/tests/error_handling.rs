//! Error-path integration tests: generation proxy failures, credit
//! enforcement, and the shared error envelope.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_user, create_user_with_credits, get_anon, post_json,
};
use lumen_db::repositories::UserRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_generation_endpoint_rejected(pool: PgPool) {
    let (_, token) = create_user(&pool, "gen_typo").await;

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/generate/text2video",
        &token,
        serde_json::json!({"prompt": "a cat"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("text2video"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insufficient_credits_blocks_before_upstream(pool: PgPool) {
    let (_, token) = create_user_with_credits(&pool, "broke", 0).await;

    // The diffusion base URL points at a closed port, so reaching the
    // upstream call would produce a 500; a 403 proves the credit check
    // fires first.
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/generate/text2image",
        &token,
        serde_json::json!({"prompt": "a cat"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
    assert_eq!(json["error"], "Insufficient credits");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unreachable_upstream_maps_to_upstream_error(pool: PgPool) {
    let (user, token) = create_user(&pool, "stranded").await;
    let before = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/generate/text2image",
        &token,
        serde_json::json!({"prompt": "a cat"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"], "Generation service is unreachable");

    // Transport failures must not burn credits.
    let after = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(after.credits, before.credits);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_result_poll_requires_id(pool: PgPool) {
    let (_, token) = create_user(&pool, "poller").await;

    let app = build_test_app(pool);
    let response = common::get(app, "/api/v1/generate/result?id=", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get_anon(app, "/api/v1/nonexistent").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
