//! HTTP-level integration tests for the `/statistics` endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_user, get};
use lumen_db::models::artwork::CreateArtwork;
use lumen_db::repositories::ArtworkRepo;
use sqlx::PgPool;

fn generation(user_id: i64, image_url: &str, model: &str, parameters: &str) -> CreateArtwork {
    CreateArtwork {
        user_id,
        image_url: image_url.to_string(),
        title: "Untitled".to_string(),
        description: "No description".to_string(),
        prompt: String::new(),
        model: model.to_string(),
        parameters: parameters.to_string(),
        is_public: false,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_user_id_forbidden_even_when_absent(pool: PgPool) {
    let (user, token) = create_user(&pool, "stats_user").await;
    let (other, _) = create_user(&pool, "stats_other").await;

    // Existing foreign user: 403.
    let app = build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/statistics?userId={}", other.id), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Nonexistent foreign user: still 403, not 404.
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/statistics?userId=999999", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Missing userId: 400.
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/statistics", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let _ = user;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_statistics_shape(pool: PgPool) {
    let (user, token) = create_user(&pool, "no_gens").await;

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/statistics?userId={}", user.id), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["totalGenerations"], 0);
    assert_eq!(data["avgPerActiveDay"], 0.0);
    assert_eq!(data["weekdayCounts"].as_array().unwrap().len(), 7);
    assert!(data["mostActiveDay"].is_null());
    // Five known model slots plus the "other" bucket.
    assert_eq!(data["modelUsage"].as_array().unwrap().len(), 6);
    assert_eq!(data["generationTime"]["total"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_statistics_aggregate_models_and_timings(pool: PgPool) {
    let (user, token) = create_user(&pool, "gen_heavy").await;

    ArtworkRepo::create(
        &pool,
        &generation(user.id, "img/g1.png", "flux-pro", r#"{"timings":{"total_secs":12.0}}"#),
    )
    .await
    .unwrap();
    ArtworkRepo::create(
        &pool,
        &generation(user.id, "img/g2.png", "flux-pro", r#"{"timings":{"total_secs":8.0}}"#),
    )
    .await
    .unwrap();
    // Unknown model with no timing data: buckets as "other", timing
    // defaults to the 5.0s placeholder.
    ArtworkRepo::create(&pool, &generation(user.id, "img/g3.png", "mystery-model", "{}"))
        .await
        .unwrap();

    let app = build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/statistics?userId={}&timeRange=week", user.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["totalGenerations"], 3);
    // All rows were created just now, on a single calendar date.
    assert_eq!(data["avgPerActiveDay"], 3.0);
    assert!(!data["mostActiveDay"].is_null());

    let models = data["modelUsage"].as_array().unwrap();
    assert_eq!(models[0]["model"], "flux-pro");
    assert_eq!(models[0]["count"], 2);
    assert_eq!(models.last().unwrap()["model"], "other");
    assert_eq!(models.last().unwrap()["count"], 1);

    assert_eq!(data["generationTime"]["total"], 25.0);
    assert_eq!(data["generationTime"]["max"], 12.0);
}
