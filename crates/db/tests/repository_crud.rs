//! Repository-level integration tests against a real schema.

use chrono::{Duration, Utc};
use lumen_db::models::artwork::CreateArtwork;
use lumen_db::models::session::CreateSession;
use lumen_db::models::user::CreateUser;
use lumen_db::repositories::{ArtworkRepo, SessionRepo, TagRepo, UserRepo};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, username: &str, credits: i32) -> lumen_db::models::user::User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "$argon2id$stub".to_string(),
            display_name: None,
            credits,
        },
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn spend_credits_is_atomic_and_bounded(pool: PgPool) {
    let user = seed_user(&pool, "spender", 2).await;

    assert_eq!(
        UserRepo::spend_credits(&pool, user.id, 1).await.unwrap(),
        Some(1)
    );
    assert_eq!(
        UserRepo::spend_credits(&pool, user.id, 1).await.unwrap(),
        Some(0)
    );
    // Insufficient balance leaves the row untouched.
    assert_eq!(UserRepo::spend_credits(&pool, user.id, 1).await.unwrap(), None);

    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.credits, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn active_session_lookup_excludes_revoked_and_expired(pool: PgPool) {
    let user = seed_user(&pool, "session_user", 0).await;

    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            token_hash: "live".to_string(),
            expires_at: Utc::now() + Duration::days(1),
            user_agent: None,
            ip_address: None,
        },
    )
    .await
    .unwrap();
    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            token_hash: "stale".to_string(),
            expires_at: Utc::now() - Duration::hours(1),
            user_agent: None,
            ip_address: None,
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_active_by_token_hash(&pool, "live")
        .await
        .unwrap()
        .is_some());
    assert!(SessionRepo::find_active_by_token_hash(&pool, "stale")
        .await
        .unwrap()
        .is_none());

    let revoked = SessionRepo::revoke_all_for_user(&pool, user.id).await.unwrap();
    assert_eq!(revoked, 2, "every not-yet-revoked session is revoked");
    assert!(SessionRepo::find_active_by_token_hash(&pool, "live")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cleanup_removes_expired_and_revoked_sessions_only(pool: PgPool) {
    let user = seed_user(&pool, "cleanup_user", 0).await;

    for (hash, expires_at) in [
        ("cleanup_live", Utc::now() + Duration::days(1)),
        ("cleanup_expired", Utc::now() - Duration::hours(1)),
        ("cleanup_revoked", Utc::now() + Duration::days(1)),
    ] {
        SessionRepo::create(
            &pool,
            &CreateSession {
                user_id: user.id,
                token_hash: hash.to_string(),
                expires_at,
                user_agent: None,
                ip_address: None,
            },
        )
        .await
        .unwrap();
    }
    sqlx::query("UPDATE user_sessions SET is_revoked = true WHERE token_hash = $1")
        .bind("cleanup_revoked")
        .execute(&pool)
        .await
        .unwrap();

    let removed = SessionRepo::cleanup_expired(&pool).await.unwrap();
    assert_eq!(removed, 2, "expired and revoked rows are deleted");

    // The live session survives the sweep.
    assert!(SessionRepo::find_active_by_token_hash(&pool, "cleanup_live")
        .await
        .unwrap()
        .is_some());
    let remaining =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM user_sessions WHERE user_id = $1")
            .bind(user.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(remaining, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn likes_are_idempotent_at_the_storage_level(pool: PgPool) {
    let artist = seed_user(&pool, "like_artist", 0).await;
    let fan = seed_user(&pool, "like_fan", 0).await;
    let artwork = ArtworkRepo::create(
        &pool,
        &CreateArtwork {
            user_id: artist.id,
            image_url: "img/a.png".to_string(),
            title: "A".to_string(),
            description: String::new(),
            prompt: String::new(),
            model: "sdxl".to_string(),
            parameters: "{}".to_string(),
            is_public: true,
        },
    )
    .await
    .unwrap();

    assert!(ArtworkRepo::like(&pool, artwork.id, fan.id).await.unwrap());
    assert!(!ArtworkRepo::like(&pool, artwork.id, fan.id).await.unwrap());
    assert!(ArtworkRepo::unlike(&pool, artwork.id, fan.id).await.unwrap());
    assert!(!ArtworkRepo::unlike(&pool, artwork.id, fan.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tags_normalize_and_deduplicate_on_attach(pool: PgPool) {
    let artist = seed_user(&pool, "tag_artist", 0).await;
    let artwork = ArtworkRepo::create(
        &pool,
        &CreateArtwork {
            user_id: artist.id,
            image_url: "img/t.png".to_string(),
            title: "T".to_string(),
            description: String::new(),
            prompt: String::new(),
            model: "sdxl".to_string(),
            parameters: "{}".to_string(),
            is_public: true,
        },
    )
    .await
    .unwrap();

    TagRepo::attach_names(
        &pool,
        artwork.id,
        &[
            "Cyberpunk".to_string(),
            " cyberpunk ".to_string(),
            "".to_string(),
            "NIGHT".to_string(),
        ],
    )
    .await
    .unwrap();

    let names = TagRepo::names_for_artwork(&pool, artwork.id).await.unwrap();
    assert_eq!(names, vec!["cyberpunk".to_string(), "night".to_string()]);
}
