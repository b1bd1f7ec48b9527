//! Handlers for the `/artworks` resource: publish, CRUD, likes, comments.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lumen_core::artwork::{normalize_parameters, resolve_description, resolve_title};
use lumen_core::error::CoreError;
use lumen_core::feed::{
    clamp_limit, clamp_offset, has_more, DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT,
};
use lumen_core::types::DbId;
use lumen_db::models::artwork::{Artwork, CreateArtwork};
use lumen_db::models::comment::CreateComment;
use lumen_db::repositories::{ArtworkRepo, CommentRepo, TagRepo};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default model name recorded when the client supplies none.
const DEFAULT_MODEL: &str = "unknown";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /artworks/publish`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub user_id: Option<DbId>,
    pub image_url: Option<String>,
    pub prompt: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub model: Option<String>,
    pub parameters: Option<Value>,
    pub tags: Option<Vec<String>>,
}

/// Request body for `POST /artworks` (save a generation result).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub image_url: String,
    pub prompt: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub model: Option<String>,
    pub parameters: Option<Value>,
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub is_public: bool,
}

/// Query parameters for the caller's artwork listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// "public", "private", or "all" (default).
    pub visibility: Option<String>,
}

/// Request body for `PUT /artworks/{id}/visibility`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityRequest {
    pub is_public: bool,
}

/// Request body for `POST /artworks/{id}/comments`.
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
    pub rating: Option<i32>,
}

/// Paginated envelope for the caller's artwork listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkPage {
    pub items: Vec<Artwork>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

// ---------------------------------------------------------------------------
// Publish / save
// ---------------------------------------------------------------------------

/// POST /api/v1/artworks/publish
///
/// Publish a generated image to the community. Re-publishing the same
/// `(userId, imageUrl)` flips the existing row public (200) instead of
/// inserting a second one (201). The check-then-insert pair is not
/// transactionally guarded; a concurrent identical publish may double-insert.
pub async fn publish(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<PublishRequest>,
) -> AppResult<impl IntoResponse> {
    let user_id = input
        .user_id
        .ok_or_else(|| AppError::BadRequest("userId and imageUrl are required".into()))?;
    let image_url = input
        .image_url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("userId and imageUrl are required".into()))?;

    if user_id != auth_user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot publish another user's artwork".into(),
        )));
    }

    if let Some(existing) = ArtworkRepo::find_by_user_and_image(&state.pool, user_id, &image_url)
        .await?
    {
        let artwork = ArtworkRepo::set_visibility(&state.pool, existing.id, true)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Artwork",
                id: existing.id,
            }))?;
        attach_tags(&state, artwork.id, input.tags.as_deref()).await?;
        return Ok((StatusCode::OK, Json(DataResponse { data: artwork })));
    }

    let artwork = ArtworkRepo::create(
        &state.pool,
        &CreateArtwork {
            user_id,
            image_url,
            title: resolve_title(input.title.as_deref(), input.prompt.as_deref()),
            description: resolve_description(input.description.as_deref(), input.prompt.as_deref()),
            prompt: input.prompt.unwrap_or_default(),
            model: input.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            parameters: normalize_parameters(input.parameters.as_ref()),
            is_public: true,
        },
    )
    .await?;
    attach_tags(&state, artwork.id, input.tags.as_deref()).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: artwork })))
}

/// POST /api/v1/artworks
///
/// Save a generation result to the caller's gallery, private by default.
pub async fn save(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<SaveRequest>,
) -> AppResult<impl IntoResponse> {
    if input.image_url.trim().is_empty() {
        return Err(AppError::BadRequest("imageUrl is required".into()));
    }

    let artwork = ArtworkRepo::create(
        &state.pool,
        &CreateArtwork {
            user_id: auth_user.id,
            image_url: input.image_url,
            title: resolve_title(input.title.as_deref(), input.prompt.as_deref()),
            description: resolve_description(input.description.as_deref(), input.prompt.as_deref()),
            prompt: input.prompt.unwrap_or_default(),
            model: input.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            parameters: normalize_parameters(input.parameters.as_ref()),
            is_public: input.is_public,
        },
    )
    .await?;
    attach_tags(&state, artwork.id, input.tags.as_deref()).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: artwork })))
}

// ---------------------------------------------------------------------------
// Listing / detail / visibility / delete
// ---------------------------------------------------------------------------

/// GET /api/v1/artworks
///
/// The caller's own artworks, newest first, optionally filtered by
/// visibility.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let visibility = match params.visibility.as_deref() {
        None | Some("all") => None,
        Some("public") => Some(true),
        Some("private") => Some(false),
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "Invalid visibility filter: {other}"
            )))
        }
    };

    let limit = clamp_limit(params.limit, DEFAULT_FEED_LIMIT, MAX_FEED_LIMIT);
    let offset = clamp_offset(params.offset);

    let items =
        ArtworkRepo::list_for_user(&state.pool, auth_user.id, visibility, limit, offset).await?;
    let total = ArtworkRepo::count_for_user(&state.pool, auth_user.id, visibility).await?;

    Ok(Json(DataResponse {
        data: ArtworkPage {
            items,
            total,
            limit,
            offset,
            has_more: has_more(offset, limit, total),
        },
    }))
}

/// GET /api/v1/artworks/{id}
pub async fn get(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let artwork = load_visible(&state, &auth_user, id).await?;
    Ok(Json(DataResponse { data: artwork }))
}

/// PUT /api/v1/artworks/{id}/visibility
pub async fn set_visibility(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<VisibilityRequest>,
) -> AppResult<impl IntoResponse> {
    load_owned(&state, &auth_user, id).await?;

    let artwork = ArtworkRepo::set_visibility(&state.pool, id, input.is_public)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;

    Ok(Json(DataResponse { data: artwork }))
}

/// DELETE /api/v1/artworks/{id}
///
/// Owner only. Likes, comments, tags, and collection items cascade.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned(&state, &auth_user, id).await?;
    ArtworkRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

/// POST /api/v1/artworks/{id}/like
pub async fn like(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_visible(&state, &auth_user, id).await?;

    let was_liked = ArtworkRepo::like(&state.pool, id, auth_user.id).await?;
    if !was_liked {
        return Err(AppError::Core(CoreError::Conflict(
            "Artwork is already liked".into(),
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/artworks/{id}/like
pub async fn unlike(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_visible(&state, &auth_user, id).await?;

    let was_removed = ArtworkRepo::unlike(&state.pool, id, auth_user.id).await?;
    if !was_removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Like",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// GET /api/v1/artworks/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_visible(&state, &auth_user, id).await?;
    let comments = CommentRepo::list_for_artwork(&state.pool, id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/artworks/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CommentRequest>,
) -> AppResult<impl IntoResponse> {
    if input.content.trim().is_empty() {
        return Err(AppError::BadRequest("content is required".into()));
    }
    if let Some(rating) = input.rating {
        if !(1..=5).contains(&rating) {
            return Err(AppError::BadRequest("rating must be between 1 and 5".into()));
        }
    }

    load_visible(&state, &auth_user, id).await?;

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            artwork_id: id,
            user_id: auth_user.id,
            content: input.content,
            rating: input.rating,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// DELETE /api/v1/comments/{id}
///
/// Comment author only.
pub async fn delete_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let author_id = CommentRepo::find_author(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;

    if author_id != auth_user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot delete another user's comment".into(),
        )));
    }

    CommentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load an artwork the caller may read: their own, or any public one.
/// Non-owners get 403 for private rows; 404 only when truly absent.
async fn load_visible(
    state: &AppState,
    auth_user: &AuthUser,
    id: DbId,
) -> AppResult<Artwork> {
    let artwork = ArtworkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;

    if !artwork.is_public && artwork.user_id != auth_user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Artwork is private".into(),
        )));
    }
    Ok(artwork)
}

/// Load an artwork the caller must own.
async fn load_owned(state: &AppState, auth_user: &AuthUser, id: DbId) -> AppResult<Artwork> {
    let artwork = ArtworkRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id,
        }))?;

    if artwork.user_id != auth_user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not the artwork owner".into(),
        )));
    }
    Ok(artwork)
}

/// Attach optional tag names; blank entries are skipped, creation is
/// idempotent.
async fn attach_tags(
    state: &AppState,
    artwork_id: DbId,
    tags: Option<&[String]>,
) -> AppResult<()> {
    if let Some(names) = tags {
        TagRepo::attach_names(&state.pool, artwork_id, names).await?;
    }
    Ok(())
}
