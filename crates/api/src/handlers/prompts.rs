//! Handlers for the `/prompts` library.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lumen_core::error::CoreError;
use lumen_core::types::DbId;
use lumen_db::models::prompt::{CreatePrompt, Prompt, PromptListQuery, UpdatePrompt};
use lumen_db::repositories::{normalize_tag_name, PromptRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /prompts`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub is_public: bool,
}

/// Request body for `PUT /prompts/{id}`. All fields are optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

/// Query parameters for the prompt listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub favorite: Option<bool>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/prompts
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateRequest>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() || input.content.trim().is_empty() {
        return Err(AppError::BadRequest("title and content are required".into()));
    }

    let prompt = PromptRepo::create(
        &state.pool,
        &CreatePrompt {
            user_id: auth_user.id,
            title: input.title,
            content: input.content,
            category: input.category.filter(|c| !c.trim().is_empty()),
            tags: normalize_tags(input.tags.unwrap_or_default()),
            is_public: input.is_public,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: prompt })))
}

/// GET /api/v1/prompts
///
/// The caller's own prompts with optional category, favorite, and search
/// filters.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let query = PromptListQuery {
        category: params.category.filter(|c| !c.trim().is_empty()),
        favorite: params.favorite,
        search: params.search,
        limit: params.limit,
        offset: params.offset,
    };

    let page = PromptRepo::list_for_user(&state.pool, auth_user.id, &query).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/prompts/{id}
///
/// Owner or public.
pub async fn get(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let prompt = PromptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id,
        }))?;

    if !prompt.is_public && prompt.user_id != auth_user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Prompt is private".into(),
        )));
    }

    Ok(Json(DataResponse { data: prompt }))
}

/// PUT /api/v1/prompts/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRequest>,
) -> AppResult<impl IntoResponse> {
    load_owned(&state, &auth_user, id).await?;

    let update = UpdatePrompt {
        title: input.title,
        content: input.content,
        category: input.category,
        tags: input.tags.map(normalize_tags),
        is_public: input.is_public,
    };

    let prompt = PromptRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id,
        }))?;

    Ok(Json(DataResponse { data: prompt }))
}

/// DELETE /api/v1/prompts/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned(&state, &auth_user, id).await?;
    PromptRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/prompts/{id}/favorite
///
/// Toggle the favorite flag, returning the updated row.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_owned(&state, &auth_user, id).await?;

    let prompt = PromptRepo::toggle_favorite(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id,
        }))?;

    Ok(Json(DataResponse { data: prompt }))
}

/// POST /api/v1/prompts/{id}/use
///
/// Record one use of a prompt (owner or public).
pub async fn record_use(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let prompt = PromptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id,
        }))?;

    if !prompt.is_public && prompt.user_id != auth_user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Prompt is private".into(),
        )));
    }

    let prompt = PromptRepo::increment_use_count(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id,
        }))?;

    Ok(Json(DataResponse { data: prompt }))
}

/// GET /api/v1/prompts/categories
///
/// `{category, count}` aggregates over the caller's prompts.
pub async fn categories(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let categories = PromptRepo::categories(&state.pool, auth_user.id).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/prompts/tags
///
/// Tag cloud over the caller's prompts.
pub async fn tags(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let tags = PromptRepo::tag_cloud(&state.pool, auth_user.id).await?;
    Ok(Json(DataResponse { data: tags }))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load a prompt the caller must own.
async fn load_owned(state: &AppState, auth_user: &AuthUser, id: DbId) -> AppResult<Prompt> {
    let prompt = PromptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id,
        }))?;

    if prompt.user_id != auth_user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not the prompt owner".into(),
        )));
    }
    Ok(prompt)
}

/// Lowercase, trim, drop blanks, and dedupe while preserving order.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in tags {
        let normalized = normalize_tag_name(&tag);
        if !normalized.is_empty() && !seen.contains(&normalized) {
            seen.push(normalized);
        }
    }
    seen
}
