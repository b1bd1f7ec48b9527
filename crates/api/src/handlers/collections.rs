//! Handlers for the `/collections` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lumen_core::error::CoreError;
use lumen_core::types::DbId;
use lumen_db::models::collection::{Collection, CreateCollection, UpdateCollection};
use lumen_db::repositories::{ArtworkRepo, CollectionRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /collections/{id}/items`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub artwork_id: DbId,
}

/// POST /api/v1/collections
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateCollection>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }

    let collection = CollectionRepo::create(&state.pool, auth_user.id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: collection })))
}

/// GET /api/v1/collections
///
/// The caller's own collections with item counts.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let collections = CollectionRepo::list_for_user(&state.pool, auth_user.id).await?;
    Ok(Json(DataResponse { data: collections }))
}

/// PUT /api/v1/collections/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCollection>,
) -> AppResult<impl IntoResponse> {
    load_owned(&state, &auth_user, id).await?;

    let collection = CollectionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Collection",
            id,
        }))?;

    Ok(Json(DataResponse { data: collection }))
}

/// DELETE /api/v1/collections/{id}
///
/// Owner only. Items cascade.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned(&state, &auth_user, id).await?;
    CollectionRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/collections/{id}/items
///
/// Owner always; others only when the collection is public.
pub async fn items(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let collection = CollectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Collection",
            id,
        }))?;

    if collection.user_id != auth_user.id && !collection.is_public {
        return Err(AppError::Core(CoreError::Forbidden(
            "Collection is private".into(),
        )));
    }

    let items = CollectionRepo::items(&state.pool, id).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/collections/{id}/items
pub async fn add_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AddItemRequest>,
) -> AppResult<StatusCode> {
    load_owned(&state, &auth_user, id).await?;

    ArtworkRepo::find_by_id(&state.pool, input.artwork_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            id: input.artwork_id,
        }))?;

    let was_added = CollectionRepo::add_item(&state.pool, id, input.artwork_id).await?;
    if !was_added {
        return Err(AppError::Core(CoreError::Conflict(
            "Artwork is already in this collection".into(),
        )));
    }
    Ok(StatusCode::CREATED)
}

/// DELETE /api/v1/collections/{id}/items/{artwork_id}
///
/// Removing twice yields 204 then 404.
pub async fn remove_item(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, artwork_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    load_owned(&state, &auth_user, id).await?;

    let was_removed = CollectionRepo::remove_item(&state.pool, id, artwork_id).await?;
    if !was_removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Collection item",
            id: artwork_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Load a collection the caller must own.
async fn load_owned(
    state: &AppState,
    auth_user: &AuthUser,
    id: DbId,
) -> AppResult<Collection> {
    let collection = CollectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Collection",
            id,
        }))?;

    if collection.user_id != auth_user.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not the collection owner".into(),
        )));
    }
    Ok(collection)
}
