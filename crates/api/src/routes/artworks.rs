//! Route definitions for the `/artworks` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::artworks;
use crate::state::AppState;

/// Routes mounted at `/artworks`.
///
/// ```text
/// POST   /                 -> save a generation result (private by default)
/// GET    /                 -> list own artworks
/// POST   /publish          -> publish to the community
/// GET    /{id}             -> get (owner or public)
/// DELETE /{id}             -> delete (owner)
/// PUT    /{id}/visibility  -> set visibility (owner)
/// POST   /{id}/like        -> like
/// DELETE /{id}/like        -> unlike
/// GET    /{id}/comments    -> list comments
/// POST   /{id}/comments    -> create comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(artworks::save).get(artworks::list))
        .route("/publish", post(artworks::publish))
        .route("/{id}", get(artworks::get).delete(artworks::delete))
        .route("/{id}/visibility", put(artworks::set_visibility))
        .route("/{id}/like", post(artworks::like).delete(artworks::unlike))
        .route(
            "/{id}/comments",
            get(artworks::list_comments).post(artworks::create_comment),
        )
}
