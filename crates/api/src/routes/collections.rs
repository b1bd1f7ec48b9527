//! Route definitions for the `/collections` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::collections;
use crate::state::AppState;

/// Routes mounted at `/collections`.
///
/// ```text
/// POST   /                          -> create
/// GET    /                          -> list own (with item counts)
/// PUT    /{id}                      -> update (owner)
/// DELETE /{id}                      -> delete (owner)
/// GET    /{id}/items                -> list items (owner or public)
/// POST   /{id}/items                -> add item (owner)
/// DELETE /{id}/items/{artwork_id}   -> remove item (owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(collections::create).get(collections::list))
        .route(
            "/{id}",
            put(collections::update).delete(collections::delete),
        )
        .route(
            "/{id}/items",
            get(collections::items).post(collections::add_item),
        )
        .route(
            "/{id}/items/{artwork_id}",
            delete(collections::remove_item),
        )
}
