//! Route definitions for the `/prompts` library.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::prompts;
use crate::state::AppState;

/// Routes mounted at `/prompts`.
///
/// Static segments (`/categories`, `/tags`) take priority over `/{id}`.
///
/// ```text
/// POST   /               -> create
/// GET    /               -> list own
/// GET    /categories     -> category aggregates
/// GET    /tags           -> tag cloud
/// GET    /{id}           -> get (owner or public)
/// PUT    /{id}           -> update (owner)
/// DELETE /{id}           -> delete (owner)
/// POST   /{id}/favorite  -> toggle favorite (owner)
/// POST   /{id}/use       -> record use (owner or public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(prompts::create).get(prompts::list))
        .route("/categories", get(prompts::categories))
        .route("/tags", get(prompts::tags))
        .route(
            "/{id}",
            get(prompts::get).put(prompts::update).delete(prompts::delete),
        )
        .route("/{id}/favorite", post(prompts::toggle_favorite))
        .route("/{id}/use", post(prompts::record_use))
}
