pub mod artworks;
pub mod auth;
pub mod collections;
pub mod community;
pub mod generation;
pub mod health;
pub mod prompts;
pub mod statistics;
pub mod users;

use axum::routing::delete;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                        register (public)
/// /auth/login                           login (public)
/// /auth/logout                          logout (requires auth)
///
/// /generate/{endpoint}                  forward generation request (POST)
/// /generate/result                      poll generation result (GET)
///
/// /community                            public feed (GET)
/// /community/{id}                       artwork detail (GET)
///
/// /artworks                             save, list own (POST, GET)
/// /artworks/publish                     publish to community (POST)
/// /artworks/{id}                        get, delete
/// /artworks/{id}/visibility             set visibility (PUT)
/// /artworks/{id}/like                   like, unlike (POST, DELETE)
/// /artworks/{id}/comments               list, create (GET, POST)
/// /comments/{id}                        delete own comment (DELETE)
///
/// /collections                          create, list own (POST, GET)
/// /collections/{id}                     update, delete (PUT, DELETE)
/// /collections/{id}/items               list, add (GET, POST)
/// /collections/{id}/items/{artwork_id}  remove (DELETE)
///
/// /prompts                              create, list own (POST, GET)
/// /prompts/categories                   category aggregates (GET)
/// /prompts/tags                         tag cloud (GET)
/// /prompts/{id}                         get, update, delete
/// /prompts/{id}/favorite                toggle favorite (POST)
/// /prompts/{id}/use                     record use (POST)
///
/// /statistics                           generation statistics (GET)
///
/// /users/me                             profile get, update (GET, PUT)
/// /users/me/password                    change password (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/generate", generation::router())
        .nest("/community", community::router())
        .nest("/artworks", artworks::router())
        .route("/comments/{id}", delete(handlers::artworks::delete_comment))
        .nest("/collections", collections::router())
        .nest("/prompts", prompts::router())
        .nest("/statistics", statistics::router())
        .nest("/users", users::router())
}
