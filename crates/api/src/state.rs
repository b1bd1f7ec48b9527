use std::sync::Arc;

use lumen_diffusion::DiffusionClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lumen_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Generation service client, explicitly constructed and injected so
    /// tests can point it at a fake upstream.
    pub diffusion: Arc<DiffusionClient>,
}
