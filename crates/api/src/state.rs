use std::sync::Arc;

use vitrine_media::MediaGateway;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vitrine_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Upload gateway; a trait object so tests can substitute a stub.
    pub gateway: Arc<dyn MediaGateway>,
}
