//! Route definitions for the `/illustrations` resource.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::illustration;
use crate::state::AppState;

/// Routes mounted at `/illustrations`.
///
/// ```text
/// GET    /        -> list (public)
/// POST   /        -> create (batch add)
/// PUT    /order   -> bulk_order
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(illustration::list).post(illustration::create))
        .route("/order", put(illustration::bulk_order))
        .route("/{id}", delete(illustration::delete))
}
