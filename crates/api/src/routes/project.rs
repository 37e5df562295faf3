//! Route definitions for the `/projects` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /        -> list (public)
/// POST   /        -> create
/// PUT    /order   -> bulk_order
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/order", put(project::bulk_order))
        .route("/{id}", put(project::update).delete(project::delete))
}
