pub mod admin;
pub mod auth;
pub mod health;
pub mod illustration;
pub mod project;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                  login (public)
/// /auth/logout                 logout (requires auth)
///
/// /projects                    list (public), create (auth)
/// /projects/order              bulk reorder (auth)
/// /projects/{id}               edit, delete (auth)
///
/// /illustrations               list (public), batch add (auth)
/// /illustrations/order         bulk reorder (auth)
/// /illustrations/{id}          delete (auth)
///
/// /dashboard                   combined admin view (auth)
///
/// /admin/reset-schema          drop + recreate + reseed (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/illustrations", illustration::router())
        .nest("/admin", admin::router())
        .route("/dashboard", get(handlers::dashboard::dashboard))
}
