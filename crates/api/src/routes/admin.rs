//! Route definitions for destructive admin maintenance.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /reset-schema -> reset_schema
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/reset-schema", post(admin::reset_schema))
}
