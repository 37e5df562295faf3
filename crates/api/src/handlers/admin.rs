//! Destructive admin maintenance endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::seed::ensure_admin;
use crate::state::AppState;

/// Outcome of a schema reset.
#[derive(Debug, Serialize)]
pub struct ResetResult {
    pub message: String,
}

/// POST /api/v1/admin/reset-schema
///
/// Drops and recreates every table, then reseeds the configured admin
/// account. Setup-only escape hatch: all content is lost, including the
/// session that authorized the call.
pub async fn reset_schema(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<ResetResult>>> {
    vitrine_db::reset_schema(&state.pool)
        .await
        .map_err(|e| AppError::InternalError(format!("Schema reset failed: {e}")))?;

    ensure_admin(&state.pool, &state.config.admin)
        .await
        .map_err(|e| AppError::InternalError(format!("Admin reseed failed: {e}")))?;

    Ok(Json(DataResponse {
        data: ResetResult {
            message: "Database schema reset; admin account reseeded".into(),
        },
    }))
}
