//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::repositories::SessionRepo;

use crate::auth::token::hash_session_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated admin extracted from a Bearer session token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication. There is no role hierarchy: any live session has
/// full admin rights. Extraction slides the session's expiry forward by
/// the configured inactivity window.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The admin's internal database id.
    pub user_id: DbId,
    /// The presenting session's id (deleted on logout).
    pub session_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let token_hash = hash_session_token(token, &state.config.session.secret);

        let session = SessionRepo::find_active_by_token_hash(&state.pool, &token_hash)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
            })?;

        // Sliding renewal: activity pushes the inactivity window forward.
        let renewed =
            chrono::Utc::now() + chrono::Duration::minutes(state.config.session.ttl_mins);
        SessionRepo::touch(&state.pool, session.id, renewed).await?;

        Ok(AuthUser {
            user_id: session.user_id,
            session_id: session.id,
        })
    }
}
