//! Handlers for the `/auth` resource (login, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::session::CreateSession;
use vitrine_db::repositories::{SessionRepo, UserRepo};

use crate::auth::password::verify_password;
use crate::auth::token::{generate_session_token, hash_session_token};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response: the opaque session token and its initial
/// lifetime (seconds). The window slides on every authenticated request.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`LoginResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Unknown usernames and wrong
/// passwords are indistinguishable from the outside.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // Opportunistic sweep so expired sessions do not accumulate.
    SessionRepo::cleanup_expired(&state.pool).await?;

    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(invalid_credentials());
    }

    let token = generate_session_token();
    let token_hash = hash_session_token(&token, &state.config.session.secret);
    let expires_at = Utc::now() + chrono::Duration::minutes(state.config.session.ttl_mins);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            token_hash,
            expires_at,
        },
    )
    .await?;

    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.session.ttl_mins * 60,
        user: UserInfo {
            id: user.id,
            username: user.username,
        },
    }))
}

/// POST /api/v1/auth/logout
///
/// Delete the presenting session. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::delete(&state.pool, auth.session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid username or password".into()))
}
