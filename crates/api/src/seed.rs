//! Seed admin account management.
//!
//! The application never creates users through its API; the single
//! admin account is provisioned here, at startup and after a schema
//! reset.

use vitrine_db::models::user::CreateUser;
use vitrine_db::repositories::UserRepo;
use vitrine_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::AdminSeedConfig;

/// Username of the retired built-in account removed when the
/// configured seed username differs.
const LEGACY_USERNAME: &str = "admin";

/// Errors from admin seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    Hash(String),
}

/// Create the configured admin account if it does not exist yet.
///
/// Also deletes a stale `admin` row left behind by an earlier
/// deployment when the configured username has moved on. Returns `true`
/// if a new account was created.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminSeedConfig) -> Result<bool, SeedError> {
    if admin.username != LEGACY_USERNAME
        && UserRepo::delete_by_username(pool, LEGACY_USERNAME).await?
    {
        tracing::info!("Removed stale legacy '{LEGACY_USERNAME}' account");
    }

    if UserRepo::find_by_username(pool, &admin.username)
        .await?
        .is_some()
    {
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password).map_err(|e| SeedError::Hash(e.to_string()))?;
    UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(
        username = %admin.username,
        "Seed admin account created; change the password after deploy"
    );
    Ok(true)
}
