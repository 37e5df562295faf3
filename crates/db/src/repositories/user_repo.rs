//! Repository for the `users` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, created_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by exact username match.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user by username. Returns `true` if a row was removed.
    ///
    /// Used at startup to retire a stale legacy seed account.
    pub async fn delete_by_username(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
