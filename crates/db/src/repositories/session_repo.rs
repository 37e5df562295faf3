//! Repository for the `sessions` table.

use sqlx::PgPool;
use vitrine_core::types::{DbId, Timestamp};

use crate::models::session::{CreateSession, Session};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, token_hash, expires_at, created_at";

/// Provides CRUD operations for admin sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(input.user_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a live session by its token digest. Expired sessions are
    /// invisible here; they are swept by [`Self::cleanup_expired`].
    pub async fn find_active_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE token_hash = $1 AND expires_at > NOW()"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Slide a session's expiry forward (inactivity-window renewal).
    /// Returns `true` if the row was updated.
    pub async fn touch(
        pool: &PgPool,
        id: DbId,
        expires_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE sessions SET expires_at = $2 WHERE id = $1")
            .bind(id)
            .bind(expires_at)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a single session (logout). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete expired sessions. Returns the count of deleted rows.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
