//! Admin session model and DTOs.

use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A session row from the `sessions` table.
///
/// Only the keyed digest of the opaque token is stored; the plaintext
/// never touches the database.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
