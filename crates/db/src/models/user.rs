//! User entity model and DTOs.

use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- never serialize this to API responses.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
}
