//! Illustration model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// An illustration row from the `illustrations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Illustration {
    pub id: DbId,
    pub image_url: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// DTO for creating an illustration after a successful gateway upload.
#[derive(Debug, Clone)]
pub struct CreateIllustration {
    pub image_url: String,
    pub sort_order: i32,
}
