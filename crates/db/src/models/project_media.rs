//! Project media model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vitrine_core::types::DbId;

/// A media row from the `project_media` table.
///
/// `media_type` holds [`vitrine_core::types::MediaKind::as_str`] values
/// (`"image"` / `"video"`). `sort_order` is scoped to the parent project.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMedia {
    pub id: DbId,
    pub project_id: DbId,
    pub url: String,
    pub media_type: String,
    pub sort_order: i32,
}

/// DTO for creating a media row after a successful gateway upload.
#[derive(Debug, Clone)]
pub struct CreateProjectMedia {
    pub project_id: DbId,
    pub url: String,
    pub media_type: String,
    pub sort_order: i32,
}
