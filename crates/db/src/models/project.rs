//! Project entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

use crate::models::project_media::ProjectMedia;

/// A project row from the `projects` table.
///
/// `image_url` is the derived cover: the URL of the lowest-order
/// surviving media. It is empty only transiently (between project
/// creation and the first successful upload) and retains its last value
/// when every media row is deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. The cover starts empty and the
/// project lands at `sort_order` 0.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: String,
    pub description: Option<String>,
}

/// Changes applied to a project in one transaction by
/// [`crate::repositories::ProjectRepo::apply_edit`]: unconditional
/// title/description update, per-media order updates, and per-media
/// deletions. Order pairs and delete ids referencing other projects or
/// nonexistent media are silently ignored.
#[derive(Debug, Clone, Default)]
pub struct ProjectEdit {
    pub title: String,
    pub description: Option<String>,
    pub media_orders: Vec<(DbId, i32)>,
    pub delete_media: Vec<DbId>,
}

/// A project joined with its ordered media, as served by the public
/// listing and the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithMedia {
    #[serde(flatten)]
    pub project: Project,
    pub media: Vec<ProjectMedia>,
}
