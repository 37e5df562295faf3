//! Repository for the `project_media` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::project_media::{CreateProjectMedia, ProjectMedia};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, url, media_type, sort_order";

/// Provides CRUD operations for project media.
pub struct ProjectMediaRepo;

impl ProjectMediaRepo {
    /// Insert a media row, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProjectMedia,
    ) -> Result<ProjectMedia, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_media (project_id, url, media_type, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMedia>(&query)
            .bind(input.project_id)
            .bind(&input.url)
            .bind(&input.media_type)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// List a project's media ascending by `(sort_order, id)`.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectMedia>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_media
             WHERE project_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, ProjectMedia>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Current maximum `sort_order` within a project, `None` when the
    /// project has no media.
    pub async fn max_order(pool: &PgPool, project_id: DbId) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT MAX(sort_order) FROM project_media WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await
    }
}
