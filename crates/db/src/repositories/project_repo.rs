//! Repository for the `projects` table.

use std::collections::HashMap;

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectEdit, ProjectWithMedia};
use crate::models::project_media::ProjectMedia;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, image_url, sort_order, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project with an empty cover, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects ascending by `(sort_order, id)`.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY sort_order, id");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List all projects with their media, both ascending by
    /// `(sort_order, id)`. Two queries, grouped in memory.
    pub async fn list_with_media(pool: &PgPool) -> Result<Vec<ProjectWithMedia>, sqlx::Error> {
        let projects = Self::list(pool).await?;

        let media = sqlx::query_as::<_, ProjectMedia>(
            "SELECT id, project_id, url, media_type, sort_order
             FROM project_media ORDER BY sort_order, id",
        )
        .fetch_all(pool)
        .await?;

        let mut by_project: HashMap<DbId, Vec<ProjectMedia>> = HashMap::new();
        for m in media {
            by_project.entry(m.project_id).or_default().push(m);
        }

        Ok(projects
            .into_iter()
            .map(|project| {
                let media = by_project.remove(&project.id).unwrap_or_default();
                ProjectWithMedia { project, media }
            })
            .collect())
    }

    /// Apply an edit in one transaction: unconditional title/description
    /// update, per-media order updates, and per-media deletions. Pairs
    /// and delete ids that do not belong to this project are silently
    /// ignored. Returns `false` if the project does not exist.
    ///
    /// The cover is NOT recomputed here; callers append any new uploads
    /// first and then call [`Self::set_cover`] with the survivor chosen
    /// by the ordering engine.
    pub async fn apply_edit(
        pool: &PgPool,
        id: DbId,
        edit: &ProjectEdit,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE projects SET title = $2, description = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&edit.title)
        .bind(&edit.description)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(false);
        }

        for (media_id, order) in &edit.media_orders {
            sqlx::query(
                "UPDATE project_media SET sort_order = $3
                 WHERE id = $1 AND project_id = $2",
            )
            .bind(media_id)
            .bind(id)
            .bind(order)
            .execute(&mut *tx)
            .await?;
        }

        for media_id in &edit.delete_media {
            sqlx::query("DELETE FROM project_media WHERE id = $1 AND project_id = $2")
                .bind(media_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Set the derived cover URL. Returns `true` if the row was updated.
    pub async fn set_cover(pool: &PgPool, id: DbId, image_url: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET image_url = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(image_url)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a set of `(id, sort_order)` pairs in one transaction.
    /// Unknown ids are silently ignored. Returns the number of rows
    /// actually updated.
    pub async fn bulk_set_order(
        pool: &PgPool,
        pairs: &[(DbId, i32)],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut updated = 0;

        for (id, order) in pairs {
            let result = sqlx::query(
                "UPDATE projects SET sort_order = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(id)
            .bind(order)
            .execute(&mut *tx)
            .await?;
            updated += result.rows_affected();
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a project and all its media in one transaction (explicit
    /// cascade, no orphans). Returns `true` if the project existed.
    pub async fn delete_with_media(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM project_media WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
