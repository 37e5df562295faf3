//! Repository for the `illustrations` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::illustration::{CreateIllustration, Illustration};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, image_url, sort_order, created_at";

/// Provides CRUD operations for illustrations.
pub struct IllustrationRepo;

impl IllustrationRepo {
    /// Insert a batch of illustrations in one transaction: either every
    /// row is persisted or none is. Returns the created rows in input
    /// order.
    pub async fn create_batch(
        pool: &PgPool,
        inputs: &[CreateIllustration],
    ) -> Result<Vec<Illustration>, sqlx::Error> {
        let query = format!(
            "INSERT INTO illustrations (image_url, sort_order)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());

        for input in inputs {
            let row = sqlx::query_as::<_, Illustration>(&query)
                .bind(&input.image_url)
                .bind(input.sort_order)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// List all illustrations ascending by `(sort_order, id)`.
    pub async fn list(pool: &PgPool) -> Result<Vec<Illustration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM illustrations ORDER BY sort_order, id");
        sqlx::query_as::<_, Illustration>(&query)
            .fetch_all(pool)
            .await
    }

    /// Current maximum `sort_order`, `None` when the table is empty.
    pub async fn max_order(pool: &PgPool) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT MAX(sort_order) FROM illustrations")
            .fetch_one(pool)
            .await
    }

    /// Delete an illustration by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM illustrations WHERE id = $1")
            .bind(id)
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
            let result = sqlx::query("UPDATE illustrations SET sort_order = $2 WHERE id = $1")
                .bind(id)
                .bind(order)
                .execute(&mut *tx)
                .await?;
            updated += result.rows_affected();
        }

        tx.commit().await?;
        Ok(updated)
    }
}
