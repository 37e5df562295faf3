//! Database layer: pool construction, embedded migrations, models and
//! repositories.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Embedded migrations from `crates/db/migrations`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Cheap connectivity probe used by startup and the health endpoint.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}

/// Apply any pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Errors from [`reset_schema`].
#[derive(Debug, thiserror::Error)]
pub enum SchemaResetError {
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Drop every application table and recreate the schema from migrations.
///
/// Destructive, setup-only operation: all content is lost and the caller
/// must reseed the admin account afterwards.
pub async fn reset_schema(pool: &DbPool) -> Result<(), SchemaResetError> {
    tracing::warn!("Resetting database schema: dropping all tables");
    sqlx::query(
        "DROP TABLE IF EXISTS sessions, project_media, illustrations, \
         projects, users, _sqlx_migrations CASCADE",
    )
    .execute(pool)
    .await?;
    run_migrations(pool).await?;
    Ok(())
}
