/// Database access layer for feed-service
pub mod app_repo;
pub mod collection_repo;
pub mod feed_repo;

/// Apply the service schema.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
