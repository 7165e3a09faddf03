/// Database access layer for catalog-service
pub mod metrics_repo;
pub mod website_repo;

use sqlx::PgPool;

/// Apply pending migrations at startup.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
