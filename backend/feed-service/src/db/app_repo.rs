use sqlx::PgPool;

/// Return the subset of the submitted marketplace app ids that exist.
///
/// Used by the collection manager to reject memberships referencing unknown
/// apps before any association is written.
pub async fn existing_ids(pool: &PgPool, app_ids: &[i64]) -> Result<Vec<i64>, sqlx::Error> {
    if app_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, (i64,)>("SELECT id FROM webapps WHERE id = ANY($1)")
        .bind(app_ids)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Insert a marketplace app row. Only exercised by fixtures and local
/// tooling; production rows are owned by the catalog collaborator.
pub async fn insert_app(pool: &PgPool, slug: &str, name: &str) -> Result<i64, sqlx::Error> {
    let (id,): (i64,) =
        sqlx::query_as("INSERT INTO webapps (slug, name) VALUES ($1, $2) RETURNING id")
            .bind(slug)
            .bind(name)
            .fetch_one(pool)
            .await?;

    Ok(id)
}
