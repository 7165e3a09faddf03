use crate::models::{CollectionKind, FeedCollectionRecord};
use sqlx::{PgPool, Postgres, Transaction};

const COLLECTION_COLUMNS: &str =
    "id, slug, name, description, background_color, layout, created_at, updated_at";

/// Create the base record for a feed collection. The app membership is
/// applied separately by the manager.
pub async fn create(
    pool: &PgPool,
    kind: CollectionKind,
    slug: &str,
    name: &str,
    description: Option<&str>,
    background_color: Option<&str>,
    layout: Option<&str>,
) -> Result<FeedCollectionRecord, sqlx::Error> {
    sqlx::query_as::<_, FeedCollectionRecord>(&format!(
        r#"
        INSERT INTO {table} (slug, name, description, background_color, layout)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {COLLECTION_COLUMNS}
        "#,
        table = kind.table()
    ))
    .bind(slug)
    .bind(name)
    .bind(description)
    .bind(background_color)
    .bind(layout)
    .fetch_one(pool)
    .await
}

/// Resolve a collection by numeric id or slug. Numeric keys are looked up
/// as ids only and never fall back to an all-digit slug.
pub async fn find_by_id_or_slug(
    pool: &PgPool,
    kind: CollectionKind,
    key: &str,
) -> Result<Option<FeedCollectionRecord>, sqlx::Error> {
    if let Ok(id) = key.parse::<i64>() {
        return sqlx::query_as::<_, FeedCollectionRecord>(&format!(
            "SELECT {COLLECTION_COLUMNS} FROM {table} WHERE id = $1",
            table = kind.table()
        ))
        .bind(id)
        .fetch_optional(pool)
        .await;
    }

    sqlx::query_as::<_, FeedCollectionRecord>(&format!(
        "SELECT {COLLECTION_COLUMNS} FROM {table} WHERE slug = $1",
        table = kind.table()
    ))
    .bind(key)
    .fetch_optional(pool)
    .await
}

/// Apply a partial field update; absent values keep the stored column.
pub async fn update_fields(
    pool: &PgPool,
    kind: CollectionKind,
    id: i64,
    slug: Option<&str>,
    name: Option<&str>,
    description: Option<&str>,
    background_color: Option<&str>,
    layout: Option<&str>,
) -> Result<Option<FeedCollectionRecord>, sqlx::Error> {
    sqlx::query_as::<_, FeedCollectionRecord>(&format!(
        r#"
        UPDATE {table}
        SET slug = COALESCE($2, slug),
            name = COALESCE($3, name),
            description = COALESCE($4, description),
            background_color = COALESCE($5, background_color),
            layout = COALESCE($6, layout),
            updated_at = NOW()
        WHERE id = $1
        RETURNING {COLLECTION_COLUMNS}
        "#,
        table = kind.table()
    ))
    .bind(id)
    .bind(slug)
    .bind(name)
    .bind(description)
    .bind(background_color)
    .bind(layout)
    .fetch_optional(pool)
    .await
}

/// Delete a collection. Membership rows cascade.
pub async fn delete(pool: &PgPool, kind: CollectionKind, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(&format!(
        "DELETE FROM {table} WHERE id = $1",
        table = kind.table()
    ))
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// List collections ordered by creation time, newest first.
pub async fn list(
    pool: &PgPool,
    kind: CollectionKind,
    limit: i64,
    offset: i64,
) -> Result<Vec<FeedCollectionRecord>, sqlx::Error> {
    sqlx::query_as::<_, FeedCollectionRecord>(&format!(
        r#"
        SELECT {COLLECTION_COLUMNS}
        FROM {table}
        ORDER BY created_at DESC, id DESC
        LIMIT $1 OFFSET $2
        "#,
        table = kind.table()
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Count all collections of a kind.
pub async fn count(pool: &PgPool, kind: CollectionKind) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(&format!(
        "SELECT COUNT(*) FROM {table}",
        table = kind.table()
    ))
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Replace the ordered app membership of a collection.
pub async fn replace_apps(
    tx: &mut Transaction<'_, Postgres>,
    kind: CollectionKind,
    collection_id: i64,
    app_ids: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query(&format!(
        "DELETE FROM {table} WHERE {fk} = $1",
        table = kind.membership_table(),
        fk = kind.fk_column()
    ))
    .bind(collection_id)
    .execute(&mut **tx)
    .await?;

    if app_ids.is_empty() {
        return Ok(());
    }

    let orders: Vec<i32> = (0..app_ids.len() as i32).collect();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table} ({fk}, app_id, "order")
        SELECT $1, app_id, ord FROM UNNEST($2::int8[], $3::int4[]) AS t(app_id, ord)
        "#,
        table = kind.membership_table(),
        fk = kind.fk_column()
    ))
    .bind(collection_id)
    .bind(app_ids)
    .bind(&orders)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Fetch the ordered app ids belonging to a collection.
pub async fn app_ids(
    pool: &PgPool,
    kind: CollectionKind,
    collection_id: i64,
) -> Result<Vec<i64>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (i64,)>(&format!(
        r#"SELECT app_id FROM {table} WHERE {fk} = $1 ORDER BY "order""#,
        table = kind.membership_table(),
        fk = kind.fk_column()
    ))
    .bind(collection_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}
