use crate::models::{Website, WebsitePayload, WebsiteUpdate};
use sqlx::types::Json;
use sqlx::PgPool;

const WEBSITE_COLUMNS: &str = "id, default_locale, url, title, short_title, description, \
     devices, categories, region_exclusions, icon_type, icon_hash, status, is_disabled, \
     last_updated, created_at";

/// Storage shape of a website: list columns come back as JSONB.
#[derive(Debug, sqlx::FromRow)]
struct WebsiteRow {
    id: i64,
    default_locale: String,
    url: Option<String>,
    title: Option<String>,
    short_title: Option<String>,
    description: Option<String>,
    devices: Json<Vec<i32>>,
    categories: Json<Vec<String>>,
    region_exclusions: Json<Vec<i32>>,
    icon_type: String,
    icon_hash: String,
    status: i32,
    is_disabled: bool,
    last_updated: chrono::DateTime<chrono::Utc>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<WebsiteRow> for Website {
    fn from(row: WebsiteRow) -> Website {
        Website {
            id: row.id,
            default_locale: row.default_locale,
            url: row.url,
            title: row.title,
            short_title: row.short_title,
            description: row.description,
            devices: row.devices.0,
            categories: row.categories.0,
            region_exclusions: row.region_exclusions.0,
            icon_type: row.icon_type,
            icon_hash: row.icon_hash,
            status: row.status,
            is_disabled: row.is_disabled,
            last_updated: row.last_updated,
            created_at: row.created_at,
        }
    }
}

/// Insert a website row.
pub async fn create(pool: &PgPool, payload: &WebsitePayload) -> Result<Website, sqlx::Error> {
    let row = sqlx::query_as::<_, WebsiteRow>(&format!(
        r#"
        INSERT INTO websites (
            default_locale, url, title, short_title, description,
            devices, categories, region_exclusions,
            icon_type, icon_hash, status, is_disabled
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {WEBSITE_COLUMNS}
        "#
    ))
    .bind(&payload.default_locale)
    .bind(&payload.url)
    .bind(&payload.title)
    .bind(&payload.short_title)
    .bind(&payload.description)
    .bind(Json(&payload.devices))
    .bind(Json(&payload.categories))
    .bind(Json(&payload.region_exclusions))
    .bind(&payload.icon_type)
    .bind(&payload.icon_hash)
    .bind(payload.status)
    .bind(payload.is_disabled)
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

/// Find a website by ID
pub async fn find_by_id(pool: &PgPool, website_id: i64) -> Result<Option<Website>, sqlx::Error> {
    let row = sqlx::query_as::<_, WebsiteRow>(&format!(
        "SELECT {WEBSITE_COLUMNS} FROM websites WHERE id = $1"
    ))
    .bind(website_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Website::from))
}

/// Apply a partial field update; absent values keep the stored column.
/// Any update bumps `last_updated`.
pub async fn update_fields(
    pool: &PgPool,
    website_id: i64,
    update: &WebsiteUpdate,
) -> Result<Option<Website>, sqlx::Error> {
    let row = sqlx::query_as::<_, WebsiteRow>(&format!(
        r#"
        UPDATE websites
        SET default_locale = COALESCE($2, default_locale),
            url = COALESCE($3, url),
            title = COALESCE($4, title),
            short_title = COALESCE($5, short_title),
            description = COALESCE($6, description),
            devices = COALESCE($7::jsonb, devices),
            categories = COALESCE($8::jsonb, categories),
            region_exclusions = COALESCE($9::jsonb, region_exclusions),
            icon_type = COALESCE($10, icon_type),
            icon_hash = COALESCE($11, icon_hash),
            status = COALESCE($12, status),
            is_disabled = COALESCE($13, is_disabled),
            last_updated = NOW()
        WHERE id = $1
        RETURNING {WEBSITE_COLUMNS}
        "#
    ))
    .bind(website_id)
    .bind(&update.default_locale)
    .bind(&update.url)
    .bind(&update.title)
    .bind(&update.short_title)
    .bind(&update.description)
    .bind(update.devices.as_ref().map(Json))
    .bind(update.categories.as_ref().map(Json))
    .bind(update.region_exclusions.as_ref().map(Json))
    .bind(&update.icon_type)
    .bind(&update.icon_hash)
    .bind(update.status)
    .bind(update.is_disabled)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Website::from))
}

/// Delete a website. Metric rows cascade.
pub async fn delete(pool: &PgPool, website_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM websites WHERE id = $1")
        .bind(website_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// List websites, most recently updated first, optionally filtered by
/// status code.
pub async fn list(
    pool: &PgPool,
    status: Option<i32>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Website>, sqlx::Error> {
    let rows = sqlx::query_as::<_, WebsiteRow>(&format!(
        r#"
        SELECT {WEBSITE_COLUMNS}
        FROM websites
        WHERE ($1::int4 IS NULL OR status = $1)
        ORDER BY last_updated DESC, id DESC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Website::from).collect())
}

/// Count websites matching the list filter.
pub async fn count(pool: &PgPool, status: Option<i32>) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM websites WHERE ($1::int4 IS NULL OR status = $1)")
            .bind(status)
            .fetch_one(pool)
            .await?;

    Ok(count)
}
