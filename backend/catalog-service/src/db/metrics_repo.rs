use crate::models::WebsiteMetric;
use sqlx::PgPool;

/// Which per-region metric table an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Popularity,
    Trending,
}

impl MetricKind {
    pub fn table(self) -> &'static str {
        match self {
            MetricKind::Popularity => "websites_popularity",
            MetricKind::Trending => "websites_trending",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Popularity => "popularity",
            MetricKind::Trending => "trending",
        }
    }
}

/// Upsert one (website, region) metric value. The unique pair constraint
/// makes repeated submissions overwrite instead of accumulate.
pub async fn upsert(
    pool: &PgPool,
    kind: MetricKind,
    website_id: i64,
    region: i32,
    value: f64,
) -> Result<WebsiteMetric, sqlx::Error> {
    sqlx::query_as::<_, WebsiteMetric>(&format!(
        r#"
        INSERT INTO {table} (website_id, region, value)
        VALUES ($1, $2, $3)
        ON CONFLICT (website_id, region) DO UPDATE SET value = EXCLUDED.value
        RETURNING website_id, value, region
        "#,
        table = kind.table()
    ))
    .bind(website_id)
    .bind(region)
    .bind(value)
    .fetch_one(pool)
    .await
}

/// Fetch all metric rows of one kind for a website, all-regions row first.
pub async fn for_website(
    pool: &PgPool,
    kind: MetricKind,
    website_id: i64,
) -> Result<Vec<WebsiteMetric>, sqlx::Error> {
    sqlx::query_as::<_, WebsiteMetric>(&format!(
        "SELECT website_id, value, region FROM {table} WHERE website_id = $1 ORDER BY region",
        table = kind.table()
    ))
    .bind(website_id)
    .fetch_all(pool)
    .await
}
