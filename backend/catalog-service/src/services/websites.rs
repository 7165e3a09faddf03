/// Website catalog service
///
/// Wraps the repository and keeps the search index in step: every
/// successful create/update re-indexes the row, every delete removes the
/// document. Indexing runs after the database write; on the success path
/// the row and the document never diverge.
use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::db::metrics_repo::{self, MetricKind};
use crate::db::website_repo;
use crate::error::{AppError, Result};
use crate::models::{
    PageMeta, Paginated, Website, WebsiteMetric, WebsitePayload, WebsiteStatus, WebsiteUpdate,
};
use crate::search::WebsiteIndexer;

pub struct WebsiteService {
    pool: PgPool,
    indexer: Arc<dyn WebsiteIndexer>,
}

impl WebsiteService {
    pub fn new(pool: PgPool, indexer: Arc<dyn WebsiteIndexer>) -> Self {
        Self { pool, indexer }
    }

    pub async fn create(&self, payload: WebsitePayload) -> Result<Website> {
        validate_status(payload.status)?;

        let site = website_repo::create(&self.pool, &payload).await?;
        self.indexer.index(&site).await?;

        info!(id = site.id, "Created website");
        Ok(site)
    }

    pub async fn get(&self, website_id: i64) -> Result<Website> {
        website_repo::find_by_id(&self.pool, website_id)
            .await?
            .ok_or_else(|| not_found(website_id))
    }

    pub async fn list(
        &self,
        status: Option<i32>,
        limit: i64,
        offset: i64,
    ) -> Result<Paginated<Website>> {
        if let Some(code) = status {
            validate_status(code)?;
        }

        let total_count = website_repo::count(&self.pool, status).await?;
        let objects = website_repo::list(&self.pool, status, limit, offset).await?;

        Ok(Paginated {
            objects,
            meta: PageMeta {
                total_count,
                limit,
                offset,
            },
        })
    }

    pub async fn update(&self, website_id: i64, update: WebsiteUpdate) -> Result<Website> {
        if let Some(code) = update.status {
            validate_status(code)?;
        }

        let site = website_repo::update_fields(&self.pool, website_id, &update)
            .await?
            .ok_or_else(|| not_found(website_id))?;
        self.indexer.index(&site).await?;

        Ok(site)
    }

    pub async fn delete(&self, website_id: i64) -> Result<()> {
        if !website_repo::delete(&self.pool, website_id).await? {
            return Err(not_found(website_id));
        }
        self.indexer.unindex(website_id).await?;

        info!(id = website_id, "Deleted website");
        Ok(())
    }

    /// Upsert a per-region metric value. The website must exist; the metric
    /// tables do not shadow-create catalog rows.
    pub async fn set_metric(
        &self,
        kind: MetricKind,
        website_id: i64,
        region: i32,
        value: f64,
    ) -> Result<WebsiteMetric> {
        if region < 0 {
            return Err(AppError::Validation(format!("Invalid region: {}", region)));
        }
        self.get(website_id).await?;

        let metric = metrics_repo::upsert(&self.pool, kind, website_id, region, value).await?;
        info!(
            kind = kind.label(),
            website_id, region, value, "Updated website metric"
        );
        Ok(metric)
    }

    pub async fn metrics(&self, kind: MetricKind, website_id: i64) -> Result<Vec<WebsiteMetric>> {
        self.get(website_id).await?;
        Ok(metrics_repo::for_website(&self.pool, kind, website_id).await?)
    }
}

fn not_found(website_id: i64) -> AppError {
    AppError::NotFound(format!("website {}", website_id))
}

fn validate_status(code: i32) -> Result<()> {
    WebsiteStatus::from_code(code)
        .map(|_| ())
        .ok_or_else(|| AppError::Validation(format!("Unknown status: {}", code)))
}
