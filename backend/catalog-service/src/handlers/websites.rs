/// Website catalog handlers
use std::sync::Arc;

use actix_auth::middleware::Groups;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db::metrics_repo::MetricKind;
use crate::error::{AppError, Result};
use crate::handlers::{require_curator, WebsiteFilter};
use crate::models::{MetricPayload, WebsitePayload, WebsiteUpdate};
use crate::search::WebsiteIndexer;
use crate::services::WebsiteService;

fn service(pool: &web::Data<PgPool>, indexer: &web::Data<Arc<dyn WebsiteIndexer>>) -> WebsiteService {
    WebsiteService::new((***pool).clone(), indexer.get_ref().clone())
}

fn parse_metric_kind(segment: &str) -> Result<MetricKind> {
    match segment {
        "popularity" => Ok(MetricKind::Popularity),
        "trending" => Ok(MetricKind::Trending),
        other => Err(AppError::NotFound(format!(
            "unknown metric kind '{}'",
            other
        ))),
    }
}

/// List websites, most recently updated first.
pub async fn list_websites(
    pool: web::Data<PgPool>,
    indexer: web::Data<Arc<dyn WebsiteIndexer>>,
    query: web::Query<WebsiteFilter>,
) -> Result<HttpResponse> {
    let page = service(&pool, &indexer)
        .list(query.status, query.limit(), query.offset())
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Create a website and index it.
pub async fn create_website(
    pool: web::Data<PgPool>,
    indexer: web::Data<Arc<dyn WebsiteIndexer>>,
    groups: Groups,
    payload: web::Json<WebsitePayload>,
) -> Result<HttpResponse> {
    require_curator(&groups)?;

    let site = service(&pool, &indexer).create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(site))
}

/// Fetch a website by id.
pub async fn get_website(
    pool: web::Data<PgPool>,
    indexer: web::Data<Arc<dyn WebsiteIndexer>>,
    website_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let site = service(&pool, &indexer).get(*website_id).await?;
    Ok(HttpResponse::Ok().json(site))
}

/// Partially update a website and re-index it.
pub async fn update_website(
    pool: web::Data<PgPool>,
    indexer: web::Data<Arc<dyn WebsiteIndexer>>,
    groups: Groups,
    website_id: web::Path<i64>,
    payload: web::Json<WebsiteUpdate>,
) -> Result<HttpResponse> {
    require_curator(&groups)?;

    let site = service(&pool, &indexer)
        .update(*website_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(site))
}

/// Delete a website and remove it from the index.
pub async fn delete_website(
    pool: web::Data<PgPool>,
    indexer: web::Data<Arc<dyn WebsiteIndexer>>,
    groups: Groups,
    website_id: web::Path<i64>,
) -> Result<HttpResponse> {
    require_curator(&groups)?;

    service(&pool, &indexer).delete(*website_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Upsert a per-region popularity or trending value.
pub async fn set_metric(
    pool: web::Data<PgPool>,
    indexer: web::Data<Arc<dyn WebsiteIndexer>>,
    groups: Groups,
    path: web::Path<(i64, String)>,
    payload: web::Json<MetricPayload>,
) -> Result<HttpResponse> {
    require_curator(&groups)?;
    let (website_id, segment) = path.into_inner();
    let kind = parse_metric_kind(&segment)?;

    let metric = service(&pool, &indexer)
        .set_metric(kind, website_id, payload.region, payload.value)
        .await?;
    Ok(HttpResponse::Ok().json(metric))
}

/// Fetch all per-region values of one metric for a website.
pub async fn get_metrics(
    pool: web::Data<PgPool>,
    indexer: web::Data<Arc<dyn WebsiteIndexer>>,
    path: web::Path<(i64, String)>,
) -> Result<HttpResponse> {
    let (website_id, segment) = path.into_inner();
    let kind = parse_metric_kind(&segment)?;

    let metrics = service(&pool, &indexer).metrics(kind, website_id).await?;
    Ok(HttpResponse::Ok().json(metrics))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_kind_segments() {
        assert_eq!(
            parse_metric_kind("popularity").unwrap(),
            MetricKind::Popularity
        );
        assert_eq!(parse_metric_kind("trending").unwrap(), MetricKind::Trending);
        assert!(parse_metric_kind("installs").is_err());
    }
}
