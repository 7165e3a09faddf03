/// Feed item handlers - editorial CRUD for individual feed slots
///
/// The builder endpoint replaces whole regions at once; these endpoints
/// exist for one-off edits, including carrier-scoped rows the builder never
/// touches.
use actix_auth::middleware::Groups;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::db::feed_repo;
use crate::error::{AppError, Result};
use crate::handlers::require_curator;
use crate::models::{FeedItemPayload, FeedItemRef, FeedItemResponse, PageMeta, Paginated};
use crate::regions::Region;

#[derive(Debug, Deserialize)]
pub struct FeedItemFilter {
    /// Region slug, e.g. "us"
    pub region: Option<String>,
    pub carrier: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn region_id(slug: &str) -> Result<i32> {
    Region::from_slug(slug)
        .map(|r| r.id())
        .ok_or_else(|| AppError::Validation(format!("Unknown region: {}", slug)))
}

fn item_ref(item_type: &str, item_id: i64) -> Result<FeedItemRef> {
    FeedItemRef::from_parts(item_type, item_id)
        .ok_or_else(|| AppError::Validation(format!("Unknown item type: {}", item_type)))
}

/// Constraint violations on the write path are client errors: a taken
/// carrier-less `order` slot trips the unique index, a nonexistent `item_id`
/// trips a foreign key.
pub fn map_write_error(err: sqlx::Error) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::Validation(
                "A feed item already occupies this `order` in the region.".to_string(),
            );
        }
        if db_err.is_foreign_key_violation() {
            return AppError::Reference(
                "The referenced `item_id` does not exist.".to_string(),
            );
        }
    }
    AppError::from(err)
}

/// List feed items, optionally scoped to a region and carrier.
pub async fn list_items(
    pool: web::Data<PgPool>,
    query: web::Query<FeedItemFilter>,
) -> Result<HttpResponse> {
    let region = query.region.as_deref().map(region_id).transpose()?;
    let limit = query.limit.unwrap_or(25).clamp(1, 100);
    let offset = query.offset.unwrap_or(0).max(0);

    let total_count = feed_repo::count(&pool, region, query.carrier).await?;
    let items = feed_repo::list(&pool, region, query.carrier, limit, offset).await?;

    Ok(HttpResponse::Ok().json(Paginated {
        objects: items.iter().map(FeedItemResponse::from).collect::<Vec<_>>(),
        meta: PageMeta {
            total_count,
            limit,
            offset,
        },
    }))
}

/// Create a single feed item.
pub async fn create_item(
    pool: web::Data<PgPool>,
    groups: Groups,
    payload: web::Json<FeedItemPayload>,
) -> Result<HttpResponse> {
    require_curator(&groups)?;

    let region = region_id(&payload.region)?;
    let item = item_ref(&payload.item_type, payload.item_id)?;

    let created = feed_repo::create(&pool, region, payload.carrier, payload.order, item)
        .await
        .map_err(map_write_error)?;
    Ok(HttpResponse::Created().json(FeedItemResponse::from(&created)))
}

/// Fetch a feed item by id.
pub async fn get_item(pool: web::Data<PgPool>, item_id: web::Path<i64>) -> Result<HttpResponse> {
    match feed_repo::find_by_id(&pool, *item_id).await? {
        Some(item) => Ok(HttpResponse::Ok().json(FeedItemResponse::from(&item))),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Replace all mutable fields of a feed item.
pub async fn update_item(
    pool: web::Data<PgPool>,
    groups: Groups,
    item_id: web::Path<i64>,
    payload: web::Json<FeedItemPayload>,
) -> Result<HttpResponse> {
    require_curator(&groups)?;

    let region = region_id(&payload.region)?;
    let item = item_ref(&payload.item_type, payload.item_id)?;

    match feed_repo::update(&pool, *item_id, region, payload.carrier, payload.order, item)
        .await
        .map_err(map_write_error)?
    {
        Some(updated) => Ok(HttpResponse::Ok().json(FeedItemResponse::from(&updated))),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Delete a feed item.
pub async fn delete_item(
    pool: web::Data<PgPool>,
    groups: Groups,
    item_id: web::Path<i64>,
) -> Result<HttpResponse> {
    require_curator(&groups)?;

    if feed_repo::delete(&pool, *item_id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}
