/// Feed collection handlers
///
/// One set of handlers serves all three collection kinds; the first path
/// segment under `/feed` selects the kind (`apps`, `brands`, `collections`).
/// Objects are addressable by numeric id or slug.
use actix_auth::middleware::Groups;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::handlers::{require_curator, PaginationParams};
use crate::models::{CollectionKind, CollectionPayload, CollectionUpdate};
use crate::services::CollectionService;

fn parse_kind(segment: &str) -> Result<CollectionKind> {
    match segment {
        "apps" => Ok(CollectionKind::App),
        "brands" => Ok(CollectionKind::Brand),
        "collections" => Ok(CollectionKind::Collection),
        other => Err(AppError::NotFound(format!(
            "unknown feed resource '{}'",
            other
        ))),
    }
}

/// List collections of one kind, newest first.
pub async fn list_collections(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let kind = parse_kind(&path)?;
    let service = CollectionService::new((**pool).clone());

    let page = service.list(kind, query.limit(), query.offset()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Create a collection and attach its ordered app membership.
pub async fn create_collection(
    pool: web::Data<PgPool>,
    groups: Groups,
    path: web::Path<String>,
    payload: web::Json<CollectionPayload>,
) -> Result<HttpResponse> {
    require_curator(&groups)?;
    let kind = parse_kind(&path)?;
    let service = CollectionService::new((**pool).clone());

    let created = service.create(kind, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Fetch a collection by id or slug.
pub async fn get_collection(
    pool: web::Data<PgPool>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (segment, key) = path.into_inner();
    let kind = parse_kind(&segment)?;
    let service = CollectionService::new((**pool).clone());

    let collection = service.get(kind, &key).await?;
    Ok(HttpResponse::Ok().json(collection))
}

/// Partially update a collection. When `apps` is present the membership is
/// replaced first; if any id fails to resolve, no field changes either.
pub async fn update_collection(
    pool: web::Data<PgPool>,
    groups: Groups,
    path: web::Path<(String, String)>,
    payload: web::Json<CollectionUpdate>,
) -> Result<HttpResponse> {
    require_curator(&groups)?;
    let (segment, key) = path.into_inner();
    let kind = parse_kind(&segment)?;
    let service = CollectionService::new((**pool).clone());

    let updated = service.update(kind, &key, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete a collection; membership rows cascade.
pub async fn delete_collection(
    pool: web::Data<PgPool>,
    groups: Groups,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    require_curator(&groups)?;
    let (segment, key) = path.into_inner();
    let kind = parse_kind(&segment)?;
    let service = CollectionService::new((**pool).clone());

    service.delete(kind, &key).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segments_map_to_kinds() {
        assert_eq!(parse_kind("apps").unwrap(), CollectionKind::App);
        assert_eq!(parse_kind("brands").unwrap(), CollectionKind::Brand);
        assert_eq!(
            parse_kind("collections").unwrap(),
            CollectionKind::Collection
        );
        assert!(parse_kind("shelves").is_err());
    }
}
