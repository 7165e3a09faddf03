/// HTTP handlers for feed endpoints
///
/// This module contains handlers for:
/// - Builder: atomic per-region replacement of the curated feed
/// - Collections: CRUD for the three feed-collection kinds
/// - Items: editorial CRUD for individual feed slots
///
/// Reads are public; writes require the curator grant carried in the JWT.
pub mod builder;
pub mod collections;
pub mod items;

// Re-export handler functions at module level
pub use builder::rebuild_feed;
pub use collections::{
    create_collection, delete_collection, get_collection, list_collections, update_collection,
};
pub use items::{create_item, delete_item, get_item, list_items, update_item};

use actix_auth::middleware::{Groups, JwtAuthMiddleware};
use actix_web::web;
use serde::Deserialize;

use crate::error::{AppError, Result};

/// Mount the feed API under `/api/v1/feed`. Literal routes are registered
/// before the dynamic `{kind}` resources so the builder and item endpoints
/// match first.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/feed")
            .wrap(JwtAuthMiddleware)
            .route("/builder", web::put().to(rebuild_feed))
            .service(
                web::scope("/items")
                    .service(
                        web::resource("")
                            .route(web::get().to(list_items))
                            .route(web::post().to(create_item)),
                    )
                    .service(
                        web::resource("/{item_id}")
                            .route(web::get().to(get_item))
                            .route(web::patch().to(update_item))
                            .route(web::put().to(update_item))
                            .route(web::delete().to(delete_item)),
                    ),
            )
            .service(
                web::resource("/{kind}")
                    .route(web::get().to(list_collections))
                    .route(web::post().to(create_collection)),
            )
            .service(
                web::resource("/{kind}/{key}")
                    .route(web::get().to(get_collection))
                    .route(web::patch().to(update_collection))
                    .route(web::put().to(update_collection))
                    .route(web::delete().to(delete_collection)),
            ),
    );
}

/// Grant required for every write endpoint in this service.
pub const FEED_CURATE: &str = "feed:curate";

/// Reject callers whose token does not carry the curator grant.
pub(crate) fn require_curator(groups: &Groups) -> Result<()> {
    if groups.has(FEED_CURATE) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Missing required permission: {}",
            FEED_CURATE
        )))
    }
}

/// Pagination query parameters shared by list endpoints.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub(crate) fn limit(&self) -> i64 {
        self.limit.unwrap_or(25).clamp(1, 100)
    }

    pub(crate) fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curator_grant_is_required() {
        let curator = Groups(vec![FEED_CURATE.to_string()]);
        assert!(require_curator(&curator).is_ok());

        let other = Groups(vec!["websites:curate".to_string()]);
        assert!(require_curator(&other).is_err());
    }

    #[test]
    fn pagination_defaults_and_clamps() {
        let params = PaginationParams {
            limit: None,
            offset: None,
        };
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams {
            limit: Some(5000),
            offset: Some(-3),
        };
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 0);
    }
}
