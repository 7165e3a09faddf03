/// Feed builder handler - PUT /api/v1/feed/builder
use actix_auth::middleware::Groups;
use actix_web::{web, HttpResponse};
use serde_json::Value;
use sqlx::PgPool;

use crate::error::Result;
use crate::handlers::require_curator;
use crate::services::FeedBuilderService;

/// Replace the carrier-less feed of every region named in the payload.
///
/// The body maps region slugs to ordered `[item_type, item_id]` pairs:
///
/// ```json
/// {"us": [["app", 36], ["collection", 12]]}
/// ```
///
/// The whole payload is validated before anything is written; a bad region
/// or malformed entry leaves every feed untouched.
pub async fn rebuild_feed(
    pool: web::Data<PgPool>,
    groups: Groups,
    payload: web::Json<serde_json::Map<String, Value>>,
) -> Result<HttpResponse> {
    require_curator(&groups)?;

    let service = FeedBuilderService::new((**pool).clone());
    service.rebuild(&payload).await?;

    Ok(HttpResponse::Created().finish())
}
