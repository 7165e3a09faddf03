/// Feed builder - atomic per-region rebuild of the curated feed
///
/// The builder accepts a mapping from region slug to an ordered list of
/// `[item_type, item_id]` pairs and makes the stored carrier-less feed match
/// the submitted order exactly. Every region and every entry is validated
/// before any mutation, and the delete + bulk insert pair runs in a single
/// transaction, so a bad payload never leaves a region half-replaced.
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;

use crate::db::feed_repo::{self, NewFeedItem};
use crate::error::{AppError, Result};
use crate::models::FeedItemRef;
use crate::regions::Region;

/// Outcome of a successful rebuild, for logging and tests.
#[derive(Debug, PartialEq, Eq)]
pub struct RebuildSummary {
    pub regions: usize,
    pub deleted: u64,
    pub inserted: usize,
}

pub struct FeedBuilderService {
    pool: PgPool,
}

impl FeedBuilderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Rebuild the carrier-less feed for every region in the payload.
    ///
    /// Payload shape:
    ///
    /// ```json
    /// {
    ///     "us": [
    ///         ["app", 36],
    ///         ["app", 42],
    ///         ["collection", 12],
    ///         ["brand", 12]
    ///     ]
    /// }
    /// ```
    ///
    /// Carrier-scoped rows are never touched. Regions absent from the
    /// payload are never touched. An empty list wipes the region's feed.
    pub async fn rebuild(&self, payload: &serde_json::Map<String, Value>) -> Result<RebuildSummary> {
        let mut region_ids = Vec::with_capacity(payload.len());
        let mut new_items = Vec::new();

        // Validate everything across all regions before any mutation.
        for (slug, entries) in payload {
            let region = Region::from_slug(slug)
                .ok_or_else(|| AppError::Validation(format!("Unknown region: {}", slug)))?;
            let entries = entries.as_array().ok_or_else(|| {
                AppError::Validation(format!("Expected a list of feed entries for region: {}", slug))
            })?;

            region_ids.push(region.id());
            for (order, entry) in entries.iter().enumerate() {
                let item = parse_entry(entry)?;
                new_items.push(NewFeedItem {
                    region: region.id(),
                    order: order as i32,
                    item,
                });
            }
        }

        let mut tx = self.pool.begin().await?;
        let deleted = feed_repo::delete_carrierless_in_regions(&mut tx, &region_ids).await?;
        feed_repo::bulk_insert_items(&mut tx, &new_items).await?;
        tx.commit().await?;

        info!(
            regions = region_ids.len(),
            deleted,
            inserted = new_items.len(),
            "Feed rebuild committed"
        );

        Ok(RebuildSummary {
            regions: region_ids.len(),
            deleted,
            inserted: new_items.len(),
        })
    }
}

/// Parse one wire entry. Anything that is not a two-element
/// `[item_type, item_id]` array is rejected before the builder mutates.
fn parse_entry(entry: &Value) -> Result<FeedItemRef> {
    let malformed = || AppError::Validation("Expected two-element arrays.".to_string());

    let pair = entry.as_array().filter(|a| a.len() == 2).ok_or_else(malformed)?;
    let item_type = pair[0].as_str().ok_or_else(malformed)?;
    let item_id = pair[1].as_i64().ok_or_else(malformed)?;

    FeedItemRef::from_parts(item_type, item_id)
        .ok_or_else(|| AppError::Validation(format!("Unknown item type: {}", item_type)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_valid_entries() {
        assert_eq!(
            parse_entry(&json!(["app", 36])).unwrap(),
            FeedItemRef::App(36)
        );
        assert_eq!(
            parse_entry(&json!(["brand", 12])).unwrap(),
            FeedItemRef::Brand(12)
        );
        assert_eq!(
            parse_entry(&json!(["collection", 12])).unwrap(),
            FeedItemRef::Collection(12)
        );
    }

    #[test]
    fn rejects_wrong_arity() {
        let err = parse_entry(&json!(["app"])).unwrap_err();
        assert!(err.to_string().contains("two-element arrays"));

        let err = parse_entry(&json!(["app", 36, 1])).unwrap_err();
        assert!(err.to_string().contains("two-element arrays"));
    }

    #[test]
    fn rejects_non_array_entries() {
        let err = parse_entry(&json!({"item_type": "app", "id": 36})).unwrap_err();
        assert!(err.to_string().contains("two-element arrays"));

        let err = parse_entry(&json!(36)).unwrap_err();
        assert!(err.to_string().contains("two-element arrays"));
    }

    #[test]
    fn rejects_badly_typed_pairs() {
        assert!(parse_entry(&json!([36, "app"])).is_err());
        assert!(parse_entry(&json!(["app", "36"])).is_err());
    }

    #[test]
    fn rejects_unknown_item_type() {
        let err = parse_entry(&json!(["webapp", 36])).unwrap_err();
        assert!(err.to_string().contains("Unknown item type"));
    }
}
