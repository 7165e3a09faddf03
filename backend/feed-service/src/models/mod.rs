/// Data models for feed-service
///
/// - `FeedItemRef`: tagged reference to exactly one underlying feed entity
/// - `FeedItem`: one slot in a region's feed
/// - `FeedCollectionRecord`: shared row shape for the three feed-collection
///   kinds (highlighted apps, brands, curated collections)
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::regions::Region;

/// Tag strings accepted on the wire for feed item references.
pub const ITEM_TYPE_APP: &str = "app";
pub const ITEM_TYPE_BRAND: &str = "brand";
pub const ITEM_TYPE_COLLECTION: &str = "collection";

/// A feed item references exactly one underlying entity. The storage layer
/// maps this onto an `item_type` tag plus one populated foreign key; the
/// rest of the code only ever sees this sum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedItemRef {
    App(i64),
    Brand(i64),
    Collection(i64),
}

impl FeedItemRef {
    pub fn item_type(&self) -> &'static str {
        match self {
            FeedItemRef::App(_) => ITEM_TYPE_APP,
            FeedItemRef::Brand(_) => ITEM_TYPE_BRAND,
            FeedItemRef::Collection(_) => ITEM_TYPE_COLLECTION,
        }
    }

    pub fn item_id(&self) -> i64 {
        match self {
            FeedItemRef::App(id) | FeedItemRef::Brand(id) | FeedItemRef::Collection(id) => *id,
        }
    }

    /// Reconstruct from a tag and id. Unknown tags yield `None`.
    pub fn from_parts(item_type: &str, item_id: i64) -> Option<FeedItemRef> {
        match item_type {
            ITEM_TYPE_APP => Some(FeedItemRef::App(item_id)),
            ITEM_TYPE_BRAND => Some(FeedItemRef::Brand(item_id)),
            ITEM_TYPE_COLLECTION => Some(FeedItemRef::Collection(item_id)),
            _ => None,
        }
    }
}

/// One slot in one region's feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub id: i64,
    pub region: i32,
    pub carrier: Option<i32>,
    pub order: i32,
    pub item: FeedItemRef,
}

/// API representation of a feed item.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedItemResponse {
    pub id: i64,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<i32>,
    pub order: i32,
    pub item_type: String,
    pub item_id: i64,
}

impl From<&FeedItem> for FeedItemResponse {
    fn from(item: &FeedItem) -> Self {
        FeedItemResponse {
            id: item.id,
            region: Region::from_id(item.region)
                .map(|r| r.slug().to_string())
                .unwrap_or_else(|| item.region.to_string()),
            carrier: item.carrier,
            order: item.order,
            item_type: item.item.item_type().to_string(),
            item_id: item.item.item_id(),
        }
    }
}

/// Request body for feed item create/update.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FeedItemPayload {
    /// Region slug, e.g. "us"
    pub region: String,
    pub carrier: Option<i32>,
    pub order: i32,
    pub item_type: String,
    pub item_id: i64,
}

/// The three feed-collection kinds. Each kind has its own table and
/// membership table but shares one row shape and one manager flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    App,
    Brand,
    Collection,
}

impl CollectionKind {
    pub fn table(self) -> &'static str {
        match self {
            CollectionKind::App => "feed_apps",
            CollectionKind::Brand => "feed_brands",
            CollectionKind::Collection => "feed_collections",
        }
    }

    pub fn membership_table(self) -> &'static str {
        match self {
            CollectionKind::App => "feed_app_membership",
            CollectionKind::Brand => "feed_brand_membership",
            CollectionKind::Collection => "feed_collection_membership",
        }
    }

    pub fn fk_column(self) -> &'static str {
        match self {
            CollectionKind::App => "feed_app_id",
            CollectionKind::Brand => "feed_brand_id",
            CollectionKind::Collection => "feed_collection_id",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CollectionKind::App => "feed app",
            CollectionKind::Brand => "brand",
            CollectionKind::Collection => "collection",
        }
    }
}

/// Shared row shape for feed collections.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FeedCollectionRecord {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub background_color: Option<String>,
    pub layout: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for collection create. `apps` is write-only input: it is
/// stripped from the payload before the base record is persisted and applied
/// as the ordered membership afterwards.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CollectionPayload {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub apps: Option<Vec<i64>>,
}

/// Request body for collection update; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CollectionUpdate {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub apps: Option<Vec<i64>>,
}

/// API representation of a feed collection, with its ordered app ids.
#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionResponse {
    pub id: i64,
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    pub apps: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

impl CollectionResponse {
    pub fn from_record(record: FeedCollectionRecord, apps: Vec<i64>) -> Self {
        CollectionResponse {
            id: record.id,
            slug: record.slug,
            name: record.name,
            description: record.description,
            background_color: record.background_color,
            layout: record.layout,
            apps,
            created_at: record.created_at,
        }
    }
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageMeta {
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Offset-paginated list envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub objects: Vec<T>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_ref_from_parts() {
        assert_eq!(
            FeedItemRef::from_parts("app", 36),
            Some(FeedItemRef::App(36))
        );
        assert_eq!(
            FeedItemRef::from_parts("collection", 12),
            Some(FeedItemRef::Collection(12))
        );
        assert_eq!(FeedItemRef::from_parts("webapp", 1), None);
    }

    #[test]
    fn item_ref_tag_roundtrip() {
        for item in [
            FeedItemRef::App(1),
            FeedItemRef::Brand(2),
            FeedItemRef::Collection(3),
        ] {
            assert_eq!(
                FeedItemRef::from_parts(item.item_type(), item.item_id()),
                Some(item)
            );
        }
    }

    #[test]
    fn response_uses_region_slug() {
        let item = FeedItem {
            id: 1,
            region: Region::Us.id(),
            carrier: None,
            order: 0,
            item: FeedItemRef::App(36),
        };
        let resp = FeedItemResponse::from(&item);
        assert_eq!(resp.region, "us");
        assert_eq!(resp.item_type, "app");
        assert_eq!(resp.item_id, 36);
    }
}
