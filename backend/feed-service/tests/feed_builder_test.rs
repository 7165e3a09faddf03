//! Integration Tests: Feed Builder
//!
//! Tests the atomic per-region feed rebuild with a real database.
//!
//! Coverage:
//! - Submitted order becomes stored order
//! - Repeat submissions fully replace a region
//! - Empty lists wipe a region
//! - Regions absent from the payload are untouched
//! - Carrier-scoped rows survive rebuilds
//! - Invalid payloads are rejected before any mutation

mod common;

use common::{create_collection, setup_test_db};
use feed_service::db::feed_repo;
use feed_service::models::{CollectionKind, FeedItemRef};
use feed_service::regions::Region;
use feed_service::services::FeedBuilderService;
use serde_json::{json, Value};
use sqlx::{Pool, Postgres};

fn payload(value: Value) -> serde_json::Map<String, Value> {
    value.as_object().expect("payload must be an object").clone()
}

async fn region_feed(pool: &Pool<Postgres>, region: Region) -> Vec<(i32, String, i64)> {
    let items = feed_repo::list(pool, Some(region.id()), None, 100, 0)
        .await
        .expect("Failed to list feed items");

    items
        .into_iter()
        .map(|i| (i.order, i.item.item_type().to_string(), i.item.item_id()))
        .collect()
}

#[tokio::test]
#[ignore]
async fn test_rebuild_stores_submitted_order() {
    let pool = setup_test_db().await.unwrap();
    let builder = FeedBuilderService::new(pool.clone());

    let app_a = create_collection(&pool, CollectionKind::App, "app-a").await;
    let app_b = create_collection(&pool, CollectionKind::App, "app-b").await;
    let brand = create_collection(&pool, CollectionKind::Brand, "summer-brand").await;
    let coll = create_collection(&pool, CollectionKind::Collection, "staff-picks").await;

    let summary = builder
        .rebuild(&payload(json!({
            "us": [
                ["app", app_b],
                ["collection", coll],
                ["app", app_a],
                ["brand", brand]
            ]
        })))
        .await
        .expect("Rebuild failed");

    assert_eq!(summary.regions, 1);
    assert_eq!(summary.inserted, 4);

    let feed = region_feed(&pool, Region::Us).await;
    assert_eq!(
        feed,
        vec![
            (0, "app".to_string(), app_b),
            (1, "collection".to_string(), coll),
            (2, "app".to_string(), app_a),
            (3, "brand".to_string(), brand),
        ]
    );
}

#[tokio::test]
#[ignore]
async fn test_rebuild_replaces_previous_feed() {
    let pool = setup_test_db().await.unwrap();
    let builder = FeedBuilderService::new(pool.clone());

    let app_a = create_collection(&pool, CollectionKind::App, "app-a").await;
    let app_b = create_collection(&pool, CollectionKind::App, "app-b").await;

    builder
        .rebuild(&payload(json!({"us": [["app", app_a], ["app", app_b]]})))
        .await
        .expect("First rebuild failed");

    let summary = builder
        .rebuild(&payload(json!({"us": [["app", app_b]]})))
        .await
        .expect("Second rebuild failed");

    assert_eq!(summary.deleted, 2);
    assert_eq!(summary.inserted, 1);

    let feed = region_feed(&pool, Region::Us).await;
    assert_eq!(feed, vec![(0, "app".to_string(), app_b)]);
}

#[tokio::test]
#[ignore]
async fn test_empty_list_wipes_region() {
    let pool = setup_test_db().await.unwrap();
    let builder = FeedBuilderService::new(pool.clone());

    let app = create_collection(&pool, CollectionKind::App, "app-a").await;
    builder
        .rebuild(&payload(json!({"us": [["app", app]]})))
        .await
        .expect("Seed rebuild failed");

    let summary = builder
        .rebuild(&payload(json!({"us": []})))
        .await
        .expect("Wipe rebuild failed");

    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.inserted, 0);
    assert!(region_feed(&pool, Region::Us).await.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_other_regions_are_untouched() {
    let pool = setup_test_db().await.unwrap();
    let builder = FeedBuilderService::new(pool.clone());

    let app_a = create_collection(&pool, CollectionKind::App, "app-a").await;
    let app_b = create_collection(&pool, CollectionKind::App, "app-b").await;

    builder
        .rebuild(&payload(json!({
            "us": [["app", app_a]],
            "br": [["app", app_b]]
        })))
        .await
        .expect("Seed rebuild failed");

    // Rebuilding only "us" must leave "br" exactly as it was.
    builder
        .rebuild(&payload(json!({"us": [["app", app_b]]})))
        .await
        .expect("Partial rebuild failed");

    let br_feed = region_feed(&pool, Region::Br).await;
    assert_eq!(br_feed, vec![(0, "app".to_string(), app_b)]);
}

#[tokio::test]
#[ignore]
async fn test_carrier_scoped_rows_survive_rebuild() {
    let pool = setup_test_db().await.unwrap();
    let builder = FeedBuilderService::new(pool.clone());

    let app_a = create_collection(&pool, CollectionKind::App, "app-a").await;
    let app_b = create_collection(&pool, CollectionKind::App, "app-b").await;

    // A carrier-scoped row in the same region, created outside the builder.
    feed_repo::create(&pool, Region::Us.id(), Some(7), 0, FeedItemRef::App(app_a))
        .await
        .expect("Failed to create carrier row");

    builder
        .rebuild(&payload(json!({"us": [["app", app_b]]})))
        .await
        .expect("Rebuild failed");

    let carrier_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM feed_items WHERE region = $1 AND carrier IS NOT NULL",
    )
    .bind(Region::Us.id())
    .fetch_one(&pool)
    .await
    .expect("Failed to count carrier rows");

    assert_eq!(carrier_count, 1, "Carrier-scoped row should survive");
}

#[tokio::test]
#[ignore]
async fn test_unknown_region_rejected_without_mutation() {
    let pool = setup_test_db().await.unwrap();
    let builder = FeedBuilderService::new(pool.clone());

    let app = create_collection(&pool, CollectionKind::App, "app-a").await;
    builder
        .rebuild(&payload(json!({"us": [["app", app]]})))
        .await
        .expect("Seed rebuild failed");

    let err = builder
        .rebuild(&payload(json!({
            "us": [],
            "atlantis": [["app", app]]
        })))
        .await
        .expect_err("Unknown region should be rejected");

    assert!(err.to_string().contains("Unknown region"));

    // The valid "us" entry in the same payload must not have been applied.
    let feed = region_feed(&pool, Region::Us).await;
    assert_eq!(feed.len(), 1, "Feed should be untouched after rejection");
}

#[tokio::test]
#[ignore]
async fn test_malformed_entry_rejected_without_mutation() {
    let pool = setup_test_db().await.unwrap();
    let builder = FeedBuilderService::new(pool.clone());

    let app = create_collection(&pool, CollectionKind::App, "app-a").await;
    builder
        .rebuild(&payload(json!({"us": [["app", app]]})))
        .await
        .expect("Seed rebuild failed");

    let err = builder
        .rebuild(&payload(json!({"us": [["app", app, 3]]})))
        .await
        .expect_err("Malformed entry should be rejected");

    assert_eq!(err.to_string(), "Expected two-element arrays.");

    let feed = region_feed(&pool, Region::Us).await;
    assert_eq!(feed.len(), 1, "Feed should be untouched after rejection");
}
