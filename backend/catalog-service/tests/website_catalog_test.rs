//! Integration Tests: Website Catalog
//!
//! Tests website CRUD, search-index synchronization, and per-region metric
//! upserts with a real database and a recording indexer.
//!
//! Coverage:
//! - Create and update index the row; delete unindexes by id
//! - Status codes outside the known set are rejected
//! - Popularity/trending upserts are unique per (website, region)
//! - Metric writes require an existing website

mod common;

use std::sync::Arc;

use catalog_service::db::metrics_repo::MetricKind;
use catalog_service::error::AppError;
use catalog_service::models::WebsiteUpdate;
use catalog_service::services::WebsiteService;
use common::{setup_test_db, website_payload, RecordingIndexer};

#[tokio::test]
#[ignore]
async fn test_create_and_update_index_the_row() {
    let pool = setup_test_db().await.unwrap();
    let indexer = Arc::new(RecordingIndexer::default());
    let service = WebsiteService::new(pool.clone(), indexer.clone());

    let site = service
        .create(website_payload("site-a"))
        .await
        .expect("Create failed");

    assert_eq!(indexer.indexed_ids(), vec![site.id]);

    let updated = service
        .update(
            site.id,
            WebsiteUpdate {
                title: Some("Renamed".to_string()),
                ..WebsiteUpdate::default()
            },
        )
        .await
        .expect("Update failed");

    assert_eq!(updated.title.as_deref(), Some("Renamed"));
    assert_eq!(
        indexer.indexed_ids(),
        vec![site.id, site.id],
        "Update should re-index"
    );
    assert!(
        updated.last_updated > site.last_updated,
        "Update should bump last_updated"
    );
}

#[tokio::test]
#[ignore]
async fn test_delete_unindexes_by_id() {
    let pool = setup_test_db().await.unwrap();
    let indexer = Arc::new(RecordingIndexer::default());
    let service = WebsiteService::new(pool.clone(), indexer.clone());

    let site = service
        .create(website_payload("site-a"))
        .await
        .expect("Create failed");

    service.delete(site.id).await.expect("Delete failed");

    assert_eq!(indexer.unindexed_ids(), vec![site.id]);

    let missing = service.get(site.id).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    // Deleting again is a 404, not a second unindex call.
    let err = service.delete(site.id).await;
    assert!(matches!(err, Err(AppError::NotFound(_))));
    assert_eq!(indexer.unindexed_ids(), vec![site.id]);
}

#[tokio::test]
#[ignore]
async fn test_unknown_status_is_rejected() {
    let pool = setup_test_db().await.unwrap();
    let indexer = Arc::new(RecordingIndexer::default());
    let service = WebsiteService::new(pool.clone(), indexer.clone());

    let mut payload = website_payload("site-a");
    payload.status = 99;

    let err = service
        .create(payload)
        .await
        .expect_err("Unknown status should be rejected");

    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains("Unknown status"));
    assert!(
        indexer.indexed_ids().is_empty(),
        "Nothing should be indexed on rejection"
    );
}

#[tokio::test]
#[ignore]
async fn test_metric_upsert_is_unique_per_region() {
    let pool = setup_test_db().await.unwrap();
    let indexer = Arc::new(RecordingIndexer::default());
    let service = WebsiteService::new(pool.clone(), indexer.clone());

    let site = service
        .create(website_payload("site-a"))
        .await
        .expect("Create failed");

    // Same region twice: the value is overwritten, not duplicated.
    service
        .set_metric(MetricKind::Popularity, site.id, 2, 10.0)
        .await
        .expect("First upsert failed");
    let overwritten = service
        .set_metric(MetricKind::Popularity, site.id, 2, 25.5)
        .await
        .expect("Second upsert failed");

    assert_eq!(overwritten.value, 25.5);

    // Region 0 is the all-regions aggregate and its own row.
    service
        .set_metric(MetricKind::Popularity, site.id, 0, 99.0)
        .await
        .expect("Aggregate upsert failed");

    let metrics = service
        .metrics(MetricKind::Popularity, site.id)
        .await
        .expect("Fetch failed");

    assert_eq!(metrics.len(), 2);
    assert_eq!(metrics[0].region, 0);
    assert_eq!(metrics[0].value, 99.0);
    assert_eq!(metrics[1].region, 2);
    assert_eq!(metrics[1].value, 25.5);

    // Trending rows live in their own table.
    let trending = service
        .metrics(MetricKind::Trending, site.id)
        .await
        .expect("Fetch failed");
    assert!(trending.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_metric_requires_existing_website() {
    let pool = setup_test_db().await.unwrap();
    let indexer = Arc::new(RecordingIndexer::default());
    let service = WebsiteService::new(pool.clone(), indexer.clone());

    let err = service
        .set_metric(MetricKind::Trending, 999_999, 0, 1.0)
        .await;

    assert!(matches!(err, Err(AppError::NotFound(_))));
}

#[tokio::test]
#[ignore]
async fn test_list_filters_by_status_and_orders_by_freshness() {
    let pool = setup_test_db().await.unwrap();
    let indexer = Arc::new(RecordingIndexer::default());
    let service = WebsiteService::new(pool.clone(), indexer.clone());

    let older = service
        .create(website_payload("site-a"))
        .await
        .expect("Create failed");

    let mut pending = website_payload("site-b");
    pending.status = 2;
    service.create(pending).await.expect("Create failed");

    // Touching the older site makes it the freshest.
    service
        .update(
            older.id,
            WebsiteUpdate {
                description: Some("refreshed".to_string()),
                ..WebsiteUpdate::default()
            },
        )
        .await
        .expect("Update failed");

    let all = service.list(None, 25, 0).await.expect("List failed");
    assert_eq!(all.meta.total_count, 2);
    assert_eq!(all.objects[0].id, older.id, "Freshest site comes first");

    let public_only = service.list(Some(4), 25, 0).await.expect("List failed");
    assert_eq!(public_only.meta.total_count, 1);
    assert_eq!(public_only.objects[0].id, older.id);
}
