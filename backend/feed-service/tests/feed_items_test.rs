//! Integration Tests: Feed Item Editorial CRUD
//!
//! Tests the one-off write path against the schema constraints with a real
//! database.
//!
//! Coverage:
//! - A taken carrier-less order slot is a client error, not a server error
//! - A reference to a nonexistent entity is a client error
//! - Carrier-scoped rows are exempt from the order uniqueness rule

mod common;

use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use common::{create_collection, setup_test_db};
use feed_service::db::feed_repo;
use feed_service::error::AppError;
use feed_service::handlers::items::map_write_error;
use feed_service::models::{CollectionKind, FeedItemRef};
use feed_service::regions::Region;

#[tokio::test]
#[ignore]
async fn test_duplicate_order_create_is_a_client_error() {
    let pool = setup_test_db().await.unwrap();

    let app = create_collection(&pool, CollectionKind::App, "app-a").await;
    feed_repo::create(&pool, Region::Us.id(), None, 0, FeedItemRef::App(app))
        .await
        .expect("First create failed");

    let err = feed_repo::create(&pool, Region::Us.id(), None, 0, FeedItemRef::App(app))
        .await
        .expect_err("Taken order slot should be rejected");

    let mapped = map_write_error(err);
    assert!(matches!(mapped, AppError::Validation(_)));
    assert_eq!(mapped.status_code(), StatusCode::BAD_REQUEST);
    assert!(mapped.to_string().contains("already occupies"));
}

#[tokio::test]
#[ignore]
async fn test_update_into_taken_order_is_a_client_error() {
    let pool = setup_test_db().await.unwrap();

    let app = create_collection(&pool, CollectionKind::App, "app-a").await;
    feed_repo::create(&pool, Region::Us.id(), None, 0, FeedItemRef::App(app))
        .await
        .expect("First create failed");
    let second = feed_repo::create(&pool, Region::Us.id(), None, 1, FeedItemRef::App(app))
        .await
        .expect("Second create failed");

    let err = feed_repo::update(&pool, second.id, Region::Us.id(), None, 0, FeedItemRef::App(app))
        .await
        .expect_err("Moving into a taken order slot should be rejected");

    let mapped = map_write_error(err);
    assert!(matches!(mapped, AppError::Validation(_)));
    assert_eq!(mapped.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_unknown_reference_is_a_client_error() {
    let pool = setup_test_db().await.unwrap();

    let err = feed_repo::create(&pool, Region::Us.id(), None, 0, FeedItemRef::Brand(999_999))
        .await
        .expect_err("Nonexistent brand id should be rejected");

    let mapped = map_write_error(err);
    assert!(matches!(mapped, AppError::Reference(_)));
    assert_eq!(mapped.status_code(), StatusCode::BAD_REQUEST);
    assert!(mapped.to_string().contains("does not exist"));
}

#[tokio::test]
#[ignore]
async fn test_carrier_rows_are_exempt_from_order_uniqueness() {
    let pool = setup_test_db().await.unwrap();

    let app = create_collection(&pool, CollectionKind::App, "app-a").await;
    feed_repo::create(&pool, Region::Us.id(), None, 0, FeedItemRef::App(app))
        .await
        .expect("Carrier-less create failed");

    // Same region and order, scoped to a carrier: a separate feed.
    feed_repo::create(&pool, Region::Us.id(), Some(7), 0, FeedItemRef::App(app))
        .await
        .expect("Carrier-scoped create should not collide");
}
