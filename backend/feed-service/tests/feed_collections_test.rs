//! Integration Tests: Feed Collections
//!
//! Tests the shared collection manager across the three kinds with a real
//! database.
//!
//! Coverage:
//! - Create attaches ordered app membership
//! - Unknown app ids fail with the fixed message, base record persists
//! - Update resolves apps before touching base fields
//! - Lookup by numeric id and by slug; numeric keys never match slugs
//! - Duplicate slugs rejected as client errors
//! - Delete cascades membership rows

mod common;

use common::{create_app, setup_test_db};
use feed_service::error::AppError;
use feed_service::models::{CollectionKind, CollectionPayload, CollectionUpdate};
use feed_service::services::CollectionService;

fn payload(slug: &str, apps: Option<Vec<i64>>) -> CollectionPayload {
    CollectionPayload {
        slug: slug.to_string(),
        name: format!("Collection {}", slug),
        description: None,
        background_color: None,
        layout: None,
        apps,
    }
}

#[tokio::test]
#[ignore]
async fn test_create_attaches_ordered_membership() {
    let pool = setup_test_db().await.unwrap();
    let service = CollectionService::new(pool.clone());

    let app_a = create_app(&pool, "app-a").await;
    let app_b = create_app(&pool, "app-b").await;

    let created = service
        .create(
            CollectionKind::Collection,
            payload("staff-picks", Some(vec![app_b, app_a])),
        )
        .await
        .expect("Create failed");

    assert_eq!(created.slug, "staff-picks");
    assert_eq!(created.apps, vec![app_b, app_a], "Submitted order kept");
}

#[tokio::test]
#[ignore]
async fn test_unknown_app_fails_but_base_record_persists() {
    let pool = setup_test_db().await.unwrap();
    let service = CollectionService::new(pool.clone());

    let app = create_app(&pool, "app-a").await;

    let err = service
        .create(
            CollectionKind::Brand,
            payload("summer-brand", Some(vec![app, 999_999])),
        )
        .await
        .expect_err("Unresolved app id should fail the request");

    assert_eq!(
        err.to_string(),
        "One or more of the specified `apps` do not exist."
    );
    assert!(matches!(err, AppError::Reference(_)));

    // The base record was persisted before association ran.
    let fetched = service
        .get(CollectionKind::Brand, "summer-brand")
        .await
        .expect("Base record should exist");
    assert!(fetched.apps.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_update_resolves_apps_before_field_changes() {
    let pool = setup_test_db().await.unwrap();
    let service = CollectionService::new(pool.clone());

    service
        .create(CollectionKind::App, payload("editorial-pick", None))
        .await
        .expect("Create failed");

    let err = service
        .update(
            CollectionKind::App,
            "editorial-pick",
            CollectionUpdate {
                name: Some("Renamed".to_string()),
                apps: Some(vec![999_999]),
                ..CollectionUpdate::default()
            },
        )
        .await
        .expect_err("Unresolved app id should fail the update");

    assert!(matches!(err, AppError::Reference(_)));

    // The rename must not have been applied.
    let fetched = service
        .get(CollectionKind::App, "editorial-pick")
        .await
        .expect("Record should still exist");
    assert_eq!(fetched.name, "Collection editorial-pick");
}

#[tokio::test]
#[ignore]
async fn test_update_replaces_membership_and_dedupes() {
    let pool = setup_test_db().await.unwrap();
    let service = CollectionService::new(pool.clone());

    let app_a = create_app(&pool, "app-a").await;
    let app_b = create_app(&pool, "app-b").await;

    let created = service
        .create(
            CollectionKind::Collection,
            payload("staff-picks", Some(vec![app_a])),
        )
        .await
        .expect("Create failed");

    let updated = service
        .update(
            CollectionKind::Collection,
            &created.id.to_string(),
            CollectionUpdate {
                apps: Some(vec![app_b, app_a, app_b]),
                ..CollectionUpdate::default()
            },
        )
        .await
        .expect("Update failed");

    assert_eq!(updated.apps, vec![app_b, app_a], "Replaced and deduped");
}

#[tokio::test]
#[ignore]
async fn test_lookup_by_id_and_slug() {
    let pool = setup_test_db().await.unwrap();
    let service = CollectionService::new(pool.clone());

    let created = service
        .create(CollectionKind::Brand, payload("summer-brand", None))
        .await
        .expect("Create failed");

    let by_id = service
        .get(CollectionKind::Brand, &created.id.to_string())
        .await
        .expect("Lookup by id failed");
    let by_slug = service
        .get(CollectionKind::Brand, "summer-brand")
        .await
        .expect("Lookup by slug failed");

    assert_eq!(by_id.id, by_slug.id);

    let missing = service.get(CollectionKind::Brand, "winter-brand").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
#[ignore]
async fn test_numeric_key_resolves_as_id_not_slug() {
    let pool = setup_test_db().await.unwrap();
    let service = CollectionService::new(pool.clone());

    let first = service
        .create(CollectionKind::Brand, payload("summer-brand", None))
        .await
        .expect("First create failed");

    // A second record whose slug happens to be the first record's id.
    service
        .create(CollectionKind::Brand, payload(&first.id.to_string(), None))
        .await
        .expect("Second create failed");

    let resolved = service
        .get(CollectionKind::Brand, &first.id.to_string())
        .await
        .expect("Lookup failed");

    assert_eq!(resolved.id, first.id, "Numeric keys are ids, never slugs");
    assert_eq!(resolved.slug, "summer-brand");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_slug_is_a_client_error() {
    let pool = setup_test_db().await.unwrap();
    let service = CollectionService::new(pool.clone());

    service
        .create(CollectionKind::Collection, payload("staff-picks", None))
        .await
        .expect("First create failed");

    let err = service
        .create(CollectionKind::Collection, payload("staff-picks", None))
        .await
        .expect_err("Duplicate slug should be rejected");

    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains("slug already exists"));
}

#[tokio::test]
#[ignore]
async fn test_delete_cascades_membership() {
    let pool = setup_test_db().await.unwrap();
    let service = CollectionService::new(pool.clone());

    let app = create_app(&pool, "app-a").await;
    let created = service
        .create(
            CollectionKind::Collection,
            payload("staff-picks", Some(vec![app])),
        )
        .await
        .expect("Create failed");

    service
        .delete(CollectionKind::Collection, &created.id.to_string())
        .await
        .expect("Delete failed");

    let membership_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM feed_collection_membership")
            .fetch_one(&pool)
            .await
            .expect("Failed to count membership rows");

    assert_eq!(membership_count, 0, "Membership rows should cascade");

    let missing = service
        .get(CollectionKind::Collection, "staff-picks")
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}
