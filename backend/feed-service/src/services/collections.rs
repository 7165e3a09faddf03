/// Feed collection manager - shared create/update flow for the three
/// feed-collection kinds (highlighted apps, brands, curated collections).
///
/// The `apps` key on payloads is write-only input: it is stripped before the
/// base record is persisted and applied as the ordered membership in a
/// second step. If any referenced marketplace app does not resolve, the
/// request fails with a fixed message and the base record stays persisted.
/// Moving the association into the insert transaction is a known followup.
use std::collections::HashSet;

use sqlx::PgPool;
use tracing::{debug, info};

use crate::db::{app_repo, collection_repo};
use crate::error::{AppError, Result, APPS_DO_NOT_EXIST};
use crate::models::{
    CollectionKind, CollectionPayload, CollectionResponse, CollectionUpdate, FeedCollectionRecord,
    PageMeta, Paginated,
};

pub struct CollectionService {
    pool: PgPool,
}

impl CollectionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a collection and attach its app membership.
    pub async fn create(
        &self,
        kind: CollectionKind,
        payload: CollectionPayload,
    ) -> Result<CollectionResponse> {
        let apps = payload.apps.unwrap_or_default();

        let record = collection_repo::create(
            &self.pool,
            kind,
            &payload.slug,
            &payload.name,
            payload.description.as_deref(),
            payload.background_color.as_deref(),
            payload.layout.as_deref(),
        )
        .await
        .map_err(|e| map_insert_error(e, kind))?;

        // Association runs after the base record is persisted; a reference
        // failure leaves the record in place.
        self.set_apps(kind, record.id, &apps).await?;

        info!(kind = kind.label(), id = record.id, "Created feed collection");
        self.respond(kind, record).await
    }

    /// Update a collection. App resolution runs first, against the existing
    /// object; if it fails the base-field update never executes.
    pub async fn update(
        &self,
        kind: CollectionKind,
        key: &str,
        update: CollectionUpdate,
    ) -> Result<CollectionResponse> {
        let existing = self.resolve(kind, key).await?;

        if let Some(apps) = update.apps.as_deref() {
            self.set_apps(kind, existing.id, apps).await?;
        }

        let record = collection_repo::update_fields(
            &self.pool,
            kind,
            existing.id,
            update.slug.as_deref(),
            update.name.as_deref(),
            update.description.as_deref(),
            update.background_color.as_deref(),
            update.layout.as_deref(),
        )
        .await
        .map_err(|e| map_insert_error(e, kind))?
        .ok_or_else(|| not_found(kind, key))?;

        self.respond(kind, record).await
    }

    pub async fn get(&self, kind: CollectionKind, key: &str) -> Result<CollectionResponse> {
        let record = self.resolve(kind, key).await?;
        self.respond(kind, record).await
    }

    pub async fn list(
        &self,
        kind: CollectionKind,
        limit: i64,
        offset: i64,
    ) -> Result<Paginated<CollectionResponse>> {
        let total_count = collection_repo::count(&self.pool, kind).await?;
        let records = collection_repo::list(&self.pool, kind, limit, offset).await?;

        let mut objects = Vec::with_capacity(records.len());
        for record in records {
            let apps = collection_repo::app_ids(&self.pool, kind, record.id).await?;
            objects.push(CollectionResponse::from_record(record, apps));
        }

        Ok(Paginated {
            objects,
            meta: PageMeta {
                total_count,
                limit,
                offset,
            },
        })
    }

    pub async fn delete(&self, kind: CollectionKind, key: &str) -> Result<()> {
        let existing = self.resolve(kind, key).await?;
        collection_repo::delete(&self.pool, kind, existing.id).await?;
        info!(kind = kind.label(), id = existing.id, "Deleted feed collection");
        Ok(())
    }

    /// Replace the ordered app membership. Every submitted id must resolve
    /// to an existing marketplace app; otherwise nothing is written. An
    /// empty list is a no-op, matching the observed editorial flow.
    async fn set_apps(&self, kind: CollectionKind, collection_id: i64, apps: &[i64]) -> Result<()> {
        if apps.is_empty() {
            return Ok(());
        }

        let existing: HashSet<i64> = app_repo::existing_ids(&self.pool, apps)
            .await?
            .into_iter()
            .collect();
        if apps.iter().any(|id| !existing.contains(id)) {
            debug!(
                kind = kind.label(),
                collection_id, "Rejected membership with unresolved app ids"
            );
            return Err(AppError::Reference(APPS_DO_NOT_EXIST.to_string()));
        }

        // Dedupe while preserving submitted order.
        let mut seen = HashSet::new();
        let ordered: Vec<i64> = apps.iter().copied().filter(|id| seen.insert(*id)).collect();

        let mut tx = self.pool.begin().await?;
        collection_repo::replace_apps(&mut tx, kind, collection_id, &ordered).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn resolve(&self, kind: CollectionKind, key: &str) -> Result<FeedCollectionRecord> {
        collection_repo::find_by_id_or_slug(&self.pool, kind, key)
            .await?
            .ok_or_else(|| not_found(kind, key))
    }

    async fn respond(
        &self,
        kind: CollectionKind,
        record: FeedCollectionRecord,
    ) -> Result<CollectionResponse> {
        let apps = collection_repo::app_ids(&self.pool, kind, record.id).await?;
        Ok(CollectionResponse::from_record(record, apps))
    }
}

fn not_found(kind: CollectionKind, key: &str) -> AppError {
    AppError::NotFound(format!("{} '{}'", kind.label(), key))
}

/// Unique-slug violations surface as client errors instead of opaque 500s.
fn map_insert_error(err: sqlx::Error, kind: CollectionKind) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::Validation(format!(
                "A {} with this slug already exists.",
                kind.label()
            ));
        }
    }
    AppError::from(err)
}
