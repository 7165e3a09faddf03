use crate::models::{FeedItem, FeedItemRef};
use sqlx::{PgPool, Postgres, Transaction};

const FEED_ITEM_COLUMNS: &str =
    r#"id, region, carrier, "order", item_type, app_id, brand_id, collection_id"#;

/// Storage shape of a feed item: the tag plus three nullable references.
/// Converted to the `FeedItemRef` sum type at the repo boundary.
#[derive(Debug, sqlx::FromRow)]
struct FeedItemRow {
    id: i64,
    region: i32,
    carrier: Option<i32>,
    order: i32,
    item_type: String,
    app_id: Option<i64>,
    brand_id: Option<i64>,
    collection_id: Option<i64>,
}

impl TryFrom<FeedItemRow> for FeedItem {
    type Error = sqlx::Error;

    fn try_from(row: FeedItemRow) -> Result<FeedItem, sqlx::Error> {
        let ref_id = row
            .app_id
            .or(row.brand_id)
            .or(row.collection_id)
            .ok_or_else(|| sqlx::Error::Decode("feed item row has no reference set".into()))?;
        let item = FeedItemRef::from_parts(&row.item_type, ref_id).ok_or_else(|| {
            sqlx::Error::Decode(format!("unknown feed item type '{}'", row.item_type).into())
        })?;

        Ok(FeedItem {
            id: row.id,
            region: row.region,
            carrier: row.carrier,
            order: row.order,
            item,
        })
    }
}

fn ref_columns(item: FeedItemRef) -> (Option<i64>, Option<i64>, Option<i64>) {
    match item {
        FeedItemRef::App(id) => (Some(id), None, None),
        FeedItemRef::Brand(id) => (None, Some(id), None),
        FeedItemRef::Collection(id) => (None, None, Some(id)),
    }
}

/// A feed slot about to be bulk-inserted by the builder. Builder rows are
/// always carrier-less.
#[derive(Debug, Clone)]
pub struct NewFeedItem {
    pub region: i32,
    pub order: i32,
    pub item: FeedItemRef,
}

/// Delete all carrier-less feed items in the given regions.
pub async fn delete_carrierless_in_regions(
    tx: &mut Transaction<'_, Postgres>,
    region_ids: &[i32],
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM feed_items WHERE carrier IS NULL AND region = ANY($1)")
        .bind(region_ids)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected())
}

/// Insert the builder's rows in one bulk statement, preserving order.
pub async fn bulk_insert_items(
    tx: &mut Transaction<'_, Postgres>,
    items: &[NewFeedItem],
) -> Result<(), sqlx::Error> {
    if items.is_empty() {
        return Ok(());
    }

    let mut regions = Vec::with_capacity(items.len());
    let mut orders = Vec::with_capacity(items.len());
    let mut item_types = Vec::with_capacity(items.len());
    let mut app_ids = Vec::with_capacity(items.len());
    let mut brand_ids = Vec::with_capacity(items.len());
    let mut collection_ids = Vec::with_capacity(items.len());

    for item in items {
        let (app_id, brand_id, collection_id) = ref_columns(item.item);
        regions.push(item.region);
        orders.push(item.order);
        item_types.push(item.item.item_type().to_string());
        app_ids.push(app_id);
        brand_ids.push(brand_id);
        collection_ids.push(collection_id);
    }

    sqlx::query(
        r#"
        INSERT INTO feed_items (region, "order", item_type, app_id, brand_id, collection_id)
        SELECT * FROM UNNEST(
            $1::int4[], $2::int4[], $3::text[], $4::int8[], $5::int8[], $6::int8[]
        )
        "#,
    )
    .bind(&regions)
    .bind(&orders)
    .bind(&item_types)
    .bind(&app_ids)
    .bind(&brand_ids)
    .bind(&collection_ids)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Find a feed item by ID
pub async fn find_by_id(pool: &PgPool, item_id: i64) -> Result<Option<FeedItem>, sqlx::Error> {
    let row = sqlx::query_as::<_, FeedItemRow>(&format!(
        "SELECT {FEED_ITEM_COLUMNS} FROM feed_items WHERE id = $1"
    ))
    .bind(item_id)
    .fetch_optional(pool)
    .await?;

    row.map(FeedItem::try_from).transpose()
}

/// List feed items, optionally filtered by region and carrier, ordered by
/// region then display order.
pub async fn list(
    pool: &PgPool,
    region: Option<i32>,
    carrier: Option<i32>,
    limit: i64,
    offset: i64,
) -> Result<Vec<FeedItem>, sqlx::Error> {
    let rows = sqlx::query_as::<_, FeedItemRow>(&format!(
        r#"
        SELECT {FEED_ITEM_COLUMNS}
        FROM feed_items
        WHERE ($1::int4 IS NULL OR region = $1)
          AND ($2::int4 IS NULL OR carrier = $2)
        ORDER BY region, "order"
        LIMIT $3 OFFSET $4
        "#
    ))
    .bind(region)
    .bind(carrier)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(FeedItem::try_from).collect()
}

/// Count feed items matching the list filters.
pub async fn count(
    pool: &PgPool,
    region: Option<i32>,
    carrier: Option<i32>,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM feed_items
        WHERE ($1::int4 IS NULL OR region = $1)
          AND ($2::int4 IS NULL OR carrier = $2)
        "#,
    )
    .bind(region)
    .bind(carrier)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Create a single feed item (editorial CRUD path, not the builder).
pub async fn create(
    pool: &PgPool,
    region: i32,
    carrier: Option<i32>,
    order: i32,
    item: FeedItemRef,
) -> Result<FeedItem, sqlx::Error> {
    let (app_id, brand_id, collection_id) = ref_columns(item);

    let row = sqlx::query_as::<_, FeedItemRow>(&format!(
        r#"
        INSERT INTO feed_items (region, carrier, "order", item_type, app_id, brand_id, collection_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {FEED_ITEM_COLUMNS}
        "#
    ))
    .bind(region)
    .bind(carrier)
    .bind(order)
    .bind(item.item_type())
    .bind(app_id)
    .bind(brand_id)
    .bind(collection_id)
    .fetch_one(pool)
    .await?;

    FeedItem::try_from(row)
}

/// Replace all mutable fields of a feed item.
pub async fn update(
    pool: &PgPool,
    item_id: i64,
    region: i32,
    carrier: Option<i32>,
    order: i32,
    item: FeedItemRef,
) -> Result<Option<FeedItem>, sqlx::Error> {
    let (app_id, brand_id, collection_id) = ref_columns(item);

    let row = sqlx::query_as::<_, FeedItemRow>(&format!(
        r#"
        UPDATE feed_items
        SET region = $2, carrier = $3, "order" = $4, item_type = $5,
            app_id = $6, brand_id = $7, collection_id = $8
        WHERE id = $1
        RETURNING {FEED_ITEM_COLUMNS}
        "#
    ))
    .bind(item_id)
    .bind(region)
    .bind(carrier)
    .bind(order)
    .bind(item.item_type())
    .bind(app_id)
    .bind(brand_id)
    .bind(collection_id)
    .fetch_optional(pool)
    .await?;

    row.map(FeedItem::try_from).transpose()
}

/// Delete a feed item. Returns whether a row was removed.
pub async fn delete(pool: &PgPool, item_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM feed_items WHERE id = $1")
        .bind(item_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
