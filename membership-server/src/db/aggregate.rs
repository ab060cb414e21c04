//! Aggregate read/write protocol
//!
//! A "parent" entity (person, organization) is served as one composite JSON
//! payload: the display row of the entity itself, every dependent collection
//! owned by it, and the lookup option lists the client needs to render the
//! record. The symmetric patch walks the same shape.
//!
//! Both directions run inside a single transaction. A patch that fails on
//! any sub-update rolls the whole write back.

use serde_json::{Map, Value};
use sqlx::SqlitePool;

use shared::error::AppError;

use super::bind_value;
use super::catalog::AggregateSpec;
use super::entity::{build_update, execute_with_id};
use super::json::{row_to_object, rows_to_array};
use crate::error::ServiceResult;

/// The not-found shape: same keys as a hit, primary object empty, every list
/// empty. Served with a 200 — an explicit contract of this API, not a 404.
fn empty_shape(spec: &AggregateSpec) -> Value {
    let mut result = Map::new();
    result.insert(spec.entity_key.to_string(), Value::Object(Map::new()));
    for collection in spec.collections {
        result.insert(collection.key.to_string(), Value::Array(Vec::new()));
    }
    for lookup in spec.lookups {
        result.insert(lookup.key.to_string(), Value::Array(Vec::new()));
    }
    Value::Object(result)
}

/// Assemble the aggregate for one entity id.
pub async fn fetch_aggregate(
    pool: &SqlitePool,
    spec: &AggregateSpec,
    id: &str,
) -> ServiceResult<Value> {
    let mut tx = pool.begin().await?;

    let primary = sqlx::query(spec.display_sql)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

    let Some(primary) = primary else {
        tx.commit().await?;
        return Ok(empty_shape(spec));
    };

    let mut result = Map::new();
    result.insert(
        spec.entity_key.to_string(),
        Value::Object(row_to_object(&primary)?),
    );

    for collection in spec.collections {
        let rows = sqlx::query(collection.list_sql)
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;
        result.insert(collection.key.to_string(), rows_to_array(&rows)?);
    }

    for lookup in spec.lookups {
        let rows = sqlx::query(lookup.options_sql).fetch_all(&mut *tx).await?;
        result.insert(lookup.key.to_string(), rows_to_array(&rows)?);
    }

    tx.commit().await?;
    Ok(Value::Object(result))
}

/// Apply an aggregate-shaped patch: one update for the primary entity from
/// the `entity` sub-object, then one update per dependent-collection item.
///
/// Each collection item is matched by its own `id` — not the parent's id, as
/// the system this replaces did, which corrupted every row of a multi-row
/// owner. An item without an id is rejected before anything is written, and
/// the update is additionally scoped to the patched parent's owner column,
/// so an id belonging to a different owner changes nothing.
///
/// After the transaction commits the read path runs again and its result is
/// returned (read-your-write within this request).
pub async fn patch_aggregate(
    pool: &SqlitePool,
    spec: &AggregateSpec,
    id: &str,
    payload: &Map<String, Value>,
) -> ServiceResult<Value> {
    let mut tx = pool.begin().await?;

    if let Some(Value::Object(entity)) = payload.get(spec.entity_key)
        && let Some((sql, values)) = build_update(spec.table, entity)
    {
        execute_with_id(&mut tx, &sql, values, id).await?;
    }

    for collection in spec.collections {
        let Some(Value::Array(items)) = payload.get(collection.key) else {
            continue;
        };
        for item in items {
            let item = item.as_object().ok_or_else(|| {
                AppError::validation(format!("{} items must be objects", collection.key))
            })?;
            let item_id = item.get("id").and_then(|v| v.as_str()).ok_or_else(|| {
                AppError::validation(format!("{} item is missing its id", collection.key))
            })?;
            if let Some((sql, values)) = build_update(collection.table, item) {
                let sql = format!("{sql} AND {} = ?", spec.owner_column);
                let mut query = sqlx::query(&sql);
                for value in values {
                    query = bind_value(query, value);
                }
                query
                    .bind(item_id.to_string())
                    .bind(id.to_string())
                    .execute(&mut *tx)
                    .await?;
            }
        }
    }

    tx.commit().await?;

    fetch_aggregate(pool, spec, id).await
}

/// One page of the entity's display query plus the total row count, wrapped
/// in the pagination envelope.
pub async fn fetch_page(
    pool: &SqlitePool,
    spec: &AggregateSpec,
    page: u32,
    page_size: u32,
) -> ServiceResult<Value> {
    let limit = i64::from(page_size);
    let offset = i64::from(page) * limit;

    let mut tx = pool.begin().await?;
    let rows = sqlx::query(spec.list_sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *tx)
        .await?;
    let row_count: i64 = sqlx::query_scalar(spec.count_sql).fetch_one(&mut *tx).await?;
    tx.commit().await?;

    let page_count = (row_count as u64).div_ceil(limit as u64);

    Ok(serde_json::json!({
        "items": rows_to_array(&rows)?,
        "page": page,
        "page_size": page_size,
        "row_count": row_count,
        "page_count": page_count,
    }))
}
