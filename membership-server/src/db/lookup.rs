//! Lookup-table data access
//!
//! The five mapping tables (gender, membership fee category, address/email/
//! phone type) share one row shape, so the operations are typed against
//! [`LookupRow`] and generic over a [`LookupTable`] descriptor.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use uuid::Uuid;

use shared::error::{AppError, ErrorCode};

use super::catalog::LookupTable;
use super::entity::{build_update, execute_with_id};
use super::{TIMESTAMP_FORMAT, now_string};
use crate::error::ServiceResult;

/// One stored lookup row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LookupRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub valid_flag: String,
    pub created_on: NaiveDateTime,
    pub created_by: String,
}

/// One element of a batch upsert. Only `name` is mandatory: the server fills
/// in a generated id, the current instant, and maintenance defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupUpsert {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub valid_flag: Option<String>,
    /// Creation instant as text; parsed server-side
    pub created_on: Option<String>,
    pub created_by: Option<String>,
}

/// A `{value, label}` pair offered as a selectable option.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OptionRow {
    pub value: String,
    pub label: String,
}

/// Parse a caller-supplied creation timestamp. Accepts the storage format,
/// the ISO-8601 `T` form (fractional seconds tolerated), and full RFC 3339.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, AppError> {
    for format in [
        TIMESTAMP_FORMAT,
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(parsed);
        }
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.naive_utc());
    }
    Err(
        AppError::with_message(ErrorCode::InvalidTimestamp, format!("cannot parse {text:?}"))
            .with_detail("field", "created_on"),
    )
}

/// Fetch every row of the lookup table (maintenance view, ordered by name).
pub async fn fetch_all(pool: &SqlitePool, lookup: &LookupTable) -> ServiceResult<Vec<LookupRow>> {
    Ok(sqlx::query_as(lookup.map_sql).fetch_all(pool).await?)
}

/// Fetch one row by id.
pub async fn fetch_one(
    pool: &SqlitePool,
    lookup: &LookupTable,
    id: &str,
) -> ServiceResult<Option<LookupRow>> {
    let sql = format!(
        "SELECT id, name, description, valid_flag, created_on, created_by
         FROM {} WHERE id = ?",
        lookup.table.table
    );
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?)
}

/// Fetch the `{value, label}` options (valid rows only).
pub async fn fetch_options(
    pool: &SqlitePool,
    lookup: &LookupTable,
) -> ServiceResult<Vec<OptionRow>> {
    Ok(sqlx::query_as(lookup.options_sql).fetch_all(pool).await?)
}

/// Partial update of one row, then re-read; `None` when the id is unknown.
pub async fn update_by_id(
    pool: &SqlitePool,
    lookup: &LookupTable,
    id: &str,
    payload: &Map<String, Value>,
) -> ServiceResult<Option<LookupRow>> {
    if let Some((sql, values)) = build_update(lookup.table, payload) {
        let mut tx = pool.begin().await?;
        execute_with_id(&mut tx, &sql, values, id).await?;
        tx.commit().await?;
    }
    fetch_one(pool, lookup, id).await
}

/// Apply a batch of upserts in one transaction, then re-read the stored rows
/// in input order. Insert-or-overwrite is keyed on the primary key; the
/// whole batch commits or rolls back together.
pub async fn upsert_batch(
    pool: &SqlitePool,
    lookup: &LookupTable,
    batch: Vec<LookupUpsert>,
) -> ServiceResult<Vec<LookupRow>> {
    // Normalize before touching the database so a bad row aborts the batch
    // without a rollback.
    let mut normalized = Vec::with_capacity(batch.len());
    for item in batch {
        let created_on = match &item.created_on {
            Some(text) => parse_timestamp(text)?,
            None => {
                // now_string() round-trips through the storage format so the
                // echoed value matches what a later read returns
                parse_timestamp(&now_string())?
            }
        };
        normalized.push(LookupRow {
            id: item.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: item.name,
            description: item.description,
            valid_flag: item.valid_flag.unwrap_or_else(|| "Y".to_string()),
            created_on,
            created_by: item.created_by.unwrap_or_else(|| "system".to_string()),
        });
    }

    let sql = format!(
        "INSERT INTO {} (id, name, description, valid_flag, created_on, created_by)
         VALUES (?, ?, ?, ?, ?, ?)
         ON CONFLICT (id) DO UPDATE SET
             name = excluded.name,
             description = excluded.description,
             valid_flag = excluded.valid_flag,
             created_on = excluded.created_on,
             created_by = excluded.created_by",
        lookup.table.table
    );

    let mut tx = pool.begin().await?;
    for row in &normalized {
        sqlx::query(&sql)
            .bind(&row.id)
            .bind(&row.name)
            .bind(&row.description)
            .bind(&row.valid_flag)
            .bind(row.created_on.format(TIMESTAMP_FORMAT).to_string())
            .bind(&row.created_by)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    let mut stored = Vec::with_capacity(normalized.len());
    for row in &normalized {
        if let Some(found) = fetch_one(pool, lookup, &row.id).await? {
            stored.push(found);
        }
    }
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_storage_and_iso_forms() {
        for text in [
            "2024-03-01 10:30:00",
            "2024-03-01 10:30:00.250",
            "2024-03-01T10:30:00",
            "2024-03-01T10:30:00.250",
        ] {
            let parsed = parse_timestamp(text).unwrap();
            assert_eq!(parsed.format("%Y-%m-%d").to_string(), "2024-03-01");
        }
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_timestamp("2024-03-01T10:30:00+02:00").unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "08:30");
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTimestamp);
    }
}
