//! Generic flat-entity data access
//!
//! Every entity resource shares the same four operations: list, get by id,
//! create, patch. They are generic over a [`TableSpec`], which supplies the
//! table name and the payload-key → column map; the handlers instantiate
//! them per resource from the catalog.

use serde_json::{Map, Value};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use shared::error::{AppError, ErrorCode};

use super::catalog::TableSpec;
use super::json::{row_to_object, rows_to_array};
use super::{bind_value, now_string};
use crate::error::ServiceResult;

/// Build `UPDATE <table> SET ... WHERE id = ?` from the payload keys that map
/// onto writable columns. Returns `None` when nothing matches (a patch of
/// only system/display fields is a no-op, not an error).
pub fn build_update(spec: &TableSpec, payload: &Map<String, Value>) -> Option<(String, Vec<Value>)> {
    let mut columns: Vec<&str> = Vec::new();
    let mut values = Vec::new();
    for (key, column) in spec.columns {
        if columns.contains(column) {
            continue;
        }
        if let Some(value) = payload.get(*key) {
            columns.push(column);
            values.push(value.clone());
        }
    }
    if columns.is_empty() {
        return None;
    }
    let assignments = columns
        .iter()
        .map(|c| format!("{c} = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!("UPDATE {} SET {} WHERE id = ?", spec.table, assignments);
    Some((sql, values))
}

/// Build the insert for a new row: generated id and creation metadata first,
/// then every payload key that maps onto a writable column.
pub fn build_insert(
    spec: &TableSpec,
    id: &str,
    created_on: &str,
    created_by: &str,
    payload: &Map<String, Value>,
) -> (String, Vec<Value>) {
    let mut columns: Vec<&str> = vec!["id", "created_on", "created_by"];
    let mut values = vec![
        Value::from(id),
        Value::from(created_on),
        Value::from(created_by),
    ];
    for (key, column) in spec.columns {
        if columns.contains(column) {
            continue;
        }
        if let Some(value) = payload.get(*key) {
            columns.push(column);
            values.push(value.clone());
        }
    }
    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        spec.table,
        columns.join(", "),
        placeholders
    );
    (sql, values)
}

/// Contact rows belong to exactly one parent. Checked before the insert so
/// the caller gets a 400 instead of a bare CHECK-constraint rejection.
pub fn check_owner(spec: &TableSpec, payload: &Map<String, Value>) -> Result<(), AppError> {
    if !spec.xor_owner {
        return Ok(());
    }
    let has = |key: &str| payload.get(key).is_some_and(|v| !v.is_null());
    if has("person_id") == has("organization_id") {
        return Err(AppError::with_message(
            ErrorCode::AmbiguousOwner,
            format!(
                "{} must reference exactly one of person_id/organization_id",
                spec.table
            ),
        ));
    }
    Ok(())
}

/// Execute a dynamically built statement, binding the collected values and
/// the trailing id.
pub async fn execute_with_id(
    conn: &mut SqliteConnection,
    sql: &str,
    values: Vec<Value>,
    id: &str,
) -> Result<(), sqlx::Error> {
    let mut query = sqlx::query(sql);
    for value in values {
        query = bind_value(query, value);
    }
    query.bind(id.to_string()).execute(conn).await?;
    Ok(())
}

async fn execute_insert(
    conn: &mut SqliteConnection,
    sql: &str,
    values: Vec<Value>,
) -> Result<(), sqlx::Error> {
    let mut query = sqlx::query(sql);
    for value in values {
        query = bind_value(query, value);
    }
    query.execute(conn).await?;
    Ok(())
}

/// Fetch one row as a JSON object; `{}` when the id matches nothing.
pub async fn fetch_one(pool: &SqlitePool, spec: &TableSpec, id: &str) -> ServiceResult<Value> {
    let sql = format!("SELECT * FROM {} WHERE id = ?", spec.table);
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;
    match row {
        Some(row) => Ok(Value::Object(row_to_object(&row)?)),
        None => Ok(Value::Object(Map::new())),
    }
}

/// Fetch the whole table as a JSON array.
pub async fn fetch_all(pool: &SqlitePool, spec: &TableSpec) -> ServiceResult<Value> {
    let sql = format!("SELECT * FROM {} ORDER BY rowid", spec.table);
    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    Ok(rows_to_array(&rows)?)
}

/// Insert a new row from the caller's fields. The server generates the id
/// and creation timestamp; `created_by` comes from the payload when present.
/// Returns the stored row.
pub async fn insert(
    pool: &SqlitePool,
    spec: &TableSpec,
    payload: &Map<String, Value>,
) -> ServiceResult<Value> {
    check_owner(spec, payload)?;

    let id = Uuid::new_v4().to_string();
    let created_on = now_string();
    let created_by = payload
        .get("created_by")
        .and_then(|v| v.as_str())
        .unwrap_or("system");

    let (sql, values) = build_insert(spec, &id, &created_on, created_by, payload);

    let mut tx = pool.begin().await?;
    execute_insert(&mut tx, &sql, values).await?;
    tx.commit().await?;

    fetch_one(pool, spec, &id).await
}

/// Apply a partial update by id, then re-read. System fields in the payload
/// are ignored; an unknown id yields `{}` (the not-found contract).
pub async fn update_by_id(
    pool: &SqlitePool,
    spec: &TableSpec,
    id: &str,
    payload: &Map<String, Value>,
) -> ServiceResult<Value> {
    if let Some((sql, values)) = build_update(spec, payload) {
        let mut tx = pool.begin().await?;
        execute_with_id(&mut tx, &sql, values, id).await?;
        tx.commit().await?;
    }
    fetch_one(pool, spec, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::catalog::{ADDRESS_TABLE, PERSON_TABLE};
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn update_skips_system_and_display_fields() {
        let payload = obj(json!({
            "id": "x",
            "created_on": "2024-01-01 00:00:00",
            "created_by": "nobody",
            "gender_name": "Female",
            "person_name": "Jane",
            "notes": null,
        }));
        let (sql, values) = build_update(&PERSON_TABLE, &payload).unwrap();
        assert_eq!(sql, "UPDATE person SET name = ?, notes = ? WHERE id = ?");
        assert_eq!(values, vec![json!("Jane"), Value::Null]);
    }

    #[test]
    fn update_prefers_plain_key_over_alias() {
        let payload = obj(json!({"name": "A", "person_name": "B"}));
        let (sql, values) = build_update(&PERSON_TABLE, &payload).unwrap();
        assert_eq!(sql, "UPDATE person SET name = ? WHERE id = ?");
        assert_eq!(values, vec![json!("A")]);
    }

    #[test]
    fn update_with_no_writable_fields_is_none() {
        let payload = obj(json!({"id": "x", "gender_name": "F"}));
        assert!(build_update(&PERSON_TABLE, &payload).is_none());
    }

    #[test]
    fn insert_always_carries_system_columns() {
        let payload = obj(json!({"zip": "1111", "city": "Budapest",
            "address_1": "Main st 1", "person_id": "p1", "address_type_id": "t1"}));
        let (sql, values) = build_insert(&ADDRESS_TABLE, "a1", "2024-01-01 00:00:00", "tester", &payload);
        assert!(sql.starts_with("INSERT INTO address (id, created_on, created_by, person_id"));
        assert_eq!(values[0], json!("a1"));
        assert_eq!(values[2], json!("tester"));
        assert_eq!(values.len(), sql.matches('?').count());
    }

    #[test]
    fn owner_check_requires_exactly_one_side() {
        let both = obj(json!({"person_id": "p", "organization_id": "o"}));
        let neither = obj(json!({"zip": "1111"}));
        let person_only = obj(json!({"person_id": "p", "organization_id": null}));
        assert!(check_owner(&ADDRESS_TABLE, &both).is_err());
        assert!(check_owner(&ADDRESS_TABLE, &neither).is_err());
        assert!(check_owner(&ADDRESS_TABLE, &person_only).is_ok());
    }
}
