//! Row-to-JSON conversion
//!
//! The resource handlers return rows as plain JSON objects keyed by the
//! column aliases of the catalog queries, so decoding has to work from the
//! SQLite value types rather than a compile-time struct.

use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// Convert one row into a JSON object, keyed by column name.
pub fn row_to_object(row: &SqliteRow) -> Result<Map<String, Value>, sqlx::Error> {
    let mut object = Map::new();
    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(idx)?),
                "REAL" | "NUMERIC" => Value::from(row.try_get::<f64, _>(idx)?),
                // No binary columns in this schema
                "BLOB" => Value::Null,
                _ => Value::from(row.try_get::<String, _>(idx)?),
            }
        };
        object.insert(column.name().to_string(), value);
    }
    Ok(object)
}

/// Convert a result set into a JSON array, preserving query order.
pub fn rows_to_array(rows: &[SqliteRow]) -> Result<Value, sqlx::Error> {
    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(Value::Object(row_to_object(row)?));
    }
    Ok(Value::Array(items))
}
