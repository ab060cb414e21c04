//! Database access layer

pub mod aggregate;
pub mod catalog;
pub mod entity;
pub mod json;
pub mod lookup;

use chrono::Utc;
use serde_json::Value;
use sqlx::Sqlite;
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;

/// Storage format for creation timestamps (kept in TEXT columns).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current UTC instant in storage format.
pub fn now_string() -> String {
    Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string()
}

/// Bind a JSON value onto a query using the matching SQLite type.
pub fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: Value,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else {
                query.bind(n.as_f64().unwrap_or(0.0))
            }
        }
        Value::String(s) => query.bind(s),
        // Arrays/objects have no column representation; store their JSON text
        other => query.bind(other.to_string()),
    }
}
