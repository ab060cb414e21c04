//! Lookup-table maintenance endpoints
//!
//! One generic router instantiated per mapping table. POST takes a batch of
//! upserts (`{"data": [...]}`) and answers with the stored rows in the same
//! order — re-read after the commit, so server-side defaults show up.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use shared::error::AppError;

use crate::db::catalog::LookupTable;
use crate::db::lookup::{self, LookupRow, LookupUpsert};
use crate::error::ServiceError;
use crate::state::AppState;

/// Batch upsert envelope
#[derive(Debug, Deserialize)]
struct LookupBatch {
    data: Vec<LookupUpsert>,
}

#[derive(Debug, Serialize)]
struct LookupBatchResult {
    data: Vec<LookupRow>,
}

pub fn routes(spec: &'static LookupTable) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(move |state: State<AppState>| list(spec, state)).post(
                move |state: State<AppState>, body: Json<LookupBatch>| {
                    upsert_batch(spec, state, body)
                },
            ),
        )
        .route(
            "/{id}",
            get(move |state: State<AppState>, path: Path<String>| read(spec, state, path)).patch(
                move |state: State<AppState>, path: Path<String>, body: Json<Value>| {
                    patch(spec, state, path, body)
                },
            ),
        )
}

fn row_or_empty(row: Option<LookupRow>) -> Result<Value, ServiceError> {
    match row {
        Some(row) => {
            serde_json::to_value(row).map_err(|e| AppError::internal(e.to_string()).into())
        }
        None => Ok(Value::Object(Map::new())),
    }
}

/// GET / — every row (maintenance view)
async fn list(
    spec: &'static LookupTable,
    State(state): State<AppState>,
) -> Result<Json<Vec<LookupRow>>, ServiceError> {
    let rows = lookup::fetch_all(&state.pool, spec).await?;
    Ok(Json(rows))
}

/// POST / — batch upsert, all-or-nothing
async fn upsert_batch(
    spec: &'static LookupTable,
    State(state): State<AppState>,
    Json(batch): Json<LookupBatch>,
) -> Result<Json<LookupBatchResult>, ServiceError> {
    let stored = lookup::upsert_batch(&state.pool, spec, batch.data).await?;
    Ok(Json(LookupBatchResult { data: stored }))
}

/// GET /{id} — the row, or `{}` when the id is unknown
async fn read(
    spec: &'static LookupTable,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServiceError> {
    let row = lookup::fetch_one(&state.pool, spec, &id).await?;
    Ok(Json(row_or_empty(row)?))
}

/// PATCH /{id} — partial update, returns the re-read row
async fn patch(
    spec: &'static LookupTable,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ServiceError> {
    let payload = body
        .as_object()
        .ok_or_else(|| AppError::validation("payload must be a JSON object"))?;
    let row = lookup::update_by_id(&state.pool, spec, &id, payload).await?;
    Ok(Json(row_or_empty(row)?))
}
