//! Flat entity endpoints (address, email, phone, membership)
//!
//! Same generic-router pattern as the aggregate resources, minus the
//! aggregate assembly: these resources serve and accept plain rows.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use shared::error::AppError;

use crate::db::catalog::TableSpec;
use crate::db::entity;
use crate::error::ServiceError;
use crate::state::AppState;

pub fn routes(spec: &'static TableSpec) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(move |state: State<AppState>| list(spec, state))
                .post(move |state: State<AppState>, body: Json<Value>| create(spec, state, body)),
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

/// GET / — every row as a JSON array
async fn list(
    spec: &'static TableSpec,
    State(state): State<AppState>,
) -> Result<Json<Value>, ServiceError> {
    let rows = entity::fetch_all(&state.pool, spec).await?;
    Ok(Json(rows))
}

/// POST / — insert one row, return the stored row
async fn create(
    spec: &'static TableSpec,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ServiceError> {
    let payload = body
        .as_object()
        .ok_or_else(|| AppError::validation("payload must be a JSON object"))?;
    let created = entity::insert(&state.pool, spec, payload).await?;
    Ok(Json(created))
}

/// GET /{id} — the row, or `{}` when the id is unknown
async fn read(
    spec: &'static TableSpec,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServiceError> {
    let row = entity::fetch_one(&state.pool, spec, &id).await?;
    Ok(Json(row))
}

/// PATCH /{id} — partial update, returns the re-read row
async fn patch(
    spec: &'static TableSpec,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ServiceError> {
    let payload = body
        .as_object()
        .ok_or_else(|| AppError::validation("payload must be a JSON object"))?;
    let row = entity::update_by_id(&state.pool, spec, &id, payload).await?;
    Ok(Json(row))
}
