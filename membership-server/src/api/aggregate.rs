//! Aggregate resource endpoints (person, organization)
//!
//! One generic router instantiated per [`AggregateSpec`] — the descriptor
//! carries everything resource-specific, so person and organization share
//! these four handlers.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use shared::error::AppError;

use super::pagination::Pagination;
use crate::db::catalog::AggregateSpec;
use crate::db::{aggregate, entity};
use crate::error::ServiceError;
use crate::state::AppState;

pub fn routes(spec: &'static AggregateSpec) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(move |state: State<AppState>, query: Query<Pagination>| list(spec, state, query))
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

/// GET / — one page of display rows in the pagination envelope
async fn list(
    spec: &'static AggregateSpec,
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Value>, ServiceError> {
    pagination.validate()?;
    let page = aggregate::fetch_page(&state.pool, spec, pagination.page, pagination.page_size).await?;
    Ok(Json(page))
}

/// POST / — insert the primary entity, return the stored row
async fn create(
    spec: &'static AggregateSpec,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ServiceError> {
    let payload = body
        .as_object()
        .ok_or_else(|| AppError::validation("payload must be a JSON object"))?;
    let created = entity::insert(&state.pool, spec.table, payload).await?;
    Ok(Json(created))
}

/// GET /{id} — the full aggregate; the empty shape when the id is unknown
async fn read(
    spec: &'static AggregateSpec,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServiceError> {
    let result = aggregate::fetch_aggregate(&state.pool, spec, &id).await?;
    Ok(Json(result))
}

/// PATCH /{id} — aggregate-shaped partial update, returns the re-read aggregate
async fn patch(
    spec: &'static AggregateSpec,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ServiceError> {
    let payload = body
        .as_object()
        .ok_or_else(|| AppError::validation("payload must be a JSON object"))?;
    let result = aggregate::patch_aggregate(&state.pool, spec, &id, payload).await?;
    Ok(Json(result))
}
