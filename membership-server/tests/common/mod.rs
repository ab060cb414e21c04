//! Shared helpers for the integration suite: an in-process router over an
//! in-memory database, plus request plumbing and seed data.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use membership_server::{AppState, create_router};
use serde_json::{Value, json};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tower::ServiceExt;

/// Build the full router over a fresh in-memory database. A single pooled
/// connection keeps every request on the same database.
pub async fn test_app() -> Router {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    let state = AppState::with_pool(pool).await.unwrap();
    create_router(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "PATCH", uri, Some(body)).await
}

/// Batch-upsert named rows into a lookup table, returning the generated ids
/// in input order.
pub async fn seed_lookup(app: &Router, path: &str, names: &[&str]) -> Vec<String> {
    let rows: Vec<Value> = names.iter().map(|n| json!({ "name": n })).collect();
    let (status, body) = post(app, path, json!({ "data": rows })).await;
    assert_eq!(status, StatusCode::OK, "seeding {path} failed: {body}");
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_str().unwrap().to_string())
        .collect()
}

/// Minimal person; returns the generated id.
pub async fn create_person(
    app: &Router,
    fee_category_id: &str,
    registration_number: i64,
    name: &str,
) -> String {
    let (status, body) = post(
        app,
        "/people",
        json!({
            "registration_number": registration_number,
            "membership_id": format!("M-{registration_number:04}"),
            "name": name,
            "membership_fee_category_id": fee_category_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "creating person failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

/// Minimal organization; returns the generated id.
pub async fn create_organization(app: &Router, name: &str, parent_id: Option<&str>) -> String {
    let (status, body) = post(
        app,
        "/organizations",
        json!({
            "name": name,
            "description": format!("{name} description"),
            "accepts_members_flag": "Y",
            "organization_parent_id": parent_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "creating organization failed: {body}");
    body["id"].as_str().unwrap().to_string()
}
