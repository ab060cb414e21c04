//! Lookup-table maintenance endpoints: batch upsert, reads, patches.

mod common;

use common::{get, patch, post, seed_lookup, test_app};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn batch_insert_returns_stored_rows_with_defaults() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/genders",
        json!({ "data": [{ "name": "Female" }, { "name": "Male" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Female");
    assert_eq!(rows[1]["name"], "Male");
    for row in rows {
        assert_eq!(row["valid_flag"], "Y");
        assert_eq!(row["created_by"], "system");
        assert!(row["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(row["created_on"].as_str().is_some());
    }
}

#[tokio::test]
async fn batch_with_id_updates_in_place() {
    let app = test_app().await;
    let ids = seed_lookup(&app, "/membership-fee-categories", &["Standard", "Reduced"]).await;

    let (status, body) = post(
        &app,
        "/membership-fee-categories",
        json!({ "data": [{ "id": ids[0], "name": "Full price", "valid_flag": "N" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], json!(ids[0]));
    assert_eq!(body["data"][0]["name"], "Full price");
    assert_eq!(body["data"][0]["valid_flag"], "N");

    // Still two rows: the upsert overwrote, it did not duplicate.
    let (_, listed) = get(&app, "/membership-fee-categories").await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_name_rolls_back_the_whole_batch() {
    let app = test_app().await;
    seed_lookup(&app, "/address-types", &["Home"]).await;

    let (status, body) = post(
        &app,
        "/address-types",
        json!({ "data": [{ "name": "Work" }, { "name": "Home" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 2003);

    // "Work" went in before the collision but must not survive the rollback.
    let (_, listed) = get(&app, "/address-types").await;
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Home"]);
}

#[tokio::test]
async fn caller_supplied_timestamp_is_normalized() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/email-types",
        json!({ "data": [{ "name": "Private", "created_on": "2024-03-01T10:30:00" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["created_on"], "2024-03-01T10:30:00");
}

#[tokio::test]
async fn unparseable_timestamp_is_rejected() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/email-types",
        json!({ "data": [{ "name": "Private", "created_on": "yesterday" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1004);
}

#[tokio::test]
async fn read_unknown_id_yields_empty_object() {
    let app = test_app().await;
    let (status, body) = get(&app, "/phone-types/no-such-row").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn patch_updates_and_returns_the_row() {
    let app = test_app().await;
    let ids = seed_lookup(&app, "/phone-types", &["Mobile"]).await;

    let (status, body) = patch(
        &app,
        &format!("/phone-types/{}", ids[0]),
        json!({ "description": "Cell phones", "valid_flag": "N" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(ids[0]));
    assert_eq!(body["name"], "Mobile");
    assert_eq!(body["description"], "Cell phones");
    assert_eq!(body["valid_flag"], "N");
}

#[tokio::test]
async fn list_is_ordered_by_name() {
    let app = test_app().await;
    seed_lookup(&app, "/genders", &["Male", "Female", "Other"]).await;

    let (_, listed) = get(&app, "/genders").await;
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Female", "Male", "Other"]);
}
