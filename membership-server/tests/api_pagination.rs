//! Pagination envelope over the person list.

mod common;

use common::{create_person, get, seed_lookup, test_app};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn forty_five_rows_make_three_pages_of_twenty() {
    let app = test_app().await;
    let fee = seed_lookup(&app, "/membership-fee-categories", &["Standard"]).await;
    for n in 1..=45 {
        create_person(&app, &fee[0], n, &format!("Member {n:02}")).await;
    }

    // Defaults: first page, twenty rows.
    let (status, body) = get(&app, "/people").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 0);
    assert_eq!(body["page_size"], 20);
    assert_eq!(body["row_count"], 45);
    assert_eq!(body["page_count"], 3);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 20);
    assert_eq!(items[0]["registration_number"], 1);

    // The last page holds the remainder, in insertion order.
    let (status, body) = get(&app, "/people?page=2&page_size=20").await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    let numbers: Vec<i64> = items
        .iter()
        .map(|r| r["registration_number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![41, 42, 43, 44, 45]);

    // Past the end: empty page, counts unchanged.
    let (status, body) = get(&app, "/people?page=9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["row_count"], 45);
    assert_eq!(body["page_count"], 3);
}

#[tokio::test]
async fn page_size_zero_is_rejected() {
    let app = test_app().await;
    let (status, body) = get(&app, "/people?page_size=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1005);
}

#[tokio::test]
async fn empty_table_paginates_to_zero_pages() {
    let app = test_app().await;
    let (status, body) = get(&app, "/organizations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["row_count"], 0);
    assert_eq!(body["page_count"], 0);
}

#[tokio::test]
async fn list_rows_are_display_rows() {
    let app = test_app().await;
    let fee = seed_lookup(&app, "/membership-fee-categories", &["Standard"]).await;
    create_person(&app, &fee[0], 1, "Kiss Anna").await;

    let (_, body) = get(&app, "/people?page_size=5").await;
    let row = &body["items"][0];
    assert_eq!(row["person_name"], "Kiss Anna");
    assert_eq!(row["membership_fee_category_name"], "Standard");
    assert_eq!(row["gender_name"], json!(null));
    assert!(row["person_id"].as_str().is_some());
}
