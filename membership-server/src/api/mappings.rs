//! Bundled lookup-option endpoints
//!
//! One GET per creation form: everything the client needs to populate its
//! dropdowns, fetched in a single transaction.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::db::catalog;
use crate::db::lookup::OptionRow;
use crate::error::ServiceError;
use crate::state::AppState;

/// GET /person-mappings — option lists for the person creation form
pub async fn person_mappings(State(state): State<AppState>) -> Result<Json<Value>, ServiceError> {
    let mut tx = state.pool.begin().await?;
    let gender: Vec<OptionRow> = sqlx::query_as(catalog::GENDER_OPTIONS_SQL)
        .fetch_all(&mut *tx)
        .await?;
    let fee_category: Vec<OptionRow> = sqlx::query_as(catalog::MEMBERSHIP_FEE_CATEGORY_OPTIONS_SQL)
        .fetch_all(&mut *tx)
        .await?;
    let address_type: Vec<OptionRow> = sqlx::query_as(catalog::ADDRESS_TYPE_OPTIONS_SQL)
        .fetch_all(&mut *tx)
        .await?;
    let email_type: Vec<OptionRow> = sqlx::query_as(catalog::EMAIL_TYPE_OPTIONS_SQL)
        .fetch_all(&mut *tx)
        .await?;
    let phone_type: Vec<OptionRow> = sqlx::query_as(catalog::PHONE_TYPE_OPTIONS_SQL)
        .fetch_all(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(Json(json!({
        "gender_type": gender,
        "membership_fee_type": fee_category,
        "address_type": address_type,
        "email_type": email_type,
        "phone_type": phone_type,
    })))
}

/// GET /organization-mappings — option lists for the organization creation
/// form, including the selectable parent organizations
pub async fn organization_mappings(
    State(state): State<AppState>,
) -> Result<Json<Value>, ServiceError> {
    let mut tx = state.pool.begin().await?;
    let address_type: Vec<OptionRow> = sqlx::query_as(catalog::ADDRESS_TYPE_OPTIONS_SQL)
        .fetch_all(&mut *tx)
        .await?;
    let email_type: Vec<OptionRow> = sqlx::query_as(catalog::EMAIL_TYPE_OPTIONS_SQL)
        .fetch_all(&mut *tx)
        .await?;
    let phone_type: Vec<OptionRow> = sqlx::query_as(catalog::PHONE_TYPE_OPTIONS_SQL)
        .fetch_all(&mut *tx)
        .await?;
    let parent_organization: Vec<OptionRow> =
        sqlx::query_as(catalog::PARENT_ORGANIZATION_OPTIONS_SQL)
            .fetch_all(&mut *tx)
            .await?;
    tx.commit().await?;

    Ok(Json(json!({
        "address_type": address_type,
        "email_type": email_type,
        "phone_type": phone_type,
        "parent_organization": parent_organization,
    })))
}
