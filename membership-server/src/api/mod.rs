//! API routes for the membership server

pub mod aggregate;
pub mod entity;
pub mod health;
pub mod lookup;
pub mod mappings;
pub mod pagination;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::db::catalog;
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Aggregate resources
        .nest("/people", aggregate::routes(&catalog::PERSON))
        .nest("/organizations", aggregate::routes(&catalog::ORGANIZATION))
        // Flat entity resources
        .nest("/addresses", entity::routes(&catalog::ADDRESS_TABLE))
        .nest("/emails", entity::routes(&catalog::EMAIL_TABLE))
        .nest("/phones", entity::routes(&catalog::PHONE_TABLE))
        .nest("/memberships", entity::routes(&catalog::MEMBERSHIP_TABLE))
        // Lookup (mapping) tables
        .nest("/genders", lookup::routes(&catalog::GENDER))
        .nest(
            "/membership-fee-categories",
            lookup::routes(&catalog::MEMBERSHIP_FEE_CATEGORY),
        )
        .nest("/address-types", lookup::routes(&catalog::ADDRESS_TYPE))
        .nest("/email-types", lookup::routes(&catalog::EMAIL_TYPE))
        .nest("/phone-types", lookup::routes(&catalog::PHONE_TYPE))
        // Creation-form bundles
        .route("/person-mappings", get(mappings::person_mappings))
        .route("/organization-mappings", get(mappings::organization_mappings))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
