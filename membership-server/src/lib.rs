//! membership-server — Membership management backend
//!
//! CRUD HTTP service over the membership schema: people, organizations,
//! their contact details (addresses, emails, phones), memberships linking
//! the two, and the small mapping tables behind every dropdown. Person and
//! organization are served as aggregates — the entity plus its dependent
//! collections and lookup options in one payload.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod state;

pub use api::create_router;
pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;
