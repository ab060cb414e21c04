//! Unified service-layer error type for the membership server
//!
//! `ServiceError` bridges the gap between DB-layer errors (`sqlx::Error`) and
//! the API-layer error (`AppError`). It enables `?` propagation without manual
//! `.map_err(|e| { tracing::error!(...); AppError::new(...) })` boilerplate.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

/// Service-layer error — only two variants, keeps things simple.
///
/// - `Db`: Database/infrastructure errors (auto-logged, classified by the
///   underlying SQLite error where possible)
/// - `App`: Request errors (already an AppError with the correct ErrorCode)
#[derive(Debug)]
pub enum ServiceError {
    /// Database or infrastructure error
    Db(sqlx::Error),
    /// Request error (validation, malformed payload, etc.)
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                classify_db_error(&db_err)
            }
        }
    }
}

/// Map a sqlx error onto the error taxonomy. Constraint rejections keep the
/// storage engine's message so the client can see which rule fired; anything
/// else is an opaque database error.
fn classify_db_error(err: &sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(db) => {
            if db.is_foreign_key_violation() {
                AppError::with_message(ErrorCode::ForeignKeyViolation, db.message().to_string())
            } else if db.is_unique_violation() {
                AppError::with_message(ErrorCode::UniqueViolation, db.message().to_string())
            } else if db.is_check_violation() {
                AppError::with_message(ErrorCode::ConstraintViolation, db.message().to_string())
            } else {
                AppError::new(ErrorCode::DatabaseError)
            }
        }
        _ => AppError::new(ErrorCode::DatabaseError),
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
