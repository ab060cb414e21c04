//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::UniqueViolation => StatusCode::CONFLICT,

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::InvalidTimestamp
            | Self::InvalidPagination
            | Self::AmbiguousOwner => StatusCode::BAD_REQUEST,

            // 422 Unprocessable Entity
            Self::ConstraintViolation | Self::ForeignKeyViolation => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 500 Internal Server Error
            Self::Unknown | Self::InternalError | Self::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
