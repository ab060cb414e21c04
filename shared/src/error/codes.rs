//! Unified error codes for the membership backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Payload / validation errors
//! - 2xxx: Schema / constraint errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Payload ====================
    /// Validation failed
    ValidationFailed = 1001,
    /// Invalid request
    InvalidRequest = 1002,
    /// Required field missing
    RequiredField = 1003,
    /// Timestamp could not be parsed
    InvalidTimestamp = 1004,
    /// Pagination parameters out of range
    InvalidPagination = 1005,
    /// Contact row must belong to exactly one of person/organization
    AmbiguousOwner = 1006,

    // ==================== 2xxx: Constraint ====================
    /// A database constraint rejected the write
    ConstraintViolation = 2001,
    /// A referenced row does not exist
    ForeignKeyViolation = 2002,
    /// A unique column value is already taken
    UniqueViolation = 2003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",

            Self::ValidationFailed => "Validation failed",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",
            Self::InvalidTimestamp => "Invalid timestamp",
            Self::InvalidPagination => "Invalid pagination parameters",
            Self::AmbiguousOwner => "Row must reference exactly one owner",

            Self::ConstraintViolation => "Constraint violation",
            Self::ForeignKeyViolation => "Referenced row does not exist",
            Self::UniqueViolation => "Value already exists",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Payload
            1001 => Ok(ErrorCode::ValidationFailed),
            1002 => Ok(ErrorCode::InvalidRequest),
            1003 => Ok(ErrorCode::RequiredField),
            1004 => Ok(ErrorCode::InvalidTimestamp),
            1005 => Ok(ErrorCode::InvalidPagination),
            1006 => Ok(ErrorCode::AmbiguousOwner),

            // Constraint
            2001 => Ok(ErrorCode::ConstraintViolation),
            2002 => Ok(ErrorCode::ForeignKeyViolation),
            2003 => Ok(ErrorCode::UniqueViolation),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
