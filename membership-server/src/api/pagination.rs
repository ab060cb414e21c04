//! List pagination parameters
//!
//! Zero-based `page` and `page_size` query parameters with the documented
//! defaults. A zero page size is rejected up front — it would otherwise
//! surface as a division by zero when computing the page count.

use serde::Deserialize;
use shared::error::{AppError, ErrorCode};

fn default_page_size() -> u32 {
    20
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: default_page_size(),
        }
    }
}

impl Pagination {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page_size == 0 {
            return Err(AppError::with_message(
                ErrorCode::InvalidPagination,
                "page_size must be greater than zero",
            )
            .with_detail("page_size", 0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_page_zero_size_twenty() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.page, 0);
        assert_eq!(p.page_size, 20);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let p = Pagination {
            page: 0,
            page_size: 0,
        };
        let err = p.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPagination);
    }
}
