use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

/// Query params for plain paginated lists
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,
}

pub fn default_page() -> i64 {
    1
}

pub fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationQuery {
    pub fn offset(&self) -> usize {
        page_offset(self.page, self.page_size())
    }

    pub fn page_size(&self) -> i64 {
        clamp_page_size(self.limit)
    }
}

/// Page size clamped to `1..=MAX_PAGE_SIZE`
pub fn clamp_page_size(limit: i64) -> i64 {
    limit.clamp(1, MAX_PAGE_SIZE)
}

/// Number of records to skip. Saturates instead of overflowing, so an
/// absurd page number yields an empty page.
pub fn page_offset(page: i64, page_size: i64) -> usize {
    let skipped = page.max(1).saturating_sub(1).saturating_mul(page_size);
    usize::try_from(skipped).unwrap_or(usize::MAX)
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}
