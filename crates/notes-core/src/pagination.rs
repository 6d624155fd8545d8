//! Pagination parameters for list and search endpoints.

use serde::Deserialize;

/// Query parameters for paginated endpoints.
///
/// Pages are 1-indexed. Both fields are optional on the wire; missing or
/// out-of-range values fall back to defaults rather than erroring, and
/// `pageSize` is capped at [`PageParams::MAX_PAGE_SIZE`] so a single request
/// cannot ask for an unbounded result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    /// Page number (1-indexed, default 1).
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (default 10, capped at 100).
    #[serde(default, rename = "pageSize")]
    pub page_size: Option<u32>,
}

impl PageParams {
    /// Default number of items per page.
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    /// Upper bound on items per page.
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Create parameters from explicit values.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Effective page number: at least 1.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn limit(&self) -> i64 {
        i64::from(
            self.page_size
                .unwrap_or(Self::DEFAULT_PAGE_SIZE)
                .clamp(1, Self::MAX_PAGE_SIZE),
        )
    }

    /// Number of rows to skip: `(page - 1) * pageSize`.
    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * self.limit()
    }
}
