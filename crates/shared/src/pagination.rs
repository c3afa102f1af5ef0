//! Offset-based pagination utilities.

use serde::Serialize;

/// Default page size when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Hard upper bound on page size.
pub const MAX_PAGE_SIZE: i64 = 200;

/// Normalized pagination parameters.
///
/// Construction clamps the raw query values: page is at least 1 and page
/// size is within `[1, MAX_PAGE_SIZE]`. A page past the last row simply
/// yields an empty item list with the correct total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page: i64,
    pub page_size: i64,
}

impl PageParams {
    /// Normalizes raw `page` / `pageSize` query values.
    pub fn from_query(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Row offset of the first item on this page.
    ///
    /// Saturates instead of overflowing: an absurdly large page number
    /// from the query string lands past every row and yields an empty
    /// page, never a panic.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Maximum number of rows on this page.
    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self::from_query(None, None)
    }
}
