//! Read-only record store capability.
//!
//! The reporting core never depends on a storage technology; it talks to
//! this narrow interface. The sqlx implementation lives in the persistence
//! crate, and tests inject in-memory stores.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::report::ReportFilter;
use crate::models::work_entry::WorkEntry;

/// Failure of the external record store. No retries, no partial results:
/// a store failure aborts the whole request.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record store failure: {0}")]
    Backend(String),
}

/// Read-only access to matching work entries.
#[async_trait]
pub trait WorkEntryStore: Send + Sync {
    /// Returns the page of entries matching `filter` plus the total row
    /// count independent of pagination.
    ///
    /// With `filter.page == None` the entire matching set is returned
    /// (the summary path needs every row, not a page).
    async fn fetch_matching(
        &self,
        filter: &ReportFilter,
    ) -> Result<(Vec<WorkEntry>, i64), StoreError>;
}
