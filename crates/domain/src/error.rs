//! Domain error taxonomy for report queries.

use thiserror::Error;

use crate::store::StoreError;

/// Errors raised while resolving and executing a report query.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Missing or conflicting scope fields, malformed tokens, bad sort spec.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A base-role caller asked for another agent's data.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The external record store failed; the whole request aborts.
    #[error(transparent)]
    Store(#[from] StoreError),
}
