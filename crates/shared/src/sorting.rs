//! Sort specification parsing.
//!
//! A sort spec is a comma-separated list of `field:direction` tokens, e.g.
//! `date:desc,start,agent:asc`. Fields come from a fixed whitelist; the
//! direction defaults to ascending when omitted. Unknown fields or malformed
//! tokens are rejected rather than ignored.

use serde::Serialize;
use thiserror::Error;

/// Error type for sort-spec parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortError {
    #[error("Unknown sort field: {0}")]
    UnknownField(String),
    #[error("Invalid sort direction: {0}")]
    InvalidDirection(String),
    #[error("Empty sort token")]
    EmptyToken,
}

/// Whitelisted sortable fields for work-entry listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    Start,
    Agent,
    Client,
    Group,
    Type,
    Ticket,
}

impl SortField {
    fn parse(s: &str) -> Result<Self, SortError> {
        match s {
            "date" => Ok(Self::Date),
            "start" => Ok(Self::Start),
            "agent" => Ok(Self::Agent),
            "client" => Ok(Self::Client),
            "group" => Ok(Self::Group),
            "type" => Ok(Self::Type),
            "ticket" => Ok(Self::Ticket),
            other => Err(SortError::UnknownField(other.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    fn parse(s: &str) -> Result<Self, SortError> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(SortError::InvalidDirection(other.to_string())),
        }
    }
}

/// One `(field, direction)` pair of a sort spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortKey {
    pub field: SortField,
    pub dir: SortDir,
}

/// Parses a comma-separated sort spec into ordered sort keys.
///
/// Whitespace around tokens is tolerated; field and direction matching is
/// case-insensitive. An empty or missing spec yields the default ordering.
pub fn parse_sort_spec(spec: &str) -> Result<Vec<SortKey>, SortError> {
    let mut keys = Vec::new();
    for token in spec.split(',') {
        let token = token.trim();
        if token.is_empty() {
            return Err(SortError::EmptyToken);
        }
        let (field, dir) = match token.split_once(':') {
            Some((f, d)) => (
                SortField::parse(&f.trim().to_ascii_lowercase())?,
                SortDir::parse(&d.trim().to_ascii_lowercase())?,
            ),
            None => (SortField::parse(&token.to_ascii_lowercase())?, SortDir::Asc),
        };
        keys.push(SortKey { field, dir });
    }
    Ok(keys)
}

/// Default ordering applied when no sort spec is supplied: work date, then
/// start time, both ascending.
pub fn default_sort() -> Vec<SortKey> {
    vec![
        SortKey {
            field: SortField::Date,
            dir: SortDir::Asc,
        },
        SortKey {
            field: SortField::Start,
            dir: SortDir::Asc,
        },
    ]
}
