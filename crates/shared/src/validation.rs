//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;
use validator::ValidationError;

/// Maximum length of a free-text search term.
const MAX_SEARCH_TERM_LEN: usize = 120;

lazy_static! {
    /// ISO week token shape: `YYYY-Www` with a zero-padded two-digit week.
    static ref ISO_WEEK_RE: Regex = Regex::new(r"^\d{4}-W\d{2}$").expect("valid regex");
}

/// Validates the shape of an ISO week token (`YYYY-Www`).
///
/// Only the shape is checked here; whether the week number exists in that
/// year (week 53 in short years) is decided when the token is resolved to a
/// date range.
pub fn validate_iso_week(week: &str) -> Result<(), ValidationError> {
    if ISO_WEEK_RE.is_match(week) {
        Ok(())
    } else {
        let mut err = ValidationError::new("iso_week_format");
        err.message = Some("Week must match YYYY-Www, e.g. 2026-W07".into());
        Err(err)
    }
}

/// Validates a comma-separated list of agent UUIDs.
pub fn validate_agent_id_list(list: &str) -> Result<(), ValidationError> {
    let invalid = list
        .split(',')
        .map(str::trim)
        .any(|token| token.is_empty() || Uuid::parse_str(token).is_err());
    if invalid {
        let mut err = ValidationError::new("agent_id_list");
        err.message = Some("agentIds must be a comma-separated list of UUIDs".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Parses a comma-separated list of agent UUIDs.
///
/// Returns `None` when any token is malformed; validation should have
/// rejected such input already.
pub fn parse_agent_id_list(list: &str) -> Option<Vec<Uuid>> {
    list.split(',')
        .map(str::trim)
        .map(|token| Uuid::parse_str(token).ok())
        .collect()
}

/// Validates a free-text search term: non-blank and bounded in length.
pub fn validate_search_term(term: &str) -> Result<(), ValidationError> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("search_term_blank");
        err.message = Some("Search term must not be blank".into());
        return Err(err);
    }
    if trimmed.len() > MAX_SEARCH_TERM_LEN {
        let mut err = ValidationError::new("search_term_length");
        err.message = Some("Search term is too long".into());
        return Err(err);
    }
    Ok(())
}
