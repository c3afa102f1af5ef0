//! Scope resolution: turning raw time-scope inputs into an exact half-open
//! date window.
//!
//! Exactly one of `{date}`, `{week}`, `{from, to}` must be supplied. When a
//! scope is declared (summary endpoint) the supplied fields must match it;
//! when it is absent (list endpoint) the scope is inferred from the fields.
//! Ambiguous input is rejected, never guessed.

use chrono::{Days, NaiveDate, Weekday};

use crate::error::ReportError;
use crate::models::report::{DateWindow, ReportScope};

/// Resolves scope inputs into a [`DateWindow`].
pub fn resolve_window(
    scope: Option<ReportScope>,
    date: Option<NaiveDate>,
    week: Option<&str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<DateWindow, ReportError> {
    if from.is_some() != to.is_some() {
        return Err(ReportError::Validation(
            "Both from and to are required for a date range".to_string(),
        ));
    }

    let supplied = [date.is_some(), week.is_some(), from.is_some()]
        .iter()
        .filter(|present| **present)
        .count();
    if supplied == 0 {
        return Err(ReportError::Validation(
            "One of date, week or from/to is required".to_string(),
        ));
    }
    if supplied > 1 {
        return Err(ReportError::Validation(
            "date, week and from/to are mutually exclusive".to_string(),
        ));
    }

    let effective = if date.is_some() {
        ReportScope::Day
    } else if week.is_some() {
        ReportScope::Week
    } else {
        ReportScope::Range
    };

    if let Some(declared) = scope {
        if declared != effective {
            return Err(ReportError::Validation(format!(
                "Scope {} does not match the supplied date fields",
                declared
            )));
        }
    }

    match effective {
        ReportScope::Day => {
            let start = date.expect("checked above");
            let end = next_day(start)?;
            Ok(DateWindow {
                scope: ReportScope::Day,
                start_date: start,
                end_date: end,
            })
        }
        ReportScope::Week => {
            let monday = parse_iso_week(week.expect("checked above"))?;
            let end = monday
                .checked_add_days(Days::new(7))
                .ok_or_else(|| ReportError::Validation("Week out of range".to_string()))?;
            Ok(DateWindow {
                scope: ReportScope::Week,
                start_date: monday,
                end_date: end,
            })
        }
        ReportScope::Range => {
            let (start, last) = (from.expect("checked above"), to.expect("checked above"));
            if start > last {
                return Err(ReportError::Validation(
                    "from must not be after to".to_string(),
                ));
            }
            let end = next_day(last)?;
            Ok(DateWindow {
                scope: ReportScope::Range,
                start_date: start,
                end_date: end,
            })
        }
    }
}

/// Parses an ISO week token (`YYYY-Www`) to the Monday of that week.
fn parse_iso_week(token: &str) -> Result<NaiveDate, ReportError> {
    let malformed = || {
        ReportError::Validation(format!(
            "Malformed week token '{}', expected YYYY-Www",
            token
        ))
    };

    let (year_part, week_part) = token.split_once("-W").ok_or_else(malformed)?;
    if year_part.len() != 4 || week_part.len() != 2 {
        return Err(malformed());
    }
    let year: i32 = year_part.parse().map_err(|_| malformed())?;
    let week: u32 = week_part.parse().map_err(|_| malformed())?;

    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).ok_or_else(|| {
        ReportError::Validation(format!("Week {} does not exist in year {}", week, year))
    })
}

fn next_day(date: NaiveDate) -> Result<NaiveDate, ReportError> {
    date.checked_add_days(Days::new(1))
        .ok_or_else(|| ReportError::Validation("Date out of range".to_string()))
}
