//! Daily rollup: per-day re-aggregation for week/range summaries.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::aggregation::{DailySummary, Interval};
use crate::models::work_entry::WorkEntry;
use crate::services::aggregate;

/// Partitions entries by work date and aggregates each day on its own.
///
/// Days without entries are omitted; the output is sorted ascending by
/// date. Merging never crosses days here — the whole-window aggregation is
/// a separate run over all intervals.
pub fn daily_rollup(entries: &[WorkEntry]) -> Vec<DailySummary> {
    let mut by_day: BTreeMap<NaiveDate, Vec<Interval>> = BTreeMap::new();
    for entry in entries {
        by_day.entry(entry.work_date).or_default().push(entry.interval());
    }

    by_day
        .into_iter()
        .map(|(date, intervals)| {
            let result = aggregate::aggregate(&intervals);
            DailySummary {
                date,
                parts_count: result.parts_count,
                recorded_minutes: result.recorded_minutes,
                covered_minutes: result.covered_minutes,
                overlap_minutes: result.overlap_minutes,
            }
        })
        .collect()
}
