//! Interval aggregation: the sweep-line merge behind work summaries.
//!
//! Reconciles possibly-overlapping work intervals into covered time,
//! double-counted overlap time and the gaps between merged spans. Pure
//! function of the interval set; the input is never mutated.

use crate::models::aggregation::{AggregationResult, Gap, Interval, MergedInterval};
use crate::models::work_entry::WorkEntry;

/// Runs the interval merge over an unordered set of absolute-time intervals.
///
/// Intervals are sorted by `(start, end)` and swept once. An interval that
/// starts at or before the current span's end extends it (touching
/// intervals merge, so back-to-back work produces no gap); a strictly later
/// start closes the span and records a positive-width gap.
///
/// All duration arithmetic runs in seconds and is truncated to minutes on
/// the totals only. Recorded seconds always cover at least the merged
/// seconds, and truncation is monotonic, so `recorded_minutes >=
/// covered_minutes` holds even for sub-minute intervals. A separation
/// narrower than a whole minute emits no gap.
pub fn aggregate(intervals: &[Interval]) -> AggregationResult {
    if intervals.is_empty() {
        return AggregationResult::empty();
    }

    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|iv| (iv.start, iv.end));

    let recorded_seconds: i64 = sorted.iter().map(Interval::seconds).sum();

    let mut merged: Vec<MergedInterval> = Vec::new();
    let mut gaps: Vec<Gap> = Vec::new();
    let mut covered_seconds: i64 = 0;

    let mut cur_start = sorted[0].start;
    let mut cur_end = sorted[0].end;

    for iv in &sorted[1..] {
        if iv.start <= cur_end {
            cur_end = cur_end.max(iv.end);
        } else {
            covered_seconds += (cur_end - cur_start).num_seconds();
            merged.push(close_span(cur_start, cur_end));
            let gap_minutes = (iv.start - cur_end).num_seconds() / 60;
            if gap_minutes > 0 {
                gaps.push(Gap {
                    start: cur_end,
                    end: iv.start,
                    minutes: gap_minutes,
                });
            }
            cur_start = iv.start;
            cur_end = iv.end;
        }
    }
    covered_seconds += (cur_end - cur_start).num_seconds();
    merged.push(close_span(cur_start, cur_end));

    let recorded_minutes = recorded_seconds / 60;
    let covered_minutes = covered_seconds / 60;

    AggregationResult {
        parts_count: sorted.len(),
        recorded_minutes,
        covered_minutes,
        overlap_minutes: recorded_minutes - covered_minutes,
        first_start: merged.first().map(|m| m.start),
        last_end: merged.last().map(|m| m.end),
        merged_intervals: merged,
        gaps,
    }
}

/// Collects the absolute-time intervals of a set of work entries.
pub fn entry_intervals(entries: &[WorkEntry]) -> Vec<Interval> {
    entries.iter().map(WorkEntry::interval).collect()
}

fn close_span(start: chrono::NaiveDateTime, end: chrono::NaiveDateTime) -> MergedInterval {
    MergedInterval {
        start,
        end,
        minutes: (end - start).num_minutes(),
    }
}
