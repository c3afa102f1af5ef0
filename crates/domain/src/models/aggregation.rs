//! Aggregation result models.

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An absolute-time `(start, end)` pair with `end >= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    /// Exact width in seconds. Aggregation sums these and truncates to
    /// minutes once, on the totals, so per-interval rounding never skews
    /// the recorded/covered/overlap arithmetic.
    pub fn seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    /// Width in whole minutes (truncated).
    pub fn minutes(&self) -> i64 {
        self.seconds() / 60
    }
}

/// A span produced by merging overlapping or touching intervals.
///
/// The set of merged intervals in an [`AggregationResult`] is pairwise
/// non-overlapping, non-touching and sorted ascending by start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub minutes: i64,
}

/// Idle time strictly between two consecutive merged intervals.
///
/// `minutes` is always positive: touching intervals merge instead of
/// producing a zero-width gap, and a separation shorter than a whole
/// minute is below reporting resolution and emits no gap at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gap {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub minutes: i64,
}

/// Per-day rollup for week/range summaries. Only days with at least one
/// work entry appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: NaiveDate,
    pub parts_count: usize,
    pub recorded_minutes: i64,
    pub covered_minutes: i64,
    pub overlap_minutes: i64,
}

/// Result of running the interval merge over a set of work intervals.
///
/// Invariants: `recorded_minutes >= covered_minutes` and
/// `overlap_minutes == recorded_minutes - covered_minutes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    pub parts_count: usize,
    pub recorded_minutes: i64,
    pub covered_minutes: i64,
    pub overlap_minutes: i64,
    pub merged_intervals: Vec<MergedInterval>,
    pub gaps: Vec<Gap>,
    pub first_start: Option<NaiveDateTime>,
    pub last_end: Option<NaiveDateTime>,
}

impl AggregationResult {
    /// The result for an empty input set: all counts zero, no intervals,
    /// no gaps, no endpoints.
    pub fn empty() -> Self {
        Self {
            parts_count: 0,
            recorded_minutes: 0,
            covered_minutes: 0,
            overlap_minutes: 0,
            merged_intervals: Vec::new(),
            gaps: Vec::new(),
            first_start: None,
            last_end: None,
        }
    }
}
