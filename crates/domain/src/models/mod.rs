//! Domain models for the Worklog backend.

pub mod aggregation;
pub mod report;
pub mod role;
pub mod work_entry;

pub use aggregation::{AggregationResult, DailySummary, Gap, Interval, MergedInterval};
pub use report::{
    AgentScope, DateWindow, FilterEcho, ListWorkEntriesQuery, ReportFilter, ReportScope,
    WorkEntryListResponse, WorkSummaryQuery, WorkSummaryResponse,
};
pub use role::Role;
pub use work_entry::WorkEntry;
