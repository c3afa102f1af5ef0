//! Report query, filter and response models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::pagination::PageParams;
use shared::sorting::SortKey;

use crate::models::aggregation::{AggregationResult, DailySummary};
use crate::models::work_entry::WorkEntry;

/// Temporal granularity of a report request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportScope {
    Day,
    Week,
    Range,
}

impl ReportScope {
    /// Whether a summary for this scope carries per-day rollups.
    pub fn has_daily_rollup(&self) -> bool {
        matches!(self, Self::Week | Self::Range)
    }
}

impl std::fmt::Display for ReportScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Range => write!(f, "range"),
        }
    }
}

/// A resolved half-open date interval `[start_date, end_date)` plus the
/// scope that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub scope: ReportScope,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateWindow {
    /// Whether a date falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date < self.end_date
    }
}

/// The set of agents a caller is authorized to query.
///
/// Produced by the access guard; the rest of the pipeline is role-agnostic
/// and only ever sees this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentScope {
    /// No agent restriction (elevated roles with no explicit filter).
    All,
    /// Restricted to exactly these agent ids.
    AnyOf(Vec<Uuid>),
}

impl AgentScope {
    /// Whether entries of the given agent are visible under this scope.
    pub fn permits(&self, agent_id: Uuid) -> bool {
        match self {
            Self::All => true,
            Self::AnyOf(ids) => ids.contains(&agent_id),
        }
    }

    /// The explicit id list, or `None` for the unrestricted scope.
    pub fn ids(&self) -> Option<&[Uuid]> {
        match self {
            Self::All => None,
            Self::AnyOf(ids) => Some(ids),
        }
    }
}

/// Raw query parameters of the list operation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListWorkEntriesQuery {
    pub date: Option<NaiveDate>,

    #[validate(custom(function = "shared::validation::validate_iso_week"))]
    pub week_iso: Option<String>,

    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,

    pub agent_id: Option<Uuid>,

    #[validate(custom(function = "shared::validation::validate_agent_id_list"))]
    pub agent_ids: Option<String>,

    pub client_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub type_id: Option<Uuid>,

    #[validate(custom(function = "shared::validation::validate_search_term"))]
    pub q: Option<String>,

    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort: Option<String>,
}

/// Raw query parameters of the summary operation. No paging, no free text,
/// no sort: a summary always covers the full matched set.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkSummaryQuery {
    pub scope: Option<ReportScope>,

    pub date: Option<NaiveDate>,

    #[validate(custom(function = "shared::validation::validate_iso_week"))]
    pub week_iso: Option<String>,

    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,

    pub agent_id: Option<Uuid>,

    #[validate(custom(function = "shared::validation::validate_agent_id_list"))]
    pub agent_ids: Option<String>,

    pub client_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub type_id: Option<Uuid>,
}

/// The fully resolved, immutable report query handed to the record store.
///
/// `page` is `None` on the summary path: the store then returns the entire
/// matching set.
#[derive(Debug, Clone)]
pub struct ReportFilter {
    pub window: DateWindow,
    pub agents: AgentScope,
    pub client_id: Option<Uuid>,
    pub group_id: Option<Uuid>,
    pub type_id: Option<Uuid>,
    pub search: Option<String>,
    pub sort: Vec<SortKey>,
    pub page: Option<PageParams>,
}

/// Normalized echo of the applied filters, returned with every response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterEcho {
    pub scope: ReportScope,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// `null` means "all agents".
    pub agent_ids: Option<Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl From<&ReportFilter> for FilterEcho {
    fn from(filter: &ReportFilter) -> Self {
        Self {
            scope: filter.window.scope,
            start_date: filter.window.start_date,
            end_date: filter.window.end_date,
            agent_ids: filter.agents.ids().map(|ids| ids.to_vec()),
            client_id: filter.client_id,
            group_id: filter.group_id,
            type_id: filter.type_id,
            q: filter.search.clone(),
        }
    }
}

/// Response envelope of the list operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntryListResponse {
    pub generated_at: DateTime<Utc>,
    pub filters: FilterEcho,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub items: Vec<WorkEntry>,
}

/// Response envelope of the summary operation. `by_day` is present exactly
/// when the scope is week or range.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSummaryResponse {
    pub generated_at: DateTime<Utc>,
    pub filters: FilterEcho,
    #[serde(flatten)]
    pub aggregation: AggregationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_day: Option<Vec<DailySummary>>,
}
