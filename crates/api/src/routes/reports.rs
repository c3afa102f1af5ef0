//! Work report endpoint handlers.
//!
//! Both endpoints share the same resolution pipeline: validate the raw
//! query, resolve the date window, resolve the agent scope from the
//! caller's role, then hand one immutable filter to the store. The list
//! endpoint pages the matched rows; the summary endpoint aggregates the
//! full matched set.

use axum::{extract::Query, extract::State, Json};
use chrono::Utc;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AgentAuth;
use domain::error::ReportError;
use domain::models::{
    FilterEcho, ListWorkEntriesQuery, ReportFilter, ReportScope, WorkEntryListResponse,
    WorkSummaryQuery, WorkSummaryResponse,
};
use domain::services::{access, aggregate, rollup, scope};
use shared::pagination::PageParams;
use shared::sorting::{default_sort, parse_sort_spec};

/// GET /api/v1/reports/work-entries
///
/// Paged, sorted listing of work entries visible to the caller.
pub async fn list_work_entries(
    State(state): State<AppState>,
    auth: AgentAuth,
    Query(query): Query<ListWorkEntriesQuery>,
) -> Result<Json<WorkEntryListResponse>, ApiError> {
    query.validate()?;

    let window = scope::resolve_window(
        None,
        query.date,
        query.week_iso.as_deref(),
        query.from,
        query.to,
    )?;

    let agents = access::resolve_agent_scope(
        auth.agent_id,
        auth.role,
        query.agent_id,
        query.agent_ids.as_deref(),
    )?;

    let sort = match query.sort.as_deref() {
        Some(spec) => parse_sort_spec(spec)?,
        None => default_sort(),
    };

    let page = PageParams::from_query(query.page, query.page_size);

    let filter = ReportFilter {
        window,
        agents,
        client_id: query.client_id,
        group_id: query.group_id,
        type_id: query.type_id,
        search: query.q.map(|q| q.trim().to_string()),
        sort,
        page: Some(page),
    };

    let (items, total) = state
        .store
        .fetch_matching(&filter)
        .await
        .map_err(ReportError::Store)?;

    tracing::debug!(
        total = total,
        page = page.page,
        "Work entry listing resolved"
    );

    Ok(Json(WorkEntryListResponse {
        generated_at: Utc::now(),
        filters: FilterEcho::from(&filter),
        page: page.page,
        page_size: page.page_size,
        total,
        items,
    }))
}

/// GET /api/v1/reports/work-summary
///
/// Coverage summary over the full matched set: recorded versus merged
/// (covered) minutes, gaps, and per-day rollups for week and range scopes.
pub async fn work_summary(
    State(state): State<AppState>,
    auth: AgentAuth,
    Query(query): Query<WorkSummaryQuery>,
) -> Result<Json<WorkSummaryResponse>, ApiError> {
    query.validate()?;

    // The declared scope defaults to day and must match the date fields
    let declared = query.scope.unwrap_or(ReportScope::Day);
    let window = scope::resolve_window(
        Some(declared),
        query.date,
        query.week_iso.as_deref(),
        query.from,
        query.to,
    )?;

    let agents = access::resolve_agent_scope(
        auth.agent_id,
        auth.role,
        query.agent_id,
        query.agent_ids.as_deref(),
    )?;

    // The summary always covers the whole matched set: no paging, no
    // free-text filter, store-side order is irrelevant to aggregation.
    let filter = ReportFilter {
        window,
        agents,
        client_id: query.client_id,
        group_id: query.group_id,
        type_id: query.type_id,
        search: None,
        sort: default_sort(),
        page: None,
    };

    let (entries, total) = state
        .store
        .fetch_matching(&filter)
        .await
        .map_err(ReportError::Store)?;

    tracing::debug!(total = total, scope = %window.scope, "Work summary resolved");

    let intervals = aggregate::entry_intervals(&entries);
    let aggregation = aggregate::aggregate(&intervals);
    let by_day = window
        .scope
        .has_daily_rollup()
        .then(|| rollup::daily_rollup(&entries));

    Ok(Json(WorkSummaryResponse {
        generated_at: Utc::now(),
        filters: FilterEcho::from(&filter),
        aggregation,
        by_day,
    }))
}
