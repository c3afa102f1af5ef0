//! Work entry repository.
//!
//! The sqlx implementation of the read-only work-entry store. Builds the
//! listing query dynamically from a resolved report filter: date window,
//! authorized agent set, catalog filters, free-text search, whitelist
//! ordering and optional pagination.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::report::{AgentScope, ReportFilter};
use domain::models::WorkEntry;
use domain::store::{StoreError, WorkEntryStore};
use shared::sorting::{SortDir, SortField, SortKey};

use crate::entities::WorkEntryRow;

/// Repository for work entry data.
#[derive(Debug, Clone)]
pub struct WorkEntryRepository {
    pool: PgPool,
}

const SELECT_COLUMNS: &str = r#"
    SELECT
        w.id,
        w.agent_id,
        a.display_name AS agent_name,
        w.work_date,
        w.start_time,
        w.end_time,
        w.action,
        w.ticket_ref,
        w.store_label,
        w.client_id,
        c.name AS client_name,
        w.group_id,
        g.name AS group_name,
        w.type_id,
        t.name AS type_name,
        w.tags
"#;

const FROM_JOINED: &str = r#"
    FROM work_entries w
    JOIN agents a ON a.id = w.agent_id
    LEFT JOIN clients c ON c.id = w.client_id
    LEFT JOIN client_groups g ON g.id = w.group_id
    LEFT JOIN work_types t ON t.id = w.type_id
"#;

impl WorkEntryRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds the WHERE clause for `filter`, returning the SQL fragment and
    /// the index of the next free bind parameter.
    fn where_clause(filter: &ReportFilter) -> (String, usize) {
        // $1 and $2 are always the date window bounds.
        let mut sql = String::from(" WHERE w.work_date >= $1 AND w.work_date < $2");
        let mut param_idx = 3;

        if matches!(filter.agents, AgentScope::AnyOf(_)) {
            sql.push_str(&format!(" AND w.agent_id = ANY(${})", param_idx));
            param_idx += 1;
        }
        if filter.client_id.is_some() {
            sql.push_str(&format!(" AND w.client_id = ${}", param_idx));
            param_idx += 1;
        }
        if filter.group_id.is_some() {
            sql.push_str(&format!(" AND w.group_id = ${}", param_idx));
            param_idx += 1;
        }
        if filter.type_id.is_some() {
            sql.push_str(&format!(" AND w.type_id = ${}", param_idx));
            param_idx += 1;
        }
        if filter.search.is_some() {
            // One bound pattern matched against every searchable field.
            sql.push_str(&format!(
                " AND (w.ticket_ref ILIKE ${i} OR w.action ILIKE ${i} \
                 OR w.store_label ILIKE ${i} OR c.name ILIKE ${i})",
                i = param_idx
            ));
            param_idx += 1;
        }

        (sql, param_idx)
    }

    /// Maps the whitelisted sort keys onto columns, always ending with the
    /// `w.id` tie-break so ordering is stable.
    fn order_clause(sort: &[SortKey]) -> String {
        let mut terms: Vec<String> = sort
            .iter()
            .map(|key| {
                let column = match key.field {
                    SortField::Date => "w.work_date",
                    SortField::Start => "w.start_time",
                    SortField::Agent => "a.display_name",
                    SortField::Client => "c.name",
                    SortField::Group => "g.name",
                    SortField::Type => "t.name",
                    SortField::Ticket => "w.ticket_ref",
                };
                let dir = match key.dir {
                    SortDir::Asc => "ASC",
                    SortDir::Desc => "DESC",
                };
                format!("{} {}", column, dir)
            })
            .collect();
        terms.push("w.id ASC".to_string());
        format!(" ORDER BY {}", terms.join(", "))
    }

    fn bind_filters<'q, O>(
        query: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
        filter: &'q ReportFilter,
        pattern: &'q Option<String>,
    ) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
        let mut query = query
            .bind(filter.window.start_date)
            .bind(filter.window.end_date);
        if let AgentScope::AnyOf(ids) = &filter.agents {
            query = query.bind(ids.as_slice());
        }
        if let Some(client_id) = filter.client_id {
            query = query.bind(client_id);
        }
        if let Some(group_id) = filter.group_id {
            query = query.bind(group_id);
        }
        if let Some(type_id) = filter.type_id {
            query = query.bind(type_id);
        }
        if let Some(pattern) = pattern {
            query = query.bind(pattern.as_str());
        }
        query
    }

    async fn count_matching(
        &self,
        filter: &ReportFilter,
        pattern: &Option<String>,
    ) -> Result<i64, sqlx::Error> {
        let (where_sql, _) = Self::where_clause(filter);
        let sql = format!("SELECT COUNT(*) {} {}", FROM_JOINED, where_sql);

        let query = sqlx::query_as::<_, (i64,)>(&sql);
        let (total,) = Self::bind_filters(query, filter, pattern)
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn list_matching(
        &self,
        filter: &ReportFilter,
        pattern: &Option<String>,
    ) -> Result<Vec<WorkEntryRow>, sqlx::Error> {
        let (where_sql, param_idx) = Self::where_clause(filter);
        let mut sql = format!(
            "{} {} {} {}",
            SELECT_COLUMNS,
            FROM_JOINED,
            where_sql,
            Self::order_clause(&filter.sort)
        );

        if filter.page.is_some() {
            sql.push_str(&format!(" LIMIT ${} OFFSET ${}", param_idx, param_idx + 1));
        }

        let query = sqlx::query_as::<_, WorkEntryRow>(&sql);
        let mut query = Self::bind_filters(query, filter, pattern);
        if let Some(page) = &filter.page {
            query = query.bind(page.limit()).bind(page.offset());
        }

        query.fetch_all(&self.pool).await
    }
}

#[async_trait]
impl WorkEntryStore for WorkEntryRepository {
    async fn fetch_matching(
        &self,
        filter: &ReportFilter,
    ) -> Result<(Vec<WorkEntry>, i64), StoreError> {
        // ILIKE pattern, special characters escaped so they match literally.
        let pattern = filter
            .search
            .as_deref()
            .map(|term| format!("%{}%", escape_like(term.trim())));

        let total = self
            .count_matching(filter, &pattern)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let rows = self
            .list_matching(filter, &pattern)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        tracing::debug!(total, returned = rows.len(), "work-entry query executed");

        Ok((rows.into_iter().map(WorkEntry::from).collect(), total))
    }
}

/// Escapes `%`, `_` and `\` so a search term matches literally inside ILIKE.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
