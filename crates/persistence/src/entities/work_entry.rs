//! Work entry entity.

use chrono::{NaiveDate, NaiveTime};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::WorkEntry;

/// One row of the work-entry listing query, catalog names already joined.
#[derive(Debug, Clone, FromRow)]
pub struct WorkEntryRow {
    pub id: i64,
    pub agent_id: Uuid,
    pub agent_name: String,
    pub work_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub action: String,
    pub ticket_ref: Option<String>,
    pub store_label: Option<String>,
    pub client_id: Option<Uuid>,
    pub client_name: Option<String>,
    pub group_id: Option<Uuid>,
    pub group_name: Option<String>,
    pub type_id: Option<Uuid>,
    pub type_name: Option<String>,
    pub tags: Option<String>,
}

impl From<WorkEntryRow> for WorkEntry {
    fn from(row: WorkEntryRow) -> Self {
        Self {
            id: row.id,
            agent_id: row.agent_id,
            agent_name: row.agent_name,
            work_date: row.work_date,
            start_time: row.start_time,
            end_time: row.end_time,
            action: row.action,
            ticket_ref: row.ticket_ref,
            store_label: row.store_label,
            client_id: row.client_id,
            client_name: row.client_name,
            group_id: row.group_id,
            group_name: row.group_name,
            type_id: row.type_id,
            type_name: row.type_name,
            tags: row.tags,
        }
    }
}
