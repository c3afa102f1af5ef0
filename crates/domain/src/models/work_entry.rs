//! Work entry domain model.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::aggregation::Interval;

/// One logged unit of work: a start/end time on a calendar day, attributed
/// to an agent, with catalog references and resolved display names.
///
/// Entries are created elsewhere; this service only reads them. The time
/// fields satisfy `start_time <= end_time` on the same calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
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

impl WorkEntry {
    /// Absolute start instant (work date + start time).
    pub fn start_at(&self) -> NaiveDateTime {
        self.work_date.and_time(self.start_time)
    }

    /// Absolute end instant (work date + end time).
    pub fn end_at(&self) -> NaiveDateTime {
        self.work_date.and_time(self.end_time)
    }

    /// Logged duration in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_at() - self.start_at()).num_minutes()
    }

    /// This entry as an absolute-time interval for aggregation.
    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start_at(),
            end: self.end_at(),
        }
    }
}
