//! Raw schedule row shared by the export formats
//!
//! Both sources deliver the backend's schedule collection shape; this
//! module folds it into the engine's `ScheduleRecord`, dropping rows whose
//! timestamps cannot be parsed.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::consts::UNKNOWN;
use crate::engine::{ScheduleKind, ScheduleRecord, ScheduleStatus};
use crate::utils::Timezone;

#[derive(Debug, Deserialize)]
pub(crate) struct RawScheduleRow {
    id: Option<String>,
    member_id: Option<String>,
    staff_id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    schedule_type: Option<String>,
    sub_type: Option<String>,
    title: Option<String>,
    status: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    #[serde(default)]
    inbody_checked: bool,
    /// Mutation timestamp; present in the audit feed
    updated_at: Option<String>,
}

/// A converted row. `updated_ms` orders feed mutations of the same id;
/// export rows fall back to the start time.
#[derive(Debug, Clone)]
pub(crate) struct ParsedRow {
    pub(crate) record: ScheduleRecord,
    pub(crate) updated_ms: i64,
}

/// Rows parsed from one file plus the count of rows dropped for
/// unparseable ids or timestamps.
#[derive(Debug, Default)]
pub(crate) struct ParsedBatch {
    pub(crate) rows: Vec<ParsedRow>,
    pub(crate) skipped: i64,
}

impl ParsedBatch {
    pub(crate) fn push(&mut self, row: Option<ParsedRow>) {
        match row {
            Some(row) => self.rows.push(row),
            None => self.skipped += 1,
        }
    }

    pub(crate) fn merge(&mut self, other: ParsedBatch) {
        self.rows.extend(other.rows);
        self.skipped += other.skipped;
    }
}

impl RawScheduleRow {
    pub(crate) fn into_row(self, timezone: &Timezone) -> Option<ParsedRow> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let start = self.start_time.as_deref()?.parse::<DateTime<Utc>>().ok()?;
        let end = self.end_time.as_deref()?.parse::<DateTime<Utc>>().ok()?;
        let (date_str, time_str) = timezone.split_local(start);

        let updated_ms = self
            .updated_at
            .as_deref()
            .and_then(|ts| ts.parse::<DateTime<Utc>>().ok())
            .map(|ts| ts.timestamp_millis())
            .unwrap_or_else(|| start.timestamp_millis());

        let record = ScheduleRecord {
            id,
            member_id: self.member_id.filter(|m| !m.is_empty()),
            staff_id: self
                .staff_id
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            kind: ScheduleKind::from_raw(self.kind.as_deref()),
            schedule_type: self.schedule_type,
            sub_type: self.sub_type,
            title: self.title,
            status: ScheduleStatus::from_raw(self.status.as_deref()),
            inbody_checked: self.inbody_checked,
            start_time: self.start_time.unwrap_or_default(),
            end_time: self.end_time.unwrap_or_default(),
            start_ms: start.timestamp_millis(),
            end_ms: end.timestamp_millis(),
            date_str,
            time_str,
        };
        Some(ParsedRow { record, updated_ms })
    }
}
