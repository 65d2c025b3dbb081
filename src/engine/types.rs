//! Core schedule types shared across all record sources
//!
//! These types represent the unified data model that all sources convert to.

use serde::{Deserialize, Serialize};

/// Top-level session category. Unrecognized values fold into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ScheduleKind {
    Pt,
    Ot,
    Consulting,
    Gx,
    Personal,
    Other,
}

impl ScheduleKind {
    pub(crate) fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return ScheduleKind::Other;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "pt" => ScheduleKind::Pt,
            "ot" => ScheduleKind::Ot,
            "consulting" => ScheduleKind::Consulting,
            "gx" => ScheduleKind::Gx,
            "personal" => ScheduleKind::Personal,
            _ => ScheduleKind::Other,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            ScheduleKind::Pt => "PT",
            ScheduleKind::Ot => "OT",
            ScheduleKind::Consulting => "Consulting",
            ScheduleKind::Gx => "GX",
            ScheduleKind::Personal => "Personal",
            ScheduleKind::Other => "Other",
        }
    }

    /// Membership names are matched against this token to find the
    /// active package for a modality ("PT 30" contains "pt").
    pub(crate) fn membership_token(self) -> Option<&'static str> {
        match self {
            ScheduleKind::Pt => Some("pt"),
            ScheduleKind::Ot => Some("ot"),
            _ => None,
        }
    }
}

/// Session outcome. Absent status means the session occurred but nobody
/// recorded the result yet; unrecognized strings map to `Unknown`, which
/// never charges a credit and never counts toward report totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ScheduleStatus {
    Completed,
    NoShowDeducted,
    NoShow,
    Service,
    Cancelled,
    Converted,
    Unregistered,
    Unknown,
}

impl ScheduleStatus {
    pub(crate) fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return ScheduleStatus::Unregistered;
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ScheduleStatus::Unregistered;
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "completed" => ScheduleStatus::Completed,
            "no_show_deducted" => ScheduleStatus::NoShowDeducted,
            "no_show" => ScheduleStatus::NoShow,
            "service" => ScheduleStatus::Service,
            "cancelled" => ScheduleStatus::Cancelled,
            "converted" => ScheduleStatus::Converted,
            _ => ScheduleStatus::Unknown,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            ScheduleStatus::Completed => "completed",
            ScheduleStatus::NoShowDeducted => "no_show_deducted",
            ScheduleStatus::NoShow => "no_show",
            ScheduleStatus::Service => "service",
            ScheduleStatus::Cancelled => "cancelled",
            ScheduleStatus::Converted => "converted",
            ScheduleStatus::Unregistered => "unregistered",
            ScheduleStatus::Unknown => "unknown",
        }
    }
}

/// Raw schedule record parsed from source files
/// All sources convert their native format to this unified structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ScheduleRecord {
    /// Unique schedule id
    pub(crate) id: String,
    /// Member reference; absent for staff-only blocks
    pub(crate) member_id: Option<String>,
    /// Owning staff member
    pub(crate) staff_id: String,
    pub(crate) kind: ScheduleKind,
    /// Sub-kind tag (PT: inside/outside/weekend/holiday, Personal: inside/outside)
    pub(crate) schedule_type: Option<String>,
    /// Free text matched against the sub-category pattern tables
    pub(crate) sub_type: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) status: ScheduleStatus,
    /// OT sub-classification flag
    pub(crate) inbody_checked: bool,
    /// UTC timestamp strings as received
    pub(crate) start_time: String,
    pub(crate) end_time: String,
    /// Start/end in milliseconds for ordering and duration
    pub(crate) start_ms: i64,
    pub(crate) end_ms: i64,
    /// Local calendar date (YYYY-MM-DD)
    pub(crate) date_str: String,
    /// Local clock time (HH:MM)
    pub(crate) time_str: String,
}

impl ScheduleRecord {
    /// Duration in hours, clamped at zero. Negative spans are a data
    /// integrity problem; callers use `has_negative_duration` to report them.
    pub(crate) fn duration_hours(&self) -> f64 {
        (self.end_ms - self.start_ms).max(0) as f64 / 3_600_000.0
    }

    pub(crate) fn has_negative_duration(&self) -> bool {
        self.end_ms < self.start_ms
    }
}

/// Schedule record plus the session-accounting fields derived by the enricher
#[derive(Debug, Clone, Serialize)]
pub(crate) struct EnrichedSchedule {
    #[serde(flatten)]
    pub(crate) record: ScheduleRecord,
    /// 1-based ordinal among chargeable sessions of the same modality for
    /// the same member; for a pending session, the ordinal it would occupy
    pub(crate) session_number: Option<u32>,
    /// True until the status becomes one of the two chargeable outcomes
    pub(crate) is_not_completed: bool,
    /// Purchased session count from the active membership, when known
    pub(crate) total_sessions: Option<u32>,
}

/// Calendar month used to scope aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct YearMonth {
    pub(crate) year: i32,
    pub(crate) month: u32,
}

impl YearMonth {
    pub(crate) fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub(crate) fn key(self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// True when a local date string (YYYY-MM-DD) falls in this month
    pub(crate) fn contains(self, date_str: &str) -> bool {
        date_str.get(0..7) == Some(self.key().as_str())
    }
}

/// Baseline record for tests across the engine modules.
#[cfg(test)]
pub(crate) fn test_record() -> ScheduleRecord {
    ScheduleRecord {
        id: "sch_1".to_string(),
        member_id: Some("mem_1".to_string()),
        staff_id: "stf_1".to_string(),
        kind: ScheduleKind::Pt,
        schedule_type: Some("inside".to_string()),
        sub_type: None,
        title: None,
        status: ScheduleStatus::Completed,
        inbody_checked: false,
        start_time: "2026-03-01T10:00:00Z".to_string(),
        end_time: "2026-03-01T11:00:00Z".to_string(),
        start_ms: 0,
        end_ms: 3_600_000,
        date_str: "2026-03-01".to_string(),
        time_str: "10:00".to_string(),
    }
}
