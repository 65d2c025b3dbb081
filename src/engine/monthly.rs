//! Monthly schedule aggregation
//!
//! Folds the month's records into `MonthlyStats`: per-modality totals,
//! the status census, sub-kind breakdowns, the unregistered worklist, and
//! the daily buckets. Recomputed from scratch on every call; feeding the
//! same records twice yields an identical value.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::engine::classify::{
    ConsultingKind, PersonalKind, PtSlot, consulting_kind, counts_in_report, personal_kind,
    pt_slot,
};
use crate::engine::daily::{DayBucket, bucketize};
use crate::engine::types::{
    EnrichedSchedule, ScheduleKind, ScheduleRecord, ScheduleStatus, YearMonth,
};

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub(crate) struct PtStats {
    pub(crate) total: u32,
    pub(crate) completed: u32,
    pub(crate) no_show_deducted: u32,
    pub(crate) no_show: u32,
    pub(crate) service: u32,
    pub(crate) cancelled: u32,
    pub(crate) inside: u32,
    pub(crate) outside: u32,
    pub(crate) weekend_holiday: u32,
    /// Percentage of reported sessions actually attended, rounded
    pub(crate) attendance_rate: u32,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub(crate) struct OtStats {
    pub(crate) total: u32,
    pub(crate) ot: u32,
    pub(crate) inbody: u32,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub(crate) struct ConsultingStats {
    pub(crate) total: u32,
    pub(crate) sales: u32,
    pub(crate) info: u32,
    pub(crate) status: u32,
    pub(crate) other: u32,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub(crate) struct PersonalStats {
    pub(crate) total: u32,
    pub(crate) meal: u32,
    pub(crate) conference: u32,
    pub(crate) meeting: u32,
    pub(crate) rest: u32,
    pub(crate) workout: u32,
    pub(crate) other: u32,
}

/// Fully derived monthly aggregate. No identity of its own: always
/// recomputed from a schedule set and a target month.
#[derive(Debug, Default, Clone, Serialize)]
pub(crate) struct MonthlyStats {
    pub(crate) month: String,

    /// Per-modality occurrence counts (report gate applied)
    pub(crate) pt: u32,
    pub(crate) ot: u32,
    pub(crate) consulting: u32,
    pub(crate) gx: u32,
    pub(crate) personal: u32,
    pub(crate) other: u32,

    /// Status census across all records in the month
    pub(crate) completed: u32,
    pub(crate) no_show_deducted: u32,
    pub(crate) no_show: u32,
    pub(crate) service: u32,

    /// Sessions awaiting outcome registration
    pub(crate) unregistered: u32,
    /// Records contributing to no bucket at all (cancelled non-PT,
    /// converted, unrecognized status)
    pub(crate) excluded: u32,

    /// Records counted into the report, and their hours
    pub(crate) total: u32,
    pub(crate) total_hours: f64,

    pub(crate) pt_stats: PtStats,
    pub(crate) ot_stats: OtStats,
    pub(crate) consulting_stats: ConsultingStats,
    pub(crate) personal_stats: PersonalStats,

    pub(crate) daily: BTreeMap<String, DayBucket>,
    pub(crate) unregistered_list: Vec<EnrichedSchedule>,
}

/// Aggregation result plus the ids of records whose negative duration was
/// clamped to zero, for the caller to surface.
#[derive(Debug, Default)]
pub(crate) struct MonthlyReport {
    pub(crate) stats: MonthlyStats,
    pub(crate) clamped_ids: Vec<String>,
}

impl MonthlyStats {
    fn new(month: YearMonth) -> Self {
        Self {
            month: month.key(),
            ..Self::default()
        }
    }

    fn accumulate(&mut self, entry: &EnrichedSchedule) {
        let record = &entry.record;

        match record.status {
            ScheduleStatus::Completed => self.completed += 1,
            ScheduleStatus::NoShowDeducted => self.no_show_deducted += 1,
            ScheduleStatus::NoShow => self.no_show += 1,
            ScheduleStatus::Service => self.service += 1,
            _ => {}
        }
        if record.status == ScheduleStatus::Unregistered {
            self.unregistered += 1;
            self.unregistered_list.push(entry.clone());
        }

        if counts_in_report(record) {
            let hours = record.duration_hours();
            self.total += 1;
            self.total_hours += hours;
            match record.kind {
                ScheduleKind::Pt => {
                    self.pt += 1;
                    self.pt_stats.record_reported(record);
                }
                ScheduleKind::Ot => {
                    self.ot += 1;
                    self.ot_stats.total += 1;
                    if record.inbody_checked {
                        self.ot_stats.inbody += 1;
                    } else {
                        self.ot_stats.ot += 1;
                    }
                }
                ScheduleKind::Consulting => {
                    self.consulting += 1;
                    self.consulting_stats.total += 1;
                    match consulting_kind(record) {
                        ConsultingKind::Sales => self.consulting_stats.sales += 1,
                        ConsultingKind::Info => self.consulting_stats.info += 1,
                        ConsultingKind::Status => self.consulting_stats.status += 1,
                        ConsultingKind::Other => self.consulting_stats.other += 1,
                    }
                }
                ScheduleKind::Gx => self.gx += 1,
                ScheduleKind::Personal => {
                    self.personal += 1;
                    self.personal_stats.total += 1;
                    match personal_kind(record) {
                        PersonalKind::Meal => self.personal_stats.meal += 1,
                        PersonalKind::Conference => self.personal_stats.conference += 1,
                        PersonalKind::Meeting => self.personal_stats.meeting += 1,
                        PersonalKind::Rest => self.personal_stats.rest += 1,
                        PersonalKind::Workout => self.personal_stats.workout += 1,
                        PersonalKind::Other => self.personal_stats.other += 1,
                    }
                }
                ScheduleKind::Other => self.other += 1,
            }
        } else {
            match (record.kind, record.status) {
                (ScheduleKind::Pt, ScheduleStatus::NoShow) => self.pt_stats.no_show += 1,
                (ScheduleKind::Pt, ScheduleStatus::Cancelled) => self.pt_stats.cancelled += 1,
                // already in the census / unregistered list above
                (_, ScheduleStatus::NoShow | ScheduleStatus::Unregistered) => {}
                _ => self.excluded += 1,
            }
        }
    }

    /// Derived figures that need the final counts. Guard the zero-session
    /// month: the rate is 0, never NaN.
    fn finalize(&mut self) {
        self.pt_stats.attendance_rate = if self.pt_stats.total == 0 {
            0
        } else {
            let attended = (self.pt_stats.completed + self.pt_stats.service) as f64;
            (attended * 100.0 / self.pt_stats.total as f64).round() as u32
        };
    }
}

impl PtStats {
    fn record_reported(&mut self, record: &ScheduleRecord) {
        self.total += 1;
        match record.status {
            ScheduleStatus::Completed => self.completed += 1,
            ScheduleStatus::NoShowDeducted => self.no_show_deducted += 1,
            ScheduleStatus::Service => self.service += 1,
            _ => {}
        }
        match pt_slot(record) {
            PtSlot::Inside => self.inside += 1,
            PtSlot::Outside => self.outside += 1,
            PtSlot::WeekendHoliday => self.weekend_holiday += 1,
        }
    }
}

/// Aggregate one calendar month of enriched records.
pub(crate) fn aggregate(enriched: &[EnrichedSchedule], month: YearMonth) -> MonthlyReport {
    let in_month: Vec<&EnrichedSchedule> = enriched
        .iter()
        .filter(|e| month.contains(&e.record.date_str))
        .collect();

    let clamped_ids: Vec<String> = in_month
        .iter()
        .filter(|e| e.record.has_negative_duration())
        .map(|e| e.record.id.clone())
        .collect();

    let mut stats = in_month
        .iter()
        .fold(MonthlyStats::new(month), |mut acc, entry| {
            acc.accumulate(entry);
            acc
        });
    stats.daily = bucketize(enriched, month);
    stats.finalize();

    MonthlyReport { stats, clamped_ids }
}
