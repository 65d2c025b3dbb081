//! Per-day schedule buckets
//!
//! Applies the monthly classification rules per local calendar day. Every
//! bucket keeps its own running totals; summed over a month they must equal
//! the monthly figures.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::engine::classify::{
    ConsultingKind, PersonalSlot, PtSlot, consulting_kind, counts_in_report, personal_slot,
    pt_slot,
};
use crate::engine::types::{
    EnrichedSchedule, ScheduleKind, ScheduleRecord, ScheduleStatus, YearMonth,
};

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub(crate) struct CountHours {
    pub(crate) count: u32,
    pub(crate) hours: f64,
}

impl CountHours {
    fn add(&mut self, hours: f64) {
        self.count += 1;
        self.hours += hours;
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub(crate) struct PtDay {
    pub(crate) count: u32,
    pub(crate) hours: f64,
    pub(crate) inside: u32,
    pub(crate) outside: u32,
    pub(crate) weekend_holiday: u32,
    pub(crate) service: u32,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub(crate) struct OtDay {
    pub(crate) count: u32,
    pub(crate) hours: f64,
    pub(crate) inbody: u32,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub(crate) struct ConsultingDay {
    pub(crate) count: u32,
    pub(crate) hours: f64,
    pub(crate) sales: u32,
    pub(crate) info: u32,
    pub(crate) status: u32,
    pub(crate) other: u32,
}

/// Personal blocks report hours per slot, not counts: the dashboard shows
/// how much of the day went to in-gym versus out-of-gym personal time.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub(crate) struct PersonalDay {
    pub(crate) count: u32,
    pub(crate) hours: f64,
    pub(crate) inside: f64,
    pub(crate) outside: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub(crate) struct DayBucket {
    pub(crate) total: CountHours,
    pub(crate) pt: PtDay,
    pub(crate) ot: OtDay,
    pub(crate) consulting: ConsultingDay,
    pub(crate) gx: CountHours,
    pub(crate) personal: PersonalDay,
    pub(crate) other: CountHours,
}

impl DayBucket {
    fn accumulate(&mut self, record: &ScheduleRecord) {
        let hours = record.duration_hours();
        self.total.add(hours);

        match record.kind {
            ScheduleKind::Pt => {
                self.pt.count += 1;
                self.pt.hours += hours;
                match pt_slot(record) {
                    PtSlot::Inside => self.pt.inside += 1,
                    PtSlot::Outside => self.pt.outside += 1,
                    PtSlot::WeekendHoliday => self.pt.weekend_holiday += 1,
                }
                if record.status == ScheduleStatus::Service {
                    self.pt.service += 1;
                }
            }
            ScheduleKind::Ot => {
                self.ot.count += 1;
                self.ot.hours += hours;
                if record.inbody_checked {
                    self.ot.inbody += 1;
                }
            }
            ScheduleKind::Consulting => {
                self.consulting.count += 1;
                self.consulting.hours += hours;
                match consulting_kind(record) {
                    ConsultingKind::Sales => self.consulting.sales += 1,
                    ConsultingKind::Info => self.consulting.info += 1,
                    ConsultingKind::Status => self.consulting.status += 1,
                    ConsultingKind::Other => self.consulting.other += 1,
                }
            }
            ScheduleKind::Gx => self.gx.add(hours),
            ScheduleKind::Personal => {
                self.personal.count += 1;
                self.personal.hours += hours;
                match personal_slot(record) {
                    PersonalSlot::Inside => self.personal.inside += hours,
                    PersonalSlot::Outside => self.personal.outside += hours,
                }
            }
            ScheduleKind::Other => self.other.add(hours),
        }
    }
}

/// Bucket the month's records by local calendar date. Only records that
/// pass the report gate contribute, so the per-day totals reconcile with
/// the monthly aggregate.
pub(crate) fn bucketize(
    enriched: &[EnrichedSchedule],
    month: YearMonth,
) -> BTreeMap<String, DayBucket> {
    enriched
        .iter()
        .filter(|e| month.contains(&e.record.date_str))
        .filter(|e| counts_in_report(&e.record))
        .fold(BTreeMap::new(), |mut days, e| {
            days.entry(e.record.date_str.clone())
                .or_default()
                .accumulate(&e.record);
            days
        })
}
