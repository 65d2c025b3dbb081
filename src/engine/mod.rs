//! Session accounting and schedule statistics engine
//!
//! Pure, synchronous components over an in-memory record window: classify,
//! enrich with session ordinals, then aggregate monthly and per-day.

mod classify;
mod daily;
mod enrich;
mod monthly;
mod types;

pub(crate) use daily::DayBucket;
pub(crate) use enrich::enrich;
pub(crate) use monthly::{MonthlyReport, MonthlyStats, aggregate};
pub(crate) use types::{
    EnrichedSchedule, ScheduleKind, ScheduleRecord, ScheduleStatus, YearMonth,
};
