//! Session classification predicates and sub-category tables
//!
//! Maps a record's (kind, status) pair into the semantic buckets the
//! aggregators count. The predicates are total: every status value,
//! including unrecognized ones, lands in a defined bucket.

use crate::engine::types::{ScheduleKind, ScheduleRecord, ScheduleStatus};

/// True when the outcome consumes a purchased session credit.
pub(crate) fn is_chargeable(status: ScheduleStatus) -> bool {
    matches!(
        status,
        ScheduleStatus::Completed | ScheduleStatus::NoShowDeducted
    )
}

/// True when the session counts toward occurrence/hours totals for
/// non-Personal modalities. Superset of chargeable: service sessions
/// occurred but consumed no credit.
pub(crate) fn is_reportable(status: ScheduleStatus) -> bool {
    is_chargeable(status) || status == ScheduleStatus::Service
}

/// True when the record counts toward occurrence and hours totals.
/// Personal blocks are self-attested and count regardless of status;
/// everything else passes through the reportability gate.
pub(crate) fn counts_in_report(record: &ScheduleRecord) -> bool {
    record.kind == ScheduleKind::Personal || is_reportable(record.status)
}

/// PT slot derived from the `schedule_type` tag. Weekend and holiday
/// sessions share a bucket for payroll rate purposes; an absent or
/// unrecognized tag falls back to the in-gym slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PtSlot {
    Inside,
    Outside,
    WeekendHoliday,
}

pub(crate) fn pt_slot(record: &ScheduleRecord) -> PtSlot {
    let Some(tag) = record.schedule_type.as_deref() else {
        return PtSlot::Inside;
    };
    match tag.trim().to_ascii_lowercase().as_str() {
        "outside" => PtSlot::Outside,
        "weekend" | "holiday" => PtSlot::WeekendHoliday,
        _ => PtSlot::Inside,
    }
}

/// Personal blocks carry the same inside/outside tag as PT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PersonalSlot {
    Inside,
    Outside,
}

pub(crate) fn personal_slot(record: &ScheduleRecord) -> PersonalSlot {
    match record.schedule_type.as_deref().map(str::trim) {
        Some(tag) if tag.eq_ignore_ascii_case("outside") => PersonalSlot::Outside,
        _ => PersonalSlot::Inside,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConsultingKind {
    Sales,
    Info,
    Status,
    Other,
}

/// Substring patterns (Korean and English synonyms) matched against
/// `sub_type` then `title`, lower-cased.
const CONSULTING_PATTERNS: &[(ConsultingKind, &[&str])] = &[
    (ConsultingKind::Sales, &["sales", "세일즈"]),
    (ConsultingKind::Info, &["info", "안내"]),
    (ConsultingKind::Status, &["status", "현황"]),
];

pub(crate) fn consulting_kind(record: &ScheduleRecord) -> ConsultingKind {
    match_patterns(record, CONSULTING_PATTERNS).unwrap_or(ConsultingKind::Other)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PersonalKind {
    Meal,
    Conference,
    Meeting,
    Rest,
    Workout,
    Other,
}

const PERSONAL_PATTERNS: &[(PersonalKind, &[&str])] = &[
    (PersonalKind::Meal, &["meal", "식사", "점심"]),
    (PersonalKind::Conference, &["conference", "회의"]),
    (PersonalKind::Meeting, &["meeting", "미팅"]),
    (PersonalKind::Rest, &["rest", "휴식", "휴게"]),
    (PersonalKind::Workout, &["workout", "운동", "헬스"]),
];

pub(crate) fn personal_kind(record: &ScheduleRecord) -> PersonalKind {
    match_patterns(record, PERSONAL_PATTERNS).unwrap_or(PersonalKind::Other)
}

/// First table entry whose pattern occurs in `sub_type`, then `title`.
fn match_patterns<K: Copy>(record: &ScheduleRecord, table: &[(K, &[&str])]) -> Option<K> {
    for text in [record.sub_type.as_deref(), record.title.as_deref()]
        .into_iter()
        .flatten()
    {
        let haystack = text.to_lowercase();
        for (kind, patterns) in table {
            if patterns.iter().any(|p| haystack.contains(p)) {
                return Some(*kind);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::ScheduleKind;

    fn record_with_text(sub_type: Option<&str>, title: Option<&str>) -> ScheduleRecord {
        let mut rec = crate::engine::types::test_record();
        rec.kind = ScheduleKind::Consulting;
        rec.sub_type = sub_type.map(str::to_string);
        rec.title = title.map(str::to_string);
        rec
    }

    #[test]
    fn chargeable_statuses() {
        assert!(is_chargeable(ScheduleStatus::Completed));
        assert!(is_chargeable(ScheduleStatus::NoShowDeducted));
        assert!(!is_chargeable(ScheduleStatus::Service));
        assert!(!is_chargeable(ScheduleStatus::NoShow));
        assert!(!is_chargeable(ScheduleStatus::Cancelled));
        assert!(!is_chargeable(ScheduleStatus::Converted));
        assert!(!is_chargeable(ScheduleStatus::Unregistered));
        assert!(!is_chargeable(ScheduleStatus::Unknown));
    }

    #[test]
    fn reportable_is_chargeable_plus_service() {
        assert!(is_reportable(ScheduleStatus::Completed));
        assert!(is_reportable(ScheduleStatus::NoShowDeducted));
        assert!(is_reportable(ScheduleStatus::Service));
        assert!(!is_reportable(ScheduleStatus::NoShow));
        assert!(!is_reportable(ScheduleStatus::Cancelled));
        assert!(!is_reportable(ScheduleStatus::Unregistered));
        assert!(!is_reportable(ScheduleStatus::Unknown));
    }

    #[test]
    fn personal_counts_regardless_of_status() {
        let mut rec = crate::engine::types::test_record();
        rec.kind = ScheduleKind::Personal;
        rec.status = ScheduleStatus::Unregistered;
        assert!(counts_in_report(&rec));
        rec.status = ScheduleStatus::Cancelled;
        assert!(counts_in_report(&rec));
    }

    #[test]
    fn report_gate_for_member_sessions() {
        let mut rec = crate::engine::types::test_record();
        rec.status = ScheduleStatus::Service;
        assert!(counts_in_report(&rec));
        rec.status = ScheduleStatus::NoShow;
        assert!(!counts_in_report(&rec));
        rec.status = ScheduleStatus::Unregistered;
        assert!(!counts_in_report(&rec));
    }

    #[test]
    fn pt_slot_from_schedule_type() {
        let mut rec = crate::engine::types::test_record();
        rec.schedule_type = Some("inside".to_string());
        assert_eq!(pt_slot(&rec), PtSlot::Inside);
        rec.schedule_type = Some("OUTSIDE".to_string());
        assert_eq!(pt_slot(&rec), PtSlot::Outside);
        rec.schedule_type = Some("weekend".to_string());
        assert_eq!(pt_slot(&rec), PtSlot::WeekendHoliday);
        rec.schedule_type = Some("holiday".to_string());
        assert_eq!(pt_slot(&rec), PtSlot::WeekendHoliday);
    }

    #[test]
    fn pt_slot_defaults_to_inside() {
        let mut rec = crate::engine::types::test_record();
        rec.schedule_type = None;
        assert_eq!(pt_slot(&rec), PtSlot::Inside);
        rec.schedule_type = Some("rooftop".to_string());
        assert_eq!(pt_slot(&rec), PtSlot::Inside);
    }

    #[test]
    fn personal_slot_outside_only_on_tag() {
        let mut rec = crate::engine::types::test_record();
        rec.schedule_type = Some("outside".to_string());
        assert_eq!(personal_slot(&rec), PersonalSlot::Outside);
        rec.schedule_type = None;
        assert_eq!(personal_slot(&rec), PersonalSlot::Inside);
    }

    #[test]
    fn consulting_patterns_english_and_korean() {
        assert_eq!(
            consulting_kind(&record_with_text(Some("sales call"), None)),
            ConsultingKind::Sales
        );
        assert_eq!(
            consulting_kind(&record_with_text(Some("세일즈 미팅"), None)),
            ConsultingKind::Sales
        );
        assert_eq!(
            consulting_kind(&record_with_text(None, Some("신규 안내"))),
            ConsultingKind::Info
        );
        assert_eq!(
            consulting_kind(&record_with_text(Some("회원 현황 보고"), None)),
            ConsultingKind::Status
        );
    }

    #[test]
    fn consulting_title_used_when_sub_type_misses() {
        assert_eq!(
            consulting_kind(&record_with_text(Some("misc"), Some("INFO session"))),
            ConsultingKind::Info
        );
    }

    #[test]
    fn consulting_defaults_to_other() {
        assert_eq!(
            consulting_kind(&record_with_text(None, None)),
            ConsultingKind::Other
        );
        assert_eq!(
            consulting_kind(&record_with_text(Some("follow-up"), Some("catch up"))),
            ConsultingKind::Other
        );
    }

    #[test]
    fn personal_patterns() {
        assert_eq!(
            personal_kind(&record_with_text(Some("점심"), None)),
            PersonalKind::Meal
        );
        assert_eq!(
            personal_kind(&record_with_text(None, Some("주간 회의"))),
            PersonalKind::Conference
        );
        assert_eq!(
            personal_kind(&record_with_text(Some("고객 미팅"), None)),
            PersonalKind::Meeting
        );
        assert_eq!(
            personal_kind(&record_with_text(Some("휴게"), None)),
            PersonalKind::Rest
        );
        assert_eq!(
            personal_kind(&record_with_text(None, Some("헬스"))),
            PersonalKind::Workout
        );
        assert_eq!(
            personal_kind(&record_with_text(Some("은행"), None)),
            PersonalKind::Other
        );
    }

    #[test]
    fn pattern_matching_is_case_insensitive() {
        assert_eq!(
            personal_kind(&record_with_text(Some("Team MEAL"), None)),
            PersonalKind::Meal
        );
        assert_eq!(
            consulting_kind(&record_with_text(None, Some("Sales pitch"))),
            ConsultingKind::Sales
        );
    }
}
