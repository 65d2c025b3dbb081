//! Session ordinal assignment
//!
//! Walks each member's PT/OT history in start-time order and numbers the
//! chargeable sessions. Runs over the full loaded window, never a single
//! month, so ordinals stay stable across month boundaries.

use std::collections::HashMap;

use crate::engine::classify::is_chargeable;
use crate::engine::types::{EnrichedSchedule, ScheduleKind, ScheduleRecord};
use crate::members::MemberDb;

/// Assign session ordinals and membership totals. Input order is preserved;
/// records without a member id (or outside PT/OT) keep `session_number`
/// unset. Ties on `start_time` break on ascending record id so re-fetches
/// produce identical numbering regardless of input order.
pub(crate) fn enrich(records: Vec<ScheduleRecord>, members: &MemberDb) -> Vec<EnrichedSchedule> {
    let mut enriched: Vec<EnrichedSchedule> = records
        .into_iter()
        .map(|record| EnrichedSchedule {
            is_not_completed: !is_chargeable(record.status),
            session_number: None,
            total_sessions: None,
            record,
        })
        .collect();

    let mut groups: HashMap<(&str, ScheduleKind), Vec<usize>> = HashMap::new();
    for (idx, entry) in enriched.iter().enumerate() {
        if !matches!(entry.record.kind, ScheduleKind::Pt | ScheduleKind::Ot) {
            continue;
        }
        let Some(member_id) = entry.record.member_id.as_deref() else {
            continue;
        };
        groups
            .entry((member_id, entry.record.kind))
            .or_default()
            .push(idx);
    }

    let numbered: Vec<(usize, Option<u32>, bool, Option<u32>)> = groups
        .into_iter()
        .flat_map(|((member_id, kind), mut indices)| {
            indices.sort_by(|&a, &b| {
                let ra = &enriched[a].record;
                let rb = &enriched[b].record;
                ra.start_ms.cmp(&rb.start_ms).then_with(|| ra.id.cmp(&rb.id))
            });

            let total_sessions = members.total_sessions(member_id, kind);
            let mut counter = 0u32;
            indices
                .into_iter()
                .map(|idx| {
                    if is_chargeable(enriched[idx].record.status) {
                        counter += 1;
                        (idx, Some(counter), false, total_sessions)
                    } else {
                        // Ordinal this session would occupy once completed
                        (idx, Some(counter + 1), true, total_sessions)
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect();

    for (idx, session_number, is_not_completed, total_sessions) in numbered {
        let entry = &mut enriched[idx];
        entry.session_number = session_number;
        entry.is_not_completed = is_not_completed;
        entry.total_sessions = total_sessions;
    }

    enriched
}
