//! Latest-state collapse for the audit feed
//!
//! The feed carries one line per schedule mutation, so the same id shows
//! up once per status transition. We keep the entry with the greatest
//! update timestamp; on a timestamp tie an entry with a recorded status
//! wins over one still unregistered.

use std::collections::HashMap;

use crate::engine::ScheduleStatus;
use crate::source::row::ParsedRow;

/// Trait for rows that can be collapsed to their latest state
pub(crate) trait Deduplicatable {
    fn updated_ms(&self) -> i64;
    fn has_status(&self) -> bool;
    fn dedup_id(&self) -> &str;
}

impl Deduplicatable for ParsedRow {
    fn updated_ms(&self) -> i64 {
        self.updated_ms
    }

    fn has_status(&self) -> bool {
        self.record.status != ScheduleStatus::Unregistered
    }

    fn dedup_id(&self) -> &str {
        &self.record.id
    }
}

/// Current best candidate for a schedule id
#[derive(Debug, Clone)]
struct CandidateState<T: Deduplicatable> {
    best: T,
}

impl<T: Deduplicatable> CandidateState<T> {
    fn new(entry: T) -> Self {
        Self { best: entry }
    }

    fn update(&mut self, entry: T) {
        let newer = entry.updated_ms() > self.best.updated_ms();
        let same_but_registered = entry.updated_ms() == self.best.updated_ms()
            && entry.has_status()
            && !self.best.has_status();
        if newer || same_but_registered {
            self.best = entry;
        }
    }
}

/// Incremental dedup accumulator for chunked/parallel loading.
#[derive(Debug)]
pub(crate) struct DedupAccumulator<T: Deduplicatable> {
    states: HashMap<String, CandidateState<T>>,
    total: i64,
}

impl<T: Deduplicatable> Default for DedupAccumulator<T> {
    fn default() -> Self {
        Self {
            states: HashMap::new(),
            total: 0,
        }
    }
}

impl<T: Deduplicatable> DedupAccumulator<T> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: T) {
        self.total += 1;
        let id = entry.dedup_id().to_string();
        match self.states.get_mut(&id) {
            Some(state) => state.update(entry),
            None => {
                self.states.insert(id, CandidateState::new(entry));
            }
        }
    }

    pub(crate) fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = T>,
    {
        for entry in entries {
            self.push(entry);
        }
    }

    pub(crate) fn merge(&mut self, other: DedupAccumulator<T>) {
        self.total += other.total;
        for (id, state) in other.states {
            match self.states.get_mut(&id) {
                Some(existing) => existing.update(state.best),
                None => {
                    self.states.insert(id, state);
                }
            }
        }
    }

    /// Collapse to one entry per id. Returns the survivors and the count
    /// of superseded mutations.
    pub(crate) fn finalize(self) -> (Vec<T>, i64) {
        let unique = self.states.len() as i64;
        let collapsed = (self.total - unique).max(0);
        let result: Vec<T> = self.states.into_values().map(|s| s.best).collect();
        (result, collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct TestEntry {
        id: String,
        ts: i64,
        registered: bool,
        value: i32,
    }

    impl TestEntry {
        fn new(id: &str, ts: i64, registered: bool, value: i32) -> Self {
            Self {
                id: id.to_string(),
                ts,
                registered,
                value,
            }
        }
    }

    impl Deduplicatable for TestEntry {
        fn updated_ms(&self) -> i64 {
            self.ts
        }
        fn has_status(&self) -> bool {
            self.registered
        }
        fn dedup_id(&self) -> &str {
            &self.id
        }
    }

    fn collapse(entries: Vec<TestEntry>) -> (Vec<TestEntry>, i64) {
        let mut acc = DedupAccumulator::new();
        acc.extend(entries);
        acc.finalize()
    }

    #[test]
    fn latest_mutation_wins() {
        let (result, collapsed) = collapse(vec![
            TestEntry::new("s1", 100, false, 1),
            TestEntry::new("s1", 300, true, 3),
            TestEntry::new("s1", 200, true, 2),
        ]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].value, 3);
        assert_eq!(collapsed, 2);
    }

    #[test]
    fn registered_wins_timestamp_tie() {
        let (result, _) = collapse(vec![
            TestEntry::new("s1", 100, false, 1),
            TestEntry::new("s1", 100, true, 2),
        ]);
        assert_eq!(result[0].value, 2);
    }

    #[test]
    fn registered_not_replaced_by_tied_unregistered() {
        let (result, _) = collapse(vec![
            TestEntry::new("s1", 100, true, 1),
            TestEntry::new("s1", 100, false, 2),
        ]);
        assert_eq!(result[0].value, 1);
    }

    #[test]
    fn distinct_ids_all_survive() {
        let (mut result, collapsed) = collapse(vec![
            TestEntry::new("a", 100, true, 1),
            TestEntry::new("b", 200, false, 2),
            TestEntry::new("c", 300, true, 3),
        ]);
        result.sort_by_key(|e| e.value);
        assert_eq!(result.len(), 3);
        assert_eq!(collapsed, 0);
    }

    #[test]
    fn empty_input() {
        let (result, collapsed) = collapse(vec![]);
        assert!(result.is_empty());
        assert_eq!(collapsed, 0);
    }

    #[test]
    fn merge_combines_chunks() {
        let mut left = DedupAccumulator::new();
        left.extend(vec![
            TestEntry::new("s1", 100, false, 1),
            TestEntry::new("s2", 100, true, 10),
        ]);

        let mut right = DedupAccumulator::new();
        right.extend(vec![
            TestEntry::new("s1", 200, true, 2),
            TestEntry::new("s2", 50, false, 11),
        ]);

        left.merge(right);
        let (mut result, collapsed) = left.finalize();
        result.sort_by_key(|e| e.value);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].value, 2); // s1: newer mutation from right chunk
        assert_eq!(result[1].value, 10); // s2: right chunk entry is older
        assert_eq!(collapsed, 2);
    }
}
