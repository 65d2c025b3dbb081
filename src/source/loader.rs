//! Unified schedule loader for all sources
//!
//! Discovers and parses export files in parallel, collapses feed
//! mutations, and hands the engine one deterministically ordered window
//! of records.

use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

use crate::engine::ScheduleRecord;
use crate::source::Source;
use crate::source::dedup::DedupAccumulator;
use crate::source::row::{ParsedBatch, ParsedRow};
use crate::utils::{Timezone, load_debug_enabled};

/// Loading result with integrity counters
#[derive(Debug, Default)]
pub(crate) struct LoadResult {
    pub(crate) records: Vec<ScheduleRecord>,
    /// Rows dropped for missing ids or unparseable timestamps
    pub(crate) skipped: i64,
    /// Superseded feed mutations collapsed away
    pub(crate) collapsed: i64,
    pub(crate) valid: i64,
    /// Processing time in milliseconds
    pub(crate) elapsed_ms: f64,
}

struct DataLoader<'a> {
    source: &'a dyn Source,
    quiet: bool,
}

impl<'a> DataLoader<'a> {
    fn new(source: &'a dyn Source, quiet: bool) -> Self {
        Self { source, quiet }
    }

    /// Parallel file pipeline: discover, parse per file, reduce partials.
    fn par_process<T, F, I, R>(
        &self,
        data_dir: &Path,
        timezone: Timezone,
        per_file: F,
        init: I,
        reduce: R,
    ) -> Option<T>
    where
        T: Send,
        F: Fn(ParsedBatch) -> T + Send + Sync,
        I: Fn() -> T + Send + Sync,
        R: Fn(T, T) -> T + Send + Sync,
    {
        let discovery_start = Instant::now();
        let files = self.source.find_files(data_dir);
        let discovery_ms = discovery_start.elapsed().as_secs_f64() * 1000.0;

        if files.is_empty() {
            return None;
        }

        if !self.quiet {
            eprintln!(
                "Scanning {} {} files... ({:.2}ms)",
                files.len(),
                self.source.display_name(),
                discovery_ms
            );
        }

        let result = files
            .par_iter()
            .map(|path| per_file(self.source.parse_file(path, &timezone)))
            .reduce(&init, &reduce);

        Some(result)
    }

    fn load(&self, data_dir: &Path, timezone: Timezone) -> LoadResult {
        let load_start = Instant::now();

        let (rows, skipped, collapsed) = if self.source.capabilities().needs_dedup {
            let result = self.par_process(
                data_dir,
                timezone,
                |batch| {
                    let mut acc = DedupAccumulator::new();
                    let skipped = batch.skipped;
                    acc.extend(batch.rows);
                    (acc, skipped)
                },
                || (DedupAccumulator::new(), 0i64),
                |(mut acc, skipped), (partial, partial_skipped)| {
                    acc.merge(partial);
                    (acc, skipped + partial_skipped)
                },
            );
            match result {
                Some((acc, skipped)) => {
                    let (rows, collapsed) = acc.finalize();
                    (rows, skipped, collapsed)
                }
                None => return LoadResult::default(),
            }
        } else {
            let result = self.par_process(
                data_dir,
                timezone,
                |batch| batch,
                ParsedBatch::default,
                |mut acc, partial| {
                    acc.merge(partial);
                    acc
                },
            );
            match result {
                Some(batch) => (batch.rows, batch.skipped, 0),
                None => return LoadResult::default(),
            }
        };

        // Deterministic window order regardless of file layout
        let mut rows: Vec<ParsedRow> = rows;
        rows.sort_by(|a, b| {
            a.record
                .start_ms
                .cmp(&b.record.start_ms)
                .then_with(|| a.record.id.cmp(&b.record.id))
        });
        let records: Vec<ScheduleRecord> = rows.into_iter().map(|row| row.record).collect();
        let valid = records.len() as i64;

        let result = LoadResult {
            records,
            skipped,
            collapsed,
            valid,
            elapsed_ms: load_start.elapsed().as_secs_f64() * 1000.0,
        };

        if !self.quiet {
            if result.collapsed > 0 {
                eprintln!("Collapsed {} feed mutations", result.collapsed);
            }
            if result.skipped > 0 {
                eprintln!("Warning: dropped {} malformed records", result.skipped);
            }
        }
        if load_debug_enabled() && !self.quiet {
            eprintln!("[DEBUG] Loaded {} records, {} dropped", result.valid, result.skipped);
        }

        result
    }
}

/// Load the full schedule window for a source
pub(crate) fn load_schedules(
    source: &dyn Source,
    data_dir: &Path,
    timezone: Timezone,
    quiet: bool,
) -> LoadResult {
    let loader = DataLoader::new(source, quiet);
    loader.load(data_dir, timezone)
}
