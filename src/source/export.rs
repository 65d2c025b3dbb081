//! Backend collection export source
//!
//! Parses JSON array files (one per fetch window) from
//! `<data_dir>/schedules/`. Each element is one schedule record in its
//! final state, so no dedup is needed.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::source::row::{ParsedBatch, RawScheduleRow};
use crate::source::{Capabilities, Source};
use crate::utils::{Timezone, load_debug_enabled};

/// JSON collection export source
pub(crate) struct ExportSource;

impl ExportSource {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl Default for ExportSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Source for ExportSource {
    fn name(&self) -> &'static str {
        "export"
    }

    fn display_name(&self) -> &'static str {
        "schedule export"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["ex"]
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities { needs_dedup: false }
    }

    fn find_files(&self, data_dir: &Path) -> Vec<PathBuf> {
        let pattern = format!("{}/schedules/**/*.json", data_dir.display());
        let mut files = Vec::new();
        if let Ok(entries) = glob::glob(&pattern) {
            for entry in entries.flatten() {
                files.push(entry);
            }
        }
        files
    }

    fn parse_file(&self, path: &PathBuf, timezone: &Timezone) -> ParsedBatch {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(err) => {
                if load_debug_enabled() {
                    eprintln!("Failed to open {}: {}", path.display(), err);
                }
                return ParsedBatch::default();
            }
        };

        // Rows are decoded individually so one malformed record never
        // fails the whole export file.
        let values: Vec<serde_json::Value> = match serde_json::from_reader(file) {
            Ok(values) => values,
            Err(err) => {
                if load_debug_enabled() {
                    eprintln!("Invalid JSON in {}: {}", path.display(), err);
                }
                return ParsedBatch::default();
            }
        };

        let mut batch = ParsedBatch::default();
        for (row_no, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<RawScheduleRow>(value) {
                Ok(row) => {
                    let parsed = row.into_row(timezone);
                    if parsed.is_none() && load_debug_enabled() {
                        eprintln!(
                            "Dropped record {} in {} (missing id or bad timestamps)",
                            row_no + 1,
                            path.display()
                        );
                    }
                    batch.push(parsed);
                }
                Err(err) => {
                    if load_debug_enabled() {
                        eprintln!(
                            "Invalid record {} in {}: {}",
                            row_no + 1,
                            path.display(),
                            err
                        );
                    }
                    batch.skipped += 1;
                }
            }
        }
        batch
    }
}
