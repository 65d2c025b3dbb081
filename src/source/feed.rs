//! Audit feed source
//!
//! Parses JSONL mutation logs from `<data_dir>/feed/`. Every schedule
//! change appends a line, so a schedule id appears once per status
//! transition and the loader collapses each id to its latest state.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::source::row::{ParsedBatch, RawScheduleRow};
use crate::source::{Capabilities, Source};
use crate::utils::{Timezone, load_debug_enabled};

/// JSONL audit feed source
pub(crate) struct FeedSource;

impl FeedSource {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl Default for FeedSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Source for FeedSource {
    fn name(&self) -> &'static str {
        "feed"
    }

    fn display_name(&self) -> &'static str {
        "audit feed"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["fd"]
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities { needs_dedup: true }
    }

    fn find_files(&self, data_dir: &Path) -> Vec<PathBuf> {
        let pattern = format!("{}/feed/**/*.jsonl", data_dir.display());
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
        let reader = BufReader::new(file);

        let mut batch = ParsedBatch::default();
        for (line_no, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    if load_debug_enabled() {
                        eprintln!(
                            "Failed to read line {} in {}: {}",
                            line_no + 1,
                            path.display(),
                            err
                        );
                    }
                    continue;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<RawScheduleRow>(&line) {
                Ok(row) => {
                    let parsed = row.into_row(timezone);
                    if parsed.is_none() && load_debug_enabled() {
                        eprintln!(
                            "Dropped record at {}:{} (missing id or bad timestamps)",
                            path.display(),
                            line_no + 1
                        );
                    }
                    batch.push(parsed);
                }
                Err(err) => {
                    if load_debug_enabled() {
                        eprintln!("Invalid JSON at {}:{}: {}", path.display(), line_no + 1, err);
                    }
                    batch.skipped += 1;
                }
            }
        }
        batch
    }
}
