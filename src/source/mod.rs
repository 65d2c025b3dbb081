//! Schedule record source abstraction layer
//!
//! Each backend export format implements the Source trait to provide a
//! unified interface for discovering and parsing schedule files.

pub(crate) mod dedup;
pub(crate) mod export;
pub(crate) mod feed;
pub(crate) mod loader;
pub(crate) mod registry;
pub(crate) mod row;

use std::path::{Path, PathBuf};

use crate::utils::Timezone;

use row::ParsedBatch;

/// Capabilities that a schedule source may have
#[derive(Debug, Clone, Default)]
pub(crate) struct Capabilities {
    /// The same schedule id appears once per mutation and must be
    /// collapsed to its latest state
    pub(crate) needs_dedup: bool,
}

/// Schedule source trait - implemented by each export format
pub(crate) trait Source: Send + Sync {
    /// Unique name for this source (used with --source)
    fn name(&self) -> &'static str;

    /// Display name for output
    fn display_name(&self) -> &'static str {
        self.name()
    }

    /// Short aliases for CLI (e.g., "ex" for "export")
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Capabilities of this source
    fn capabilities(&self) -> Capabilities;

    /// Find all data files for this source under the data directory
    fn find_files(&self, data_dir: &Path) -> Vec<PathBuf>;

    /// Parse a single file into schedule rows
    fn parse_file(&self, path: &PathBuf, timezone: &Timezone) -> ParsedBatch;
}

/// Box type for dynamic dispatch
pub(crate) type BoxedSource = Box<dyn Source>;

// Re-export registry and loader entry points
pub(crate) use loader::{LoadResult, load_schedules};
pub(crate) use registry::get_source;

/// Resolve the schedule data directory: environment override first, then
/// the CLI flag (already merged with config), then the default under the
/// home directory.
pub(crate) fn resolve_data_dir(cli_dir: Option<&str>) -> PathBuf {
    if let Ok(dir) = std::env::var("GYMSTATS_DATA_DIR")
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }
    if let Some(dir) = cli_dir {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".gymstats")
}
