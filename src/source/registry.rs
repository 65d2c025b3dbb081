//! Schedule source registry
//!
//! Manages all available sources and provides lookup by name/alias.

use std::sync::LazyLock;

use super::export::ExportSource;
use super::feed::FeedSource;
use super::{BoxedSource, Source};

/// All registered schedule sources
static SOURCES: LazyLock<Vec<BoxedSource>> = LazyLock::new(|| {
    vec![
        Box::new(ExportSource::new()),
        Box::new(FeedSource::new()),
        // Add new sources here:
        // Box::new(CsvBackupSource::new()),
    ]
});

/// Get a source by name or alias
pub(crate) fn get_source(name: &str) -> Option<&'static dyn Source> {
    let name_lower = name.to_lowercase();
    SOURCES.iter().find_map(|s: &BoxedSource| {
        if s.name() == name_lower || s.aliases().contains(&name_lower.as_str()) {
            Some(s.as_ref())
        } else {
            None
        }
    })
}
