/// Standard date format used throughout the codebase: "2026-03-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Clock time shown in listings: "10:30"
pub(crate) const TIME_FORMAT: &str = "%H:%M";

/// Fallback value when a staff id or member name is unavailable
pub(crate) const UNKNOWN: &str = "unknown";
