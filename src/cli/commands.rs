//! CLI subcommand definitions

use clap::Subcommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub(crate) enum Commands {
    /// Monthly schedule report (default)
    Monthly,
    /// Daily breakdown for the month
    Daily,
    /// Session listing with per-member ordinals
    Sessions,
    /// Unregistered sessions awaiting outcome registration
    Worklist,
    /// Today's session listing
    Today,
}

impl Commands {
    /// Commands that narrow the session listing to today's date
    pub(crate) fn needs_today_filter(self) -> bool {
        matches!(self, Commands::Today)
    }
}
