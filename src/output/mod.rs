mod format;
mod json;
mod sessions;
mod table;
mod worklist;

pub(crate) use json::{output_daily_json, output_monthly_json};
pub(crate) use sessions::{output_sessions_json, print_sessions_table};
pub(crate) use table::{
    SummaryOptions, TableOptions, print_daily_table, print_monthly_table, print_summary_line,
};
pub(crate) use worklist::{output_worklist_json, print_worklist_table};
