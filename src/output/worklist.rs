use crate::engine::EnrichedSchedule;
use crate::output::format::{base_table, header_cell, right_cell, session_label};
use crate::output::table::TableOptions;

/// Quick-attendance worklist: the month's sessions still waiting for an
/// outcome, for operators to chase.
pub(crate) fn print_worklist_table(entries: &[EnrichedSchedule], month: &str, opts: TableOptions) {
    if entries.is_empty() {
        println!("No unregistered sessions in {month}.");
        return;
    }
    let c = opts.use_color;
    println!("\n  Unregistered sessions in {month}\n");

    let mut table = base_table();
    table.set_header(vec![
        header_cell("Date", c),
        header_cell("Time", c),
        header_cell("Member", c),
        header_cell("Staff", c),
        header_cell("Kind", c),
        header_cell("Session", c),
        header_cell("Title", c),
    ]);

    for entry in entries {
        let rec = &entry.record;
        table.add_row(vec![
            comfy_table::Cell::new(&rec.date_str),
            comfy_table::Cell::new(&rec.time_str),
            comfy_table::Cell::new(rec.member_id.as_deref().unwrap_or("-")),
            comfy_table::Cell::new(&rec.staff_id),
            comfy_table::Cell::new(rec.kind.label()),
            right_cell(&session_label(entry), None, false),
            comfy_table::Cell::new(rec.title.as_deref().unwrap_or("")),
        ]);
    }

    println!("{table}");
    println!("\n  {} sessions awaiting registration\n", entries.len());
}

pub(crate) fn output_worklist_json(entries: &[EnrichedSchedule]) -> String {
    serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string())
}
