use crate::cli::SortOrder;
use crate::engine::EnrichedSchedule;
use crate::output::format::{base_table, header_cell, right_cell, session_label};
use crate::output::table::TableOptions;

/// Session listing for the scheduling view: "7/20" per member session,
/// "*" marking outcomes not yet registered as chargeable.
pub(crate) fn print_sessions_table(entries: &[EnrichedSchedule], opts: TableOptions) {
    if entries.is_empty() {
        println!("No sessions found.");
        return;
    }
    let c = opts.use_color;

    let mut table = base_table();
    let mut header = vec![
        header_cell("Date", c),
        header_cell("Time", c),
        header_cell("Member", c),
    ];
    if !opts.compact {
        header.push(header_cell("Staff", c));
    }
    header.extend([
        header_cell("Kind", c),
        header_cell("Session", c),
        header_cell("Status", c),
    ]);
    table.set_header(header);

    let ordered: Vec<&EnrichedSchedule> = match opts.order {
        SortOrder::Asc => entries.iter().collect(),
        SortOrder::Desc => entries.iter().rev().collect(),
    };

    for entry in ordered {
        let rec = &entry.record;
        let mut row = vec![
            comfy_table::Cell::new(&rec.date_str),
            comfy_table::Cell::new(&rec.time_str),
            comfy_table::Cell::new(rec.member_id.as_deref().unwrap_or("-")),
        ];
        if !opts.compact {
            row.push(comfy_table::Cell::new(&rec.staff_id));
        }
        row.extend([
            comfy_table::Cell::new(rec.kind.label()),
            right_cell(&session_label(entry), None, false),
            comfy_table::Cell::new(rec.status.label()),
        ]);
        table.add_row(row);
    }

    println!("{table}");
    println!("\n  {} sessions | * outcome not yet registered\n", entries.len());
}

pub(crate) fn output_sessions_json(entries: &[EnrichedSchedule], order: SortOrder) -> String {
    let ordered: Vec<&EnrichedSchedule> = match order {
        SortOrder::Asc => entries.iter().collect(),
        SortOrder::Desc => entries.iter().rev().collect(),
    };
    serde_json::to_string_pretty(&ordered).unwrap_or_else(|_| "[]".to_string())
}
