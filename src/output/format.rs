use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::engine::EnrichedSchedule;

pub(super) fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell.fg(Color::Cyan)
    } else {
        cell
    }
}

pub(super) fn right_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if let Some(color) = color {
        cell = cell.fg(color);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

pub(super) fn format_hours(hours: f64) -> String {
    format!("{hours:.1}")
}

pub(super) fn format_rate(rate: u32) -> String {
    format!("{rate}%")
}

/// "7/20" for a numbered session; a leading "*" marks a session whose
/// outcome is not yet one of the chargeable statuses.
pub(super) fn session_label(entry: &EnrichedSchedule) -> String {
    let Some(number) = entry.session_number else {
        return "-".to_string();
    };
    let mark = if entry.is_not_completed { "*" } else { "" };
    match entry.total_sessions {
        Some(total) => format!("{mark}{number}/{total}"),
        None => format!("{mark}{number}"),
    }
}
