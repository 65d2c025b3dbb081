use comfy_table::Color;

use crate::cli::SortOrder;
use crate::engine::{DayBucket, MonthlyStats};
use crate::output::format::{base_table, format_hours, format_rate, header_cell, right_cell};

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions {
    pub(crate) order: SortOrder,
    pub(crate) use_color: bool,
    pub(crate) compact: bool,
    pub(crate) breakdown: bool,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SummaryOptions {
    pub(crate) skipped: i64,
    pub(crate) valid: i64,
    pub(crate) elapsed_ms: Option<f64>,
}

/// Print the summary line with optional timing
pub(crate) fn print_summary_line(opts: SummaryOptions, use_color: bool) {
    let stats_text = format!(
        "{} schedule records loaded ({} malformed dropped)",
        opts.valid, opts.skipped
    );

    if let Some(ms) = opts.elapsed_ms {
        if use_color {
            println!("\n  {} | \x1b[36m{:.0}ms\x1b[0m\n", stats_text, ms);
        } else {
            println!("\n  {} | {:.0}ms\n", stats_text, ms);
        }
    } else {
        println!("\n  {}\n", stats_text);
    }
}

/// Hours per modality come from the daily buckets; the monthly aggregate
/// only carries the grand total.
fn modality_hours(stats: &MonthlyStats) -> [f64; 6] {
    let mut hours = [0.0; 6];
    for day in stats.daily.values() {
        hours[0] += day.pt.hours;
        hours[1] += day.ot.hours;
        hours[2] += day.consulting.hours;
        hours[3] += day.gx.hours;
        hours[4] += day.personal.hours;
        hours[5] += day.other.hours;
    }
    hours
}

pub(crate) fn print_monthly_table(stats: &MonthlyStats, opts: TableOptions) {
    let c = opts.use_color;
    println!("\n  Schedule report for {}\n", stats.month);

    let mut table = base_table();
    let mut header = vec![
        header_cell("Category", c),
        header_cell("Sessions", c),
        header_cell("Hours", c),
    ];
    if opts.breakdown && !opts.compact {
        header.push(header_cell("Breakdown", c));
    }
    table.set_header(header);

    let hours = modality_hours(stats);
    let pt_breakdown = format!(
        "inside {} | outside {} | wknd/hol {} | service {}",
        stats.pt_stats.inside,
        stats.pt_stats.outside,
        stats.pt_stats.weekend_holiday,
        stats.pt_stats.service
    );
    let ot_breakdown = format!(
        "ot {} | inbody {}",
        stats.ot_stats.ot, stats.ot_stats.inbody
    );
    let consulting_breakdown = format!(
        "sales {} | info {} | status {} | other {}",
        stats.consulting_stats.sales,
        stats.consulting_stats.info,
        stats.consulting_stats.status,
        stats.consulting_stats.other
    );
    let personal_breakdown = format!(
        "meal {} | conf {} | meeting {} | rest {} | workout {} | other {}",
        stats.personal_stats.meal,
        stats.personal_stats.conference,
        stats.personal_stats.meeting,
        stats.personal_stats.rest,
        stats.personal_stats.workout,
        stats.personal_stats.other
    );

    let rows: [(&str, u32, f64, String); 6] = [
        ("PT", stats.pt, hours[0], pt_breakdown),
        ("OT", stats.ot, hours[1], ot_breakdown),
        ("Consulting", stats.consulting, hours[2], consulting_breakdown),
        ("GX", stats.gx, hours[3], String::new()),
        ("Personal", stats.personal, hours[4], personal_breakdown),
        ("Other", stats.other, hours[5], String::new()),
    ];

    for (label, count, row_hours, breakdown) in rows {
        let mut row = vec![
            comfy_table::Cell::new(label),
            right_cell(&count.to_string(), None, false),
            right_cell(&format_hours(row_hours), None, false),
        ];
        if opts.breakdown && !opts.compact {
            row.push(comfy_table::Cell::new(breakdown));
        }
        table.add_row(row);
    }

    let total_color = if c { Some(Color::Yellow) } else { None };
    let mut total_row = vec![
        comfy_table::Cell::new("Total").add_attribute(comfy_table::Attribute::Bold),
        right_cell(&stats.total.to_string(), total_color, true),
        right_cell(&format_hours(stats.total_hours), total_color, true),
    ];
    if opts.breakdown && !opts.compact {
        total_row.push(comfy_table::Cell::new(""));
    }
    table.add_row(total_row);

    println!("{table}");

    println!(
        "\n  completed {} | no-show deducted {} | no-show {} | service {}",
        stats.completed, stats.no_show_deducted, stats.no_show, stats.service
    );
    println!(
        "  PT attendance {} | cancelled {}",
        format_rate(stats.pt_stats.attendance_rate),
        stats.pt_stats.cancelled
    );
    if stats.unregistered > 0 {
        println!(
            "  {} unregistered sessions (run `gymstats worklist`)",
            stats.unregistered
        );
    }
    if stats.excluded > 0 {
        println!("  {} records excluded from totals", stats.excluded);
    }
    println!();
}

fn daily_keys(stats: &MonthlyStats, order: SortOrder) -> Vec<&String> {
    let mut keys: Vec<&String> = stats.daily.keys().collect();
    if matches!(order, SortOrder::Desc) {
        keys.reverse();
    }
    keys
}

pub(crate) fn print_daily_table(stats: &MonthlyStats, opts: TableOptions) {
    let c = opts.use_color;
    println!("\n  Daily breakdown for {}\n", stats.month);

    let mut table = base_table();
    let mut header = vec![header_cell("Date", c)];
    if !opts.compact {
        header.extend([
            header_cell("PT", c),
            header_cell("OT", c),
            header_cell("Cons", c),
            header_cell("GX", c),
            header_cell("Personal", c),
            header_cell("Other", c),
        ]);
        if opts.breakdown {
            header.push(header_cell("PT in/out/wh", c));
        }
    }
    header.extend([header_cell("Total", c), header_cell("Hours", c)]);
    table.set_header(header);

    for date in daily_keys(stats, opts.order) {
        let day: &DayBucket = &stats.daily[date];
        let mut row = vec![comfy_table::Cell::new(date)];
        if !opts.compact {
            row.extend([
                right_cell(&day.pt.count.to_string(), None, false),
                right_cell(&day.ot.count.to_string(), None, false),
                right_cell(&day.consulting.count.to_string(), None, false),
                right_cell(&day.gx.count.to_string(), None, false),
                right_cell(&day.personal.count.to_string(), None, false),
                right_cell(&day.other.count.to_string(), None, false),
            ]);
            if opts.breakdown {
                row.push(right_cell(
                    &format!(
                        "{}/{}/{}",
                        day.pt.inside, day.pt.outside, day.pt.weekend_holiday
                    ),
                    None,
                    false,
                ));
            }
        }
        row.extend([
            right_cell(&day.total.count.to_string(), None, false),
            right_cell(&format_hours(day.total.hours), None, false),
        ]);
        table.add_row(row);
    }

    let total_color = if c { Some(Color::Yellow) } else { None };
    let mut total_row = vec![comfy_table::Cell::new("Total").add_attribute(comfy_table::Attribute::Bold)];
    if !opts.compact {
        total_row.extend([
            right_cell(&stats.pt.to_string(), total_color, true),
            right_cell(&stats.ot.to_string(), total_color, true),
            right_cell(&stats.consulting.to_string(), total_color, true),
            right_cell(&stats.gx.to_string(), total_color, true),
            right_cell(&stats.personal.to_string(), total_color, true),
            right_cell(&stats.other.to_string(), total_color, true),
        ]);
        if opts.breakdown {
            total_row.push(right_cell(
                &format!(
                    "{}/{}/{}",
                    stats.pt_stats.inside, stats.pt_stats.outside, stats.pt_stats.weekend_holiday
                ),
                total_color,
                true,
            ));
        }
    }
    total_row.extend([
        right_cell(&stats.total.to_string(), total_color, true),
        right_cell(&format_hours(stats.total_hours), total_color, true),
    ]);
    table.add_row(total_row);

    println!("{table}");
    println!();
}
