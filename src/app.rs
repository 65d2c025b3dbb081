use std::path::Path;

use crate::cli::{Cli, Commands};
use crate::engine::{EnrichedSchedule, MonthlyReport, YearMonth, aggregate, enrich};
use crate::members::MemberDb;
use crate::output::{
    SummaryOptions, TableOptions, output_daily_json, output_monthly_json, output_sessions_json,
    output_worklist_json, print_daily_table, print_monthly_table, print_sessions_table,
    print_summary_line, print_worklist_table,
};
use crate::source::{LoadResult, Source, load_schedules};
use crate::utils::Timezone;

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) month: YearMonth,
    pub(crate) timezone: Timezone,
    pub(crate) member_db: &'a MemberDb,
    pub(crate) data_dir: &'a Path,
    /// Normalized YYYY-MM-DD bounds for the session listing
    pub(crate) since: Option<String>,
    pub(crate) until: Option<String>,
}

impl CommandContext<'_> {
    fn table_options(&self) -> TableOptions {
        TableOptions {
            order: self.cli.order,
            use_color: self.cli.use_color(),
            compact: self.cli.compact,
            breakdown: self.cli.breakdown,
        }
    }
}

/// Load the full window and enrich it, then narrow to the staff scope.
/// Ordinals are computed before any filtering so a member's numbering
/// never depends on which staff view is open.
fn load_enriched(source: &dyn Source, ctx: &CommandContext<'_>) -> (Vec<EnrichedSchedule>, LoadResult) {
    let mut result = load_schedules(source, ctx.data_dir, ctx.timezone, false);
    let records = std::mem::take(&mut result.records);
    let enriched = enrich(records, ctx.member_db);

    let scoped = match ctx.cli.staff.as_deref() {
        Some(staff_id) => enriched
            .into_iter()
            .filter(|e| e.record.staff_id == staff_id)
            .collect(),
        None => enriched,
    };
    (scoped, result)
}

fn aggregate_month(enriched: &[EnrichedSchedule], ctx: &CommandContext<'_>) -> MonthlyReport {
    let report = aggregate(enriched, ctx.month);
    if !report.clamped_ids.is_empty() {
        eprintln!(
            "Warning: clamped negative duration on {} record(s): {}",
            report.clamped_ids.len(),
            report.clamped_ids.join(", ")
        );
    }
    report
}

fn handle_monthly(source: &dyn Source, ctx: &CommandContext<'_>) {
    let (enriched, load) = load_enriched(source, ctx);
    if enriched.is_empty() {
        println!("No {} data found.", source.display_name());
        return;
    }
    let report = aggregate_month(&enriched, ctx);
    if ctx.cli.json {
        println!("{}", output_monthly_json(&report.stats));
    } else {
        print_monthly_table(&report.stats, ctx.table_options());
        print_summary_line(
            SummaryOptions {
                skipped: load.skipped,
                valid: load.valid,
                elapsed_ms: Some(load.elapsed_ms),
            },
            ctx.cli.use_color(),
        );
    }
}

fn handle_daily(source: &dyn Source, ctx: &CommandContext<'_>) {
    let (enriched, _) = load_enriched(source, ctx);
    if enriched.is_empty() {
        println!("No {} data found.", source.display_name());
        return;
    }
    let report = aggregate_month(&enriched, ctx);
    if ctx.cli.json {
        println!("{}", output_daily_json(&report.stats, ctx.cli.order));
    } else {
        print_daily_table(&report.stats, ctx.table_options());
    }
}

fn handle_sessions(source: &dyn Source, ctx: &CommandContext<'_>) {
    let (enriched, _) = load_enriched(source, ctx);

    let sessions: Vec<EnrichedSchedule> = enriched
        .into_iter()
        .filter(|e| match ctx.cli.member.as_deref() {
            Some(member_id) => e.record.member_id.as_deref() == Some(member_id),
            None => true,
        })
        .filter(|e| match ctx.since.as_deref() {
            Some(since) => e.record.date_str.as_str() >= since,
            None => true,
        })
        .filter(|e| match ctx.until.as_deref() {
            Some(until) => e.record.date_str.as_str() <= until,
            None => true,
        })
        .collect();

    if ctx.cli.json {
        println!("{}", output_sessions_json(&sessions, ctx.cli.order));
    } else {
        print_sessions_table(&sessions, ctx.table_options());
    }
}

fn handle_worklist(source: &dyn Source, ctx: &CommandContext<'_>) {
    let (enriched, _) = load_enriched(source, ctx);
    let report = aggregate_month(&enriched, ctx);
    let worklist = &report.stats.unregistered_list;
    if ctx.cli.json {
        println!("{}", output_worklist_json(worklist));
    } else {
        print_worklist_table(worklist, &report.stats.month, ctx.table_options());
    }
}

/// Dispatch a command against the selected schedule source
pub(crate) fn run_command(source: &dyn Source, command: Commands, ctx: &CommandContext<'_>) {
    match command {
        Commands::Monthly => handle_monthly(source, ctx),
        Commands::Daily => handle_daily(source, ctx),
        Commands::Sessions | Commands::Today => handle_sessions(source, ctx),
        Commands::Worklist => handle_worklist(source, ctx),
    }
}
