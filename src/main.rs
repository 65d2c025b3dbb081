mod app;
mod cli;
mod config;
mod consts;
mod engine;
mod error;
mod members;
mod output;
mod source;
mod utils;

use chrono::{Datelike, Utc};
use clap::Parser;

use app::CommandContext;
use cli::{Cli, Commands};
use config::Config;
use consts::DATE_FORMAT;
use engine::YearMonth;
use error::AppError;
use members::MemberDb;
use source::{get_source, resolve_data_dir};
use utils::{Timezone, parse_date, parse_month, set_load_debug};

fn main() {
    let cli = Cli::parse();
    let config = Config::load();
    let cli = cli.with_config(&config);
    set_load_debug(cli.debug);

    let timezone = match Timezone::parse(cli.timezone.as_deref()) {
        Ok(tz) => tz,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let month = match cli.month.as_deref() {
        Some(raw) => match parse_month(raw) {
            Ok(month) => month,
            Err(_) => {
                eprintln!(
                    "{}",
                    AppError::InvalidMonth {
                        input: raw.to_string()
                    }
                );
                std::process::exit(1);
            }
        },
        None => {
            let today = timezone.to_fixed_offset(Utc::now());
            YearMonth::new(today.year(), today.month())
        }
    };

    let parse_bound = |raw: Option<&str>| -> Option<String> {
        let raw = raw?;
        match parse_date(raw) {
            Ok(date) => Some(date.format(DATE_FORMAT).to_string()),
            Err(_) => {
                eprintln!(
                    "{}",
                    AppError::InvalidDate {
                        input: raw.to_string()
                    }
                );
                std::process::exit(1);
            }
        }
    };
    let mut since = parse_bound(cli.since.as_deref());
    let mut until = parse_bound(cli.until.as_deref());

    let command = cli.command.unwrap_or(Commands::Monthly);
    if command.needs_today_filter() {
        let today = timezone.today_str();
        since = Some(today.clone());
        until = Some(today);
    }

    let Some(schedule_source) = get_source(&cli.source) else {
        eprintln!(
            "{}",
            AppError::UnknownSource {
                input: cli.source.clone()
            }
        );
        std::process::exit(1);
    };

    let data_dir = resolve_data_dir(cli.data_dir.as_deref());
    let member_db = MemberDb::load(config.members_endpoint().as_deref(), cli.offline);

    let ctx = CommandContext {
        cli: &cli,
        month,
        timezone,
        member_db: &member_db,
        data_dir: &data_dir,
        since,
        until,
    };
    app::run_command(schedule_source, command, &ctx);
}
