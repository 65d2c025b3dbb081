use chrono::offset::Offset;
use chrono::{DateTime, FixedOffset, Local, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::consts::{DATE_FORMAT, TIME_FORMAT};
use crate::error::AppError;

/// Gym-local timezone used to bucket sessions by calendar day.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    pub(crate) fn to_fixed_offset(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
            Timezone::Named(tz) => {
                let local = utc.with_timezone(&tz);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
        }
    }

    /// Local calendar date and clock time for a UTC instant, as the
    /// engine's `date_str`/`time_str` pair.
    pub(crate) fn split_local(self, utc: DateTime<Utc>) -> (String, String) {
        let local = self.to_fixed_offset(utc);
        (
            local.format(DATE_FORMAT).to_string(),
            local.format(TIME_FORMAT).to_string(),
        )
    }

    /// Today's local calendar date.
    pub(crate) fn today_str(self) -> String {
        self.to_fixed_offset(Utc::now())
            .format(DATE_FORMAT)
            .to_string()
    }
}
