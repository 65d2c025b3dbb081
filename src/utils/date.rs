use chrono::NaiveDate;

use crate::engine::YearMonth;

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // Try YYYYMMDD
    if s.len() == 8 {
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d") {
            return Ok(d);
        }
    }
    // Try YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    Err(format!(
        "Invalid date \"{}\" (expected YYYYMMDD or YYYY-MM-DD)",
        s
    ))
}

pub(crate) fn parse_month(s: &str) -> Result<YearMonth, String> {
    let trimmed = s.trim();
    let digits: Option<(i32, u32)> = match trimmed.len() {
        // YYYYMM
        6 => trimmed
            .get(0..4)
            .zip(trimmed.get(4..6))
            .and_then(|(y, m)| Some((y.parse().ok()?, m.parse().ok()?))),
        // YYYY-MM
        7 if trimmed.as_bytes().get(4) == Some(&b'-') => trimmed
            .get(0..4)
            .zip(trimmed.get(5..7))
            .and_then(|(y, m)| Some((y.parse().ok()?, m.parse().ok()?))),
        _ => None,
    };

    match digits {
        Some((year, month)) if (1..=12).contains(&month) => Ok(YearMonth::new(year, month)),
        _ => Err(format!(
            "Invalid month \"{}\" (expected YYYYMM or YYYY-MM)",
            s
        )),
    }
}
