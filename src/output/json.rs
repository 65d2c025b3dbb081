use crate::cli::SortOrder;
use crate::engine::MonthlyStats;

/// Full monthly aggregate as consumed by the reporting UI and the payroll
/// rule engine.
pub(crate) fn output_monthly_json(stats: &MonthlyStats) -> String {
    serde_json::to_string_pretty(stats).unwrap_or_else(|_| "{}".to_string())
}

/// Daily buckets as a date-sorted array.
pub(crate) fn output_daily_json(stats: &MonthlyStats, order: SortOrder) -> String {
    let mut days: Vec<serde_json::Value> = stats
        .daily
        .iter()
        .map(|(date, bucket)| {
            let mut value = serde_json::to_value(bucket).unwrap_or_default();
            if let Some(map) = value.as_object_mut() {
                map.insert("date".to_string(), serde_json::json!(date));
            }
            value
        })
        .collect();
    if matches!(order, SortOrder::Desc) {
        days.reverse();
    }
    serde_json::to_string_pretty(&days).unwrap_or_else(|_| "[]".to_string())
}
