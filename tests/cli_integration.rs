use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, content).expect("write test file");
}

fn run_gymstats(args: &[&str], data_dir: &Path) -> (bool, Vec<u8>, Vec<u8>) {
    let bin = std::env::var("CARGO_BIN_EXE_gymstats").unwrap_or_else(|_| {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("target");
        path.push("debug");
        if cfg!(windows) {
            path.push("gymstats.exe");
        } else {
            path.push("gymstats");
        }
        path.to_string_lossy().into_owned()
    });
    let mut cmd = Command::new(bin);
    cmd.args(args);
    cmd.env("GYMSTATS_DATA_DIR", data_dir);
    let output = cmd.output().expect("run gymstats");
    (output.status.success(), output.stdout, output.stderr)
}

fn schedule_row(
    id: &str,
    member: Option<&str>,
    kind: &str,
    schedule_type: Option<&str>,
    status: Option<&str>,
    start: &str,
    end: &str,
) -> Value {
    serde_json::json!({
        "id": id,
        "member_id": member,
        "staff_id": "stf_1",
        "type": kind,
        "schedule_type": schedule_type,
        "status": status,
        "start_time": start,
        "end_time": end,
    })
}

/// March window: 2 PT inside completed, 1 PT outside no_show_deducted,
/// 1 PT no_show, 1 OT, 1 personal block without status, 1 unregistered PT.
fn write_march_export(data_dir: &Path) {
    let rows = serde_json::json!([
        schedule_row("s1", Some("m1"), "PT", Some("inside"), Some("completed"),
            "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"),
        schedule_row("s2", Some("m1"), "PT", Some("inside"), Some("completed"),
            "2026-03-05T10:00:00Z", "2026-03-05T11:00:00Z"),
        schedule_row("s3", Some("m2"), "PT", Some("outside"), Some("no_show_deducted"),
            "2026-03-05T12:00:00Z", "2026-03-05T13:00:00Z"),
        schedule_row("s4", Some("m2"), "PT", Some("inside"), Some("no_show"),
            "2026-03-08T10:00:00Z", "2026-03-08T11:00:00Z"),
        schedule_row("s5", Some("m1"), "OT", None, Some("completed"),
            "2026-03-09T10:00:00Z", "2026-03-09T10:30:00Z"),
        schedule_row("s6", None, "personal", Some("inside"), None,
            "2026-03-10T12:00:00Z", "2026-03-10T13:30:00Z"),
        schedule_row("s7", Some("m1"), "PT", Some("inside"), None,
            "2026-03-12T10:00:00Z", "2026-03-12T11:00:00Z"),
    ]);
    write_file(
        &data_dir.join("schedules").join("2026-03.json"),
        &rows.to_string(),
    );
}

#[test]
fn monthly_json_aggregates_export() {
    let dir = tempfile::tempdir().unwrap();
    write_march_export(dir.path());

    let (ok, stdout, stderr) = run_gymstats(
        &["monthly", "-j", "-O", "--timezone", "UTC", "--month", "2026-03"],
        dir.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json");
    assert_eq!(json["month"].as_str(), Some("2026-03"));
    // s1, s2, s3 reportable PT; s4 no_show and s7 unregistered are not
    assert_eq!(json["pt"].as_i64(), Some(3));
    assert_eq!(json["ot"].as_i64(), Some(1));
    assert_eq!(json["personal"].as_i64(), Some(1));
    // 3 PT + 1 OT + 1 personal
    assert_eq!(json["total"].as_i64(), Some(5));
    // 3x1h PT + 0.5h OT + 1.5h personal
    assert!((json["total_hours"].as_f64().unwrap() - 5.0).abs() < 1e-9);
    assert_eq!(json["no_show"].as_i64(), Some(1));
    assert_eq!(json["unregistered"].as_i64(), Some(2));
    assert_eq!(json["pt_stats"]["inside"].as_i64(), Some(2));
    assert_eq!(json["pt_stats"]["outside"].as_i64(), Some(1));
    // (2 completed + 0 service) / 3 = 67%
    assert_eq!(json["pt_stats"]["attendance_rate"].as_i64(), Some(67));

    // cross-consistency: daily totals sum to the monthly figures
    let daily = json["daily"].as_object().expect("daily map");
    let day_total: i64 = daily
        .values()
        .map(|d| d["total"]["count"].as_i64().unwrap())
        .sum();
    let day_pt: i64 = daily
        .values()
        .map(|d| d["pt"]["count"].as_i64().unwrap())
        .sum();
    assert_eq!(day_total, json["total"].as_i64().unwrap());
    assert_eq!(day_pt, json["pt"].as_i64().unwrap());
    assert_eq!(
        daily["2026-03-10"]["personal"]["inside"].as_f64(),
        Some(1.5)
    );
}

#[test]
fn sessions_json_numbers_chargeable_history() {
    let dir = tempfile::tempdir().unwrap();
    // completed, no_show, completed: ordinals 1, 2 (pending), 2
    let rows = serde_json::json!([
        schedule_row("a", Some("m1"), "PT", Some("inside"), Some("completed"),
            "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"),
        schedule_row("b", Some("m1"), "PT", Some("inside"), Some("no_show"),
            "2026-03-04T10:00:00Z", "2026-03-04T11:00:00Z"),
        schedule_row("c", Some("m1"), "PT", Some("inside"), Some("completed"),
            "2026-03-06T10:00:00Z", "2026-03-06T11:00:00Z"),
    ]);
    write_file(
        &dir.path().join("schedules").join("m1.json"),
        &rows.to_string(),
    );

    let (ok, stdout, stderr) = run_gymstats(
        &["sessions", "-j", "-O", "--timezone", "UTC", "--member", "m1"],
        dir.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json");
    let sessions = json.as_array().expect("array");
    assert_eq!(sessions.len(), 3);
    assert_eq!(sessions[0]["session_number"].as_i64(), Some(1));
    assert_eq!(sessions[0]["is_not_completed"].as_bool(), Some(false));
    assert_eq!(sessions[1]["session_number"].as_i64(), Some(2));
    assert_eq!(sessions[1]["is_not_completed"].as_bool(), Some(true));
    assert_eq!(sessions[2]["session_number"].as_i64(), Some(2));
    assert_eq!(sessions[2]["is_not_completed"].as_bool(), Some(false));
}

#[test]
fn sessions_ordinals_span_month_boundaries() {
    let dir = tempfile::tempdir().unwrap();
    let rows = serde_json::json!([
        schedule_row("feb", Some("m1"), "PT", Some("inside"), Some("completed"),
            "2026-02-20T10:00:00Z", "2026-02-20T11:00:00Z"),
        schedule_row("mar", Some("m1"), "PT", Some("inside"), Some("completed"),
            "2026-03-03T10:00:00Z", "2026-03-03T11:00:00Z"),
    ]);
    write_file(
        &dir.path().join("schedules").join("window.json"),
        &rows.to_string(),
    );

    let (ok, stdout, _) = run_gymstats(
        &[
            "sessions", "-j", "-O", "--timezone", "UTC",
            "--since", "2026-03-01", "--until", "2026-03-31",
        ],
        dir.path(),
    );
    assert!(ok);

    let json: Value = serde_json::from_slice(&stdout).expect("json");
    let sessions = json.as_array().expect("array");
    // the listing is narrowed to March but the ordinal counts February
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["id"].as_str(), Some("mar"));
    assert_eq!(sessions[0]["session_number"].as_i64(), Some(2));
}

#[test]
fn worklist_json_lists_unregistered_sessions() {
    let dir = tempfile::tempdir().unwrap();
    write_march_export(dir.path());

    let (ok, stdout, stderr) = run_gymstats(
        &["worklist", "-j", "-O", "--timezone", "UTC", "--month", "2026-03"],
        dir.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json");
    let worklist = json.as_array().expect("array");
    // s6 (personal block) and s7 (PT awaiting outcome)
    assert_eq!(worklist.len(), 2);
    let ids: Vec<&str> = worklist
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"s6"));
    assert!(ids.contains(&"s7"));
}

#[test]
fn daily_json_is_sorted_by_date() {
    let dir = tempfile::tempdir().unwrap();
    write_march_export(dir.path());

    let (ok, stdout, _) = run_gymstats(
        &["daily", "-j", "-O", "--timezone", "UTC", "--month", "2026-03"],
        dir.path(),
    );
    assert!(ok);

    let json: Value = serde_json::from_slice(&stdout).expect("json");
    let days = json.as_array().expect("array");
    let dates: Vec<&str> = days.iter().map(|d| d["date"].as_str().unwrap()).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    assert_eq!(dates.first(), Some(&"2026-03-02"));
}

#[test]
fn feed_source_collapses_status_transitions() {
    let dir = tempfile::tempdir().unwrap();
    let lines = [
        r#"{"id":"s1","member_id":"m1","staff_id":"stf_1","type":"PT","schedule_type":"inside","start_time":"2026-03-02T10:00:00Z","end_time":"2026-03-02T11:00:00Z","updated_at":"2026-03-01T09:00:00Z"}"#,
        r#"{"id":"s1","member_id":"m1","staff_id":"stf_1","type":"PT","schedule_type":"inside","status":"completed","start_time":"2026-03-02T10:00:00Z","end_time":"2026-03-02T11:00:00Z","updated_at":"2026-03-02T11:05:00Z"}"#,
    ];
    write_file(
        &dir.path().join("feed").join("march.jsonl"),
        &format!("{}\n{}\n", lines[0], lines[1]),
    );

    let (ok, stdout, stderr) = run_gymstats(
        &[
            "monthly", "-j", "-O", "--timezone", "UTC",
            "--month", "2026-03", "--source", "feed",
        ],
        dir.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json");
    // one schedule in its latest state, not two
    assert_eq!(json["pt"].as_i64(), Some(1));
    assert_eq!(json["total"].as_i64(), Some(1));
    assert_eq!(json["completed"].as_i64(), Some(1));
    assert_eq!(json["unregistered"].as_i64(), Some(0));
}

#[test]
fn staff_filter_scopes_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut other_staff = schedule_row(
        "x1",
        Some("m9"),
        "PT",
        Some("inside"),
        Some("completed"),
        "2026-03-02T14:00:00Z",
        "2026-03-02T15:00:00Z",
    );
    other_staff["staff_id"] = serde_json::json!("stf_2");
    let rows = serde_json::json!([
        schedule_row("s1", Some("m1"), "PT", Some("inside"), Some("completed"),
            "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"),
        other_staff,
    ]);
    write_file(
        &dir.path().join("schedules").join("both.json"),
        &rows.to_string(),
    );

    let (ok, stdout, _) = run_gymstats(
        &[
            "monthly", "-j", "-O", "--timezone", "UTC",
            "--month", "2026-03", "--staff", "stf_2",
        ],
        dir.path(),
    );
    assert!(ok);

    let json: Value = serde_json::from_slice(&stdout).expect("json");
    assert_eq!(json["pt"].as_i64(), Some(1));
    assert_eq!(json["total"].as_i64(), Some(1));
}

#[test]
fn timezone_moves_sessions_across_days() {
    let dir = tempfile::tempdir().unwrap();
    // 16:00Z on Feb 28 is March 1st 01:00 in Seoul
    let rows = serde_json::json!([
        schedule_row("s1", Some("m1"), "PT", Some("inside"), Some("completed"),
            "2026-02-28T16:00:00Z", "2026-02-28T17:00:00Z"),
    ]);
    write_file(
        &dir.path().join("schedules").join("tz.json"),
        &rows.to_string(),
    );

    let (ok, stdout, _) = run_gymstats(
        &[
            "monthly", "-j", "-O", "--timezone", "Asia/Seoul",
            "--month", "2026-03",
        ],
        dir.path(),
    );
    assert!(ok);
    let json: Value = serde_json::from_slice(&stdout).expect("json");
    assert_eq!(json["pt"].as_i64(), Some(1));

    let (ok, stdout, _) = run_gymstats(
        &["monthly", "-j", "-O", "--timezone", "UTC", "--month", "2026-03"],
        dir.path(),
    );
    assert!(ok);
    // under UTC the session stays in February and March is empty
    let json: Value = serde_json::from_slice(&stdout).expect("json");
    assert_eq!(json["pt"].as_i64(), Some(0));
    assert_eq!(json["total"].as_i64(), Some(0));
}

#[test]
fn invalid_month_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let (ok, _, stderr) = run_gymstats(&["monthly", "--month", "spring"], dir.path());
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("Invalid month"));
}

#[test]
fn unknown_source_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let (ok, _, stderr) = run_gymstats(&["monthly", "--source", "sheets"], dir.path());
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("Unknown schedule source"));
}
