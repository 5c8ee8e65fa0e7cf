//! Integration tests: run the scout-cover binary and check exit codes and output.

use std::path::Path;
use std::process::Command;

/// Runs in `dir` with `dir` as HOME, so no user-level .scoutcoverrc is picked up.
fn scout_cover(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scout-cover"));
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("SCOUT_COVER_EVENT_DIR")
        .env_remove("SCOUT_COVER_QUIET")
        .env_remove("SCOUT_COVER_LOG")
        .env_remove("SCOUT_COVER_LOG_FILE");
    cmd
}

fn write_rc(dir: &Path, body: &str) {
    std::fs::write(dir.join(".scoutcoverrc"), body).expect("write .scoutcoverrc");
}

/// A: 1, B: 1 2, C: 2, D: 3 (team 3 also attends a championship)
fn write_events(dir: &Path) {
    let events = dir.join("event_data");
    std::fs::create_dir_all(&events).expect("mkdir");
    let files = [
        ("2025a", r#"[{"team_number": 1, "nickname": "Ones"}]"#),
        ("2025b", r#"[{"team_number": 1}, {"team_number": 2}]"#),
        ("2025c", r#"[{"team_number": 2}]"#),
        ("2025d", r#"[{"team_number": 3}, {"note": "no number"}]"#),
        ("2025micmp", r#"[{"team_number": 3}]"#),
    ];
    for (name, body) in files {
        std::fs::write(events.join(format!("{}.json", name)), body).expect("write event");
    }
}

fn json_stdout(out: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&out.stdout).expect("valid JSON on stdout")
}

#[test]
fn test_help() {
    let td = tempfile::tempdir().expect("tmp");
    let out = scout_cover(td.path()).arg("--help").output().unwrap();
    assert!(out.status.success(), "scout-cover --help should succeed");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("plan"));
    assert!(stdout.contains("sweep"));
    assert!(stdout.contains("key"));
}

#[test]
fn test_version() {
    let td = tempfile::tempdir().expect("tmp");
    let out = scout_cover(td.path()).arg("--version").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_plan_json_primary_solution() {
    let td = tempfile::tempdir().expect("tmp");
    write_events(td.path());
    let out = scout_cover(td.path())
        .args(["plan", "1", "--skip-championships", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let doc = json_stdout(&out);
    assert_eq!(doc["events"], 4);
    assert_eq!(doc["mandatory"]["status"], "present");
    let primary = &doc["solutions"][0];
    assert_eq!(primary["resources"], serde_json::json!([1, 2, 3]));
    assert_eq!(primary["complete"], true);
    assert_eq!(primary["size"], 3);
    assert_eq!(doc["summary"]["min_size"], 3);

    let steps = primary["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0]["resource"], 1);
    assert_eq!(steps[0]["newly_covered"], serde_json::json!(["2025a", "2025b"]));
    assert_eq!(steps[1]["resource"], 2);
    assert_eq!(steps[1]["newly_covered"], serde_json::json!(["2025c"]));
}

#[test]
fn test_plan_text_shows_each_pick() {
    let td = tempfile::tempdir().expect("tmp");
    write_events(td.path());
    let out = scout_cover(td.path())
        .args(["plan", "1", "--skip-championships"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Newly covers: 2025a, 2025b"), "{}", stdout);
    assert!(stdout.contains("Newly covers: 2025c"));
    assert!(stdout.contains("Newly covers: 2025d"));
}

#[test]
fn test_cli_exclude_list_replaces_file_list() {
    let td = tempfile::tempdir().expect("tmp");
    write_events(td.path());
    write_rc(td.path(), r#"{"excludeTeams": [3]}"#);

    let out = scout_cover(td.path())
        .args(["plan", "1", "--exclude-teams", "2", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let doc = json_stdout(&out);
    assert_eq!(doc["filter"]["excluded_by_list"], serde_json::json!([2]));
    let primary = doc["solutions"][0]["resources"].as_array().unwrap();
    assert!(primary.contains(&serde_json::json!(3)));

    // Without the flag the file's list applies.
    let out = scout_cover(td.path())
        .args(["plan", "1", "--json"])
        .output()
        .unwrap();
    let doc = json_stdout(&out);
    assert_eq!(doc["filter"]["excluded_by_list"], serde_json::json!([3]));
}

#[test]
fn test_max_team_flag_overrides_file() {
    let td = tempfile::tempdir().expect("tmp");
    write_events(td.path());
    write_rc(td.path(), r#"{"maxTeam": 2}"#);

    let out = scout_cover(td.path())
        .args(["plan", "1", "--json"])
        .output()
        .unwrap();
    let doc = json_stdout(&out);
    assert_eq!(doc["maxTeam"], 2);
    assert_eq!(doc["solutions"][0]["complete"], false);

    let out = scout_cover(td.path())
        .args(["plan", "1", "--max-team", "10", "--json"])
        .output()
        .unwrap();
    let doc = json_stdout(&out);
    assert_eq!(doc["maxTeam"], 10);
    assert_eq!(doc["solutions"][0]["complete"], true);
}

#[test]
fn test_max_solutions_flag_overrides_file() {
    let td = tempfile::tempdir().expect("tmp");
    write_events(td.path());
    write_rc(td.path(), r#"{"maxSolutions": 0}"#);

    let out = scout_cover(td.path()).args(["plan", "1"]).output().unwrap();
    assert!(!out.status.success(), "maxSolutions 0 from the file is invalid");

    let out = scout_cover(td.path())
        .args(["plan", "1", "--max-solutions", "2", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn test_event_dir_env_beats_file_but_not_flag() {
    let td = tempfile::tempdir().expect("tmp");
    write_events(td.path());
    write_rc(td.path(), r#"{"eventDir": "not_here"}"#);

    let out = scout_cover(td.path()).args(["key"]).output().unwrap();
    assert!(!out.status.success(), "eventDir from the file should be used");

    let events = td.path().join("event_data");
    let out = scout_cover(td.path())
        .env("SCOUT_COVER_EVENT_DIR", &events)
        .args(["key"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let out = scout_cover(td.path())
        .env("SCOUT_COVER_EVENT_DIR", td.path().join("also_not_here"))
        .args(["key", "--events", "event_data"])
        .output()
        .unwrap();
    assert!(out.status.success());
}

#[test]
fn test_log_lines_go_to_stderr_and_log_file() {
    let td = tempfile::tempdir().expect("tmp");
    write_events(td.path());
    let log_path = td.path().join("scout.log");

    let out = scout_cover(td.path())
        .env("SCOUT_COVER_LOG_FILE", &log_path)
        .args(["plan", "1"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Loaded 2025a: 1 teams"));
    assert!(!String::from_utf8_lossy(&out.stdout).contains("Loaded 2025a"));

    let out = scout_cover(td.path())
        .env("SCOUT_COVER_LOG_FILE", &log_path)
        .env("SCOUT_COVER_LOG", "quiet")
        .args(["plan", "1"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(!String::from_utf8_lossy(&out.stderr).contains("Loaded"));

    // Both runs reach the file, quiet or not.
    let log = std::fs::read_to_string(&log_path).expect("log file");
    assert_eq!(log.matches("Loaded 2025a: 1 teams").count(), 2);
    assert!(log.starts_with('['));
}

#[test]
fn test_plan_excluded_mandatory_fails() {
    let td = tempfile::tempdir().expect("tmp");
    write_events(td.path());
    let out = scout_cover(td.path())
        .args(["plan", "1", "--exclude-teams", "1", "--include-teams", "1"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("excluded"));
}

#[test]
fn test_plan_absent_mandatory_still_plans() {
    let td = tempfile::tempdir().expect("tmp");
    write_events(td.path());
    let out = scout_cover(td.path())
        .args(["plan", "5", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let doc = json_stdout(&out);
    assert_eq!(doc["mandatory"]["status"], "absent");
    let primary = doc["solutions"][0]["resources"].as_array().unwrap();
    assert!(!primary.contains(&serde_json::json!(5)));
}

#[test]
fn test_plan_gate_fails_on_incomplete_cover() {
    let td = tempfile::tempdir().expect("tmp");
    write_events(td.path());
    // Team 3 is the only one at 2025d.
    let out = scout_cover(td.path())
        .args(["plan", "1", "--exclude-teams", "3", "--gate", "--json"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    let doc = json_stdout(&out);
    assert_eq!(doc["solutions"][0]["complete"], false);
    assert_eq!(doc["solutions"][0]["missing"], serde_json::json!(["2025d", "2025micmp"]));
}

#[test]
fn test_plan_without_event_data_fails() {
    let td = tempfile::tempdir().expect("tmp");
    let out = scout_cover(td.path()).args(["plan", "1"]).output().unwrap();
    assert!(!out.status.success(), "plan with no event_data dir should fail");
}

#[test]
fn test_key_is_stable() {
    let td = tempfile::tempdir().expect("tmp");
    write_events(td.path());
    let first = scout_cover(td.path()).arg("key").output().unwrap();
    let second = scout_cover(td.path()).arg("key").output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(String::from_utf8_lossy(&first.stdout).trim().len(), 64);
}

#[test]
fn test_sweep_json() {
    let td = tempfile::tempdir().expect("tmp");
    write_events(td.path());
    let out = scout_cover(td.path())
        .args(["sweep", "1", "--thresholds", "2", "10", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let doc = json_stdout(&out);
    let points = doc["points"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["point"]["primary_complete"], false);
    assert_eq!(points[1]["point"]["primary_complete"], true);
}
