use std::env;
use std::fs::OpenOptions;
use std::io::Write;

use chrono::Local;
use sha2::{Digest, Sha256};

use crate::CoverageInput;

/// SCOUT_COVER_QUIET=1|true, or SCOUT_COVER_LOG=quiet|error.
fn quiet_setting(quiet: Option<&str>, level: Option<&str>) -> bool {
    if matches!(quiet, Some("1") | Some("true")) {
        return true;
    }
    level
        .map(|v| {
            let v = v.to_lowercase();
            v == "quiet" || v == "error"
        })
        .unwrap_or(false)
}

fn is_quiet() -> bool {
    let quiet = env::var("SCOUT_COVER_QUIET").ok();
    let level = env::var("SCOUT_COVER_LOG").ok();
    quiet_setting(quiet.as_deref(), level.as_deref())
}

fn append_line(path: &str, line: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", line);
    }
}

/// Timestamped progress line on stderr (stdout is kept for results and --json),
/// appended to $SCOUT_COVER_LOG_FILE when set.
pub fn log(message: &str) {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let log_message = format!("[{}] {}", timestamp, message);

    if !is_quiet() {
        eprintln!("{}", log_message);
    }

    if let Ok(path) = env::var("SCOUT_COVER_LOG_FILE") {
        append_line(&path, &log_message);
    }
}

/// SHA-256 over the event data in canonical form: events in key order, each team
/// list sorted and deduplicated. Keys and lists are length-prefixed so no two
/// inputs share an encoding. Same content, same key.
pub fn fingerprint(input: &CoverageInput) -> String {
    let mut hasher = Sha256::new();
    hasher.update((input.len() as u64).to_le_bytes());
    for (task, resources) in input {
        let mut teams = resources.clone();
        teams.sort_unstable();
        teams.dedup();
        hasher.update((task.len() as u64).to_le_bytes());
        hasher.update(task.as_bytes());
        hasher.update((teams.len() as u64).to_le_bytes());
        for team in teams {
            hasher.update(team.to_le_bytes());
        }
    }
    format!("{:x}", hasher.finalize())
}
