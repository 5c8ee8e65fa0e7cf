//! Thin CLI layer: parse args, styled output, and call into scout-cover-core.
//! Crash-proof: panic caught and reported; all errors return Result.

mod output;

use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use output::{dim, error, info, use_color};
use scout_cover_core::{CoverConfig, EventData, FileConfig, Resource};

/// Run a planning task; in quiet mode show a spinner until done.
fn run_with_spinner<T, F>(message: &str, quiet: bool, f: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, String> + Send + 'static,
{
    if !quiet {
        return f();
    }
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = f();
        let _ = tx.send(result);
    });
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⠈⠐⠠⠰⠸⠹")
        .template("{spinner:.dim} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    let tick = Duration::from_millis(80);
    loop {
        match rx.recv_timeout(tick) {
            Ok(res) => {
                spinner.finish_and_clear();
                return res;
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                spinner.finish_and_clear();
                return Err("Planning failed.".to_string());
            }
            Err(mpsc::RecvTimeoutError::Timeout) => spinner.tick(),
        }
    }
}

fn team_arg() -> Arg {
    Arg::new("team")
        .required(true)
        .value_parser(clap::value_parser!(Resource))
        .help("Your team number; it is seeded into every solution")
}

fn data_args() -> Vec<Arg> {
    vec![
        Arg::new("events")
            .long("events")
            .value_name("DIR")
            .help("Directory of <event_key>.json team lists (default: event_data, or eventDir in .scoutcoverrc)"),
        Arg::new("data")
            .long("data")
            .value_name("FILE")
            .conflicts_with("events")
            .help("Single JSON file mapping event key -> team numbers"),
        Arg::new("skip-championships")
            .long("skip-championships")
            .action(ArgAction::SetTrue)
            .help("Drop district championship events (keys ending in cmp, cmp1..cmp9)"),
    ]
}

fn filter_args() -> Vec<Arg> {
    vec![
        Arg::new("max-team")
            .long("max-team")
            .value_parser(clap::value_parser!(Resource))
            .help("Maximum team number to consider (default: 12000)"),
        Arg::new("exclude-teams")
            .long("exclude-teams")
            .num_args(0..)
            .value_parser(clap::value_parser!(Resource))
            .help("Team numbers never to pick (space-separated)"),
        Arg::new("include-teams")
            .long("include-teams")
            .num_args(0..)
            .value_parser(clap::value_parser!(Resource))
            .help("Team numbers to allow even above --max-team (space-separated)"),
    ]
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output machine-readable JSON result")
}

fn load_data(sub: &ArgMatches, file_cfg: &FileConfig) -> Result<EventData, String> {
    let data = if let Some(path) = sub.get_one::<String>("data") {
        scout_cover_core::load_event_map(Path::new(path))
    } else {
        let dir = sub
            .get_one::<String>("events")
            .map(PathBuf::from)
            .unwrap_or_else(|| file_cfg.event_dir());
        scout_cover_core::load_event_dir(&dir)
    }
    .map_err(|e| e.to_string())?;

    let skip = sub.get_flag("skip-championships") || file_cfg.skip_championships.unwrap_or(false);
    let data = if skip { data.without_championships() } else { data };
    if data.is_empty() {
        return Err("No events left to analyze.".to_string());
    }
    Ok(data)
}

fn build_config(sub: &ArgMatches, file_cfg: &FileConfig) -> CoverConfig {
    let team = *sub.get_one::<Resource>("team").expect("team is required");
    let mut config = CoverConfig::new(team);
    config.apply_file(file_cfg);
    if let Some(max) = sub.get_one::<Resource>("max-team") {
        config.max_resource = *max;
    }
    // A list given on the command line replaces the file's list.
    if let Some(teams) = sub.get_many::<Resource>("exclude-teams") {
        config.exclude = teams.copied().collect();
    }
    if let Some(teams) = sub.get_many::<Resource>("include-teams") {
        config.include = teams.copied().collect();
    }
    if let Ok(Some(k)) = sub.try_get_one::<usize>("max-solutions") {
        config.max_solutions = *k;
    }
    config
}

fn cmd_plan(sub: &ArgMatches, file_cfg: &FileConfig) -> Result<(), String> {
    let quiet = sub.get_flag("quiet");
    let json_out = sub.get_flag("json");
    if quiet || json_out {
        env::set_var("SCOUT_COVER_QUIET", "1");
    }
    let data = load_data(sub, file_cfg)?;
    let config = build_config(sub, file_cfg);
    let team = config.mandatory;

    let events = data.events.clone();
    let plan_config = config.clone();
    let plan = run_with_spinner("Searching for coverage solutions…", quiet && !json_out, move || {
        scout_cover_core::plan_default(&events, &plan_config).map_err(|e| e.to_string())
    })?;
    let reports = plan.reports();
    let summary = plan.summary();

    if json_out {
        let doc = serde_json::json!({
            "schemaVersion": "1",
            "command": "plan",
            "team": team,
            "maxTeam": config.max_resource,
            "events": data.events.len(),
            "fingerprint": scout_cover_core::fingerprint(&data.events),
            "filter": plan.filter,
            "mandatory": plan.mandatory,
            "solutions": reports,
            "summary": summary,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&doc).map_err(|e| e.to_string())?
        );
    } else {
        if !quiet {
            info(&format!("Required team: {}", team));
            info(&format!("Max team number: {}", config.max_resource));
            info(&format!("Events to analyze: {}", data.events.len()));
            output::print_filter(&plan.filter, config.max_resource);
            output::print_mandatory(team, &plan.mandatory);
        }
        info(&format!("\nFound {} coverage solution(s):", reports.len()));
        for report in &reports {
            output::print_solution(report, &data.teams, team);
        }
        output::print_summary(&summary, team, &plan.mandatory);
    }

    if sub.get_flag("gate") && summary.complete_count == 0 {
        return Err("No complete coverage found (gate).".to_string());
    }
    Ok(())
}

fn cmd_sweep(sub: &ArgMatches, file_cfg: &FileConfig) -> Result<(), String> {
    let json_out = sub.get_flag("json");
    if json_out {
        env::set_var("SCOUT_COVER_QUIET", "1");
    }
    let data = load_data(sub, file_cfg)?;
    let config = build_config(sub, file_cfg);
    let thresholds: Vec<Resource> = sub
        .get_many::<Resource>("thresholds")
        .map(|it| it.copied().collect())
        .unwrap_or_default();

    let results = scout_cover_core::sweep(&data.events, &config, &thresholds);
    let points: Vec<(Resource, Result<_, String>)> = thresholds
        .iter()
        .copied()
        .zip(results.into_iter().map(|r| r.map_err(|e| e.to_string())))
        .collect();

    if json_out {
        let rows: Vec<serde_json::Value> = points
            .iter()
            .map(|(t, p)| match p {
                Ok(point) => serde_json::json!({ "maxTeam": t, "point": point }),
                Err(e) => serde_json::json!({ "maxTeam": t, "error": e }),
            })
            .collect();
        let doc = serde_json::json!({
            "schemaVersion": "1",
            "command": "sweep",
            "team": config.mandatory,
            "points": rows,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&doc).map_err(|e| e.to_string())?
        );
    } else {
        output::print_sweep(&points);
    }
    Ok(())
}

fn run() -> Result<(), String> {
    let matches = Command::new("scout-cover")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pick a small set of teams that together scout every event, your team always included")
        .after_help(
            "Examples:\n  scout-cover plan 3314\n  scout-cover plan 3314 --max-team 6000 --exclude-teams 1234 5678\n  scout-cover plan 3314 --include-teams 10123 --json\n  scout-cover sweep 3314 --thresholds 3000 6000 9000\n  scout-cover key --events event_data",
        )
        .subcommand(
            Command::new("plan")
                .about("Find coverage solutions that include your team")
                .arg(team_arg())
                .args(data_args())
                .args(filter_args())
                .arg(
                    Arg::new("max-solutions")
                        .long("max-solutions")
                        .value_parser(clap::value_parser!(usize))
                        .help("Maximum number of solutions to report (default: 5)"),
                )
                .arg(json_arg())
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .action(ArgAction::SetTrue)
                        .help("Minimal output; show spinner when busy"),
                )
                .arg(
                    Arg::new("gate")
                        .long("gate")
                        .action(ArgAction::SetTrue)
                        .help("Exit non-zero when no complete cover exists (CI gate)"),
                ),
        )
        .subcommand(
            Command::new("sweep")
                .about("Compare results across several --max-team thresholds")
                .arg(team_arg())
                .args(data_args())
                .args(filter_args())
                .arg(
                    Arg::new("thresholds")
                        .long("thresholds")
                        .required(true)
                        .num_args(1..)
                        .value_parser(clap::value_parser!(Resource))
                        .help("Max team numbers to evaluate"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("key")
                .about("Print a fingerprint of the event data (same data => same key)")
                .args(data_args()),
        )
        .get_matches();

    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let file_cfg = scout_cover_core::load_config(&cwd);

    match matches.subcommand() {
        Some(("plan", sub_m)) => cmd_plan(sub_m, &file_cfg)?,
        Some(("sweep", sub_m)) => cmd_sweep(sub_m, &file_cfg)?,
        Some(("key", sub_m)) => {
            env::set_var("SCOUT_COVER_QUIET", "1");
            let data = load_data(sub_m, &file_cfg)?;
            println!("{}", scout_cover_core::fingerprint(&data.events));
        }
        _ => {
            if use_color() {
                println!("{}", "scout-cover".bright_cyan().bold());
                dim("District scouting coverage planner.");
            } else {
                println!("scout-cover: district scouting coverage planner");
            }
            dim("\nRun `scout-cover --help` for details.");
        }
    }

    Ok(())
}

fn main() {
    if !use_color() {
        colored::control::set_override(false);
    }

    let code = match std::panic::catch_unwind(run) {
        Ok(Ok(())) => 0,
        Ok(Err(e)) => {
            error(&e);
            1
        }
        Err(_) => {
            error("An unexpected error occurred. Please report this issue.");
            1
        }
    };
    std::process::exit(code);
}
