//! Styled console output (no-op styling when stdout isn't a TTY).

use colored::Colorize;
use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::io::IsTerminal;

use scout_cover_core::{
    FilterSummary, MandatoryStatus, PlanSummary, Resource, SolutionReport, SweepPoint, TeamInfo,
};

pub fn use_color() -> bool {
    std::io::stdout().is_terminal() && env::var("NO_COLOR").unwrap_or_default().is_empty()
}

pub fn success(msg: &str) {
    if use_color() {
        println!("{}", msg.green());
    } else {
        println!("{}", msg);
    }
}

pub fn error(msg: &str) {
    if use_color() {
        eprintln!("{}", msg.red());
    } else {
        eprintln!("{}", msg);
    }
}

pub fn warning(msg: &str) {
    if use_color() {
        eprintln!("{}", msg.yellow());
    } else {
        eprintln!("{}", msg);
    }
}

pub fn info(msg: &str) {
    if use_color() {
        println!("{}", msg.cyan());
    } else {
        println!("{}", msg);
    }
}

pub fn dim(msg: &str) {
    if use_color() {
        println!("{}", msg.dimmed());
    } else {
        println!("{}", msg);
    }
}

fn heading(title: &str, width: usize) {
    let rule = "=".repeat(width);
    println!("\n{}", rule);
    if use_color() {
        println!("{}", title.bold());
    } else {
        println!("{}", title);
    }
    println!("{}", rule);
}

/// At most ten teams, then a count of the rest.
fn team_list(teams: &BTreeSet<Resource>) -> String {
    let shown: Vec<String> = teams.iter().take(10).map(|t| t.to_string()).collect();
    if teams.len() > 10 {
        format!("{}... (and {} more)", shown.join(", "), teams.len() - 10)
    } else {
        shown.join(", ")
    }
}

pub fn print_filter(filter: &FilterSummary, max_team: Resource) {
    if !filter.excluded_by_threshold.is_empty() {
        warning(&format!(
            "Excluded {} teams with numbers > {}: {}",
            filter.excluded_by_threshold.len(),
            max_team,
            team_list(&filter.excluded_by_threshold)
        ));
    }
    if !filter.included_by_override.is_empty() {
        success(&format!(
            "Included {} teams despite exceeding max number: {}",
            filter.included_by_override.len(),
            team_list(&filter.included_by_override)
        ));
    }
    if !filter.excluded_by_list.is_empty() {
        warning(&format!(
            "Excluded {} teams by explicit exclusion list: {}",
            filter.excluded_by_list.len(),
            team_list(&filter.excluded_by_list)
        ));
    }
    dim(&format!(
        "Teams after filtering: {} of {}",
        filter.eligible_resources, filter.total_resources
    ));
}

pub fn print_mandatory(team: Resource, status: &MandatoryStatus) {
    match status {
        MandatoryStatus::Present { tasks } => {
            let events: Vec<&str> = tasks.iter().map(|t| t.as_str()).collect();
            success(&format!("Team {} found, attends: {}", team, events.join(", ")));
        }
        MandatoryStatus::Absent => {
            warning(&format!("Team {} not found in any eligible event list.", team));
            warning("   Solutions below are plain greedy covers without it.");
        }
    }
}

pub fn print_solution(
    report: &SolutionReport,
    teams: &BTreeMap<Resource, TeamInfo>,
    mandatory: Resource,
) {
    heading(
        &format!("SOLUTION {}: {} teams needed", report.rank, report.size),
        60,
    );
    for (i, cov) in report.coverage.iter().enumerate() {
        let team = teams.get(&cov.resource);
        let nickname = team
            .and_then(|t| t.nickname.as_deref())
            .unwrap_or("Unknown");
        println!("\n{}. TEAM {} - {}", i + 1, cov.resource, nickname);
        if let Some(team) = team {
            println!(
                "   School: {}",
                team.school_name.as_deref().unwrap_or("Unknown")
            );
            println!("   Location: {}", team.location());
            if let Some(site) = team.website.as_deref().filter(|s| !s.is_empty()) {
                println!("   Website: {}", site);
            }
        }
        println!(
            "   Events Covered: {} ({} events)",
            cov.tasks.join(", "),
            cov.tasks.len()
        );
        if let Some(step) = report.steps.iter().find(|s| s.resource == cov.resource) {
            let fresh: Vec<&str> = step.newly_covered.iter().map(|t| t.as_str()).collect();
            if fresh.is_empty() {
                dim("   Newly covers: nothing new");
            } else {
                dim(&format!("   Newly covers: {}", fresh.join(", ")));
            }
        }
        if cov.resource == mandatory {
            info("   * YOUR TEAM - Primary scouting responsibility");
        }
    }
    println!();
    if report.complete {
        success(&format!(
            "Full coverage verified: {}/{} events covered",
            report.covered, report.total
        ));
    } else {
        error(&format!(
            "Incomplete coverage: missing {}",
            report.missing.join(", ")
        ));
    }
}

pub fn print_summary(summary: &PlanSummary, team: Resource, status: &MandatoryStatus) {
    heading("RECOMMENDATIONS", 80);
    let Some(min) = summary.min_size else {
        error("No complete coverage found.");
        dim(&format!("   Team {} may attend too few events,", team));
        dim("   the max team limit may be too restrictive,");
        dim("   or some events have no eligible teams at all.");
        return;
    };
    println!("- Minimum teams needed: {}", min);
    println!("- Number of optimal solutions: {}", summary.optimal_count);
    if let MandatoryStatus::Present { tasks } = status {
        let events: Vec<&str> = tasks.iter().map(|t| t.as_str()).collect();
        println!("- Your team ({}) attends: {}", team, events.join(", "));
    }
    if summary.optimal_count > 1 {
        info(&format!(
            "\nYou have {} equally small options; pick by proximity, existing partnerships and reliability.",
            summary.optimal_count
        ));
    }
    dim("\nContact the teams in Solution 1 first; fall back to alternatives if a team cannot commit.");
}

pub fn print_sweep(points: &[(Resource, Result<SweepPoint, String>)]) {
    println!(
        "{:<10} {:>9} {:>8} {:>9} {:>6} {:>10}",
        "MAX TEAM", "ELIGIBLE", "PRIMARY", "COMPLETE", "BEST", "SOLUTIONS"
    );
    for (threshold, point) in points {
        match point {
            Ok(p) => println!(
                "{:<10} {:>9} {:>8} {:>9} {:>6} {:>10}",
                p.max_resource,
                p.eligible_resources,
                p.primary_size,
                if p.primary_complete { "yes" } else { "no" },
                p.best_complete_size
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                p.solution_count
            ),
            Err(e) => error(&format!("{:<10} {}", threshold, e)),
        }
    }
}
