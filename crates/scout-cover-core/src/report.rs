//! Read-only views of solutions for presentation.
//!
//! Completeness here is recomputed from the coverage index rather than trusted
//! from the search state, so a report is also a validation.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::explorer::SolutionSet;
use crate::greedy::{SelectionStep, Solution, SolutionOrigin};
use crate::index::CoverageIndex;
use crate::{Resource, Task};

/// All events one team attends (not just the ones it newly covered).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceCoverage {
    pub resource: Resource,
    pub tasks: Vec<Task>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SolutionReport {
    /// 1-based position in the solution set
    pub rank: usize,
    pub origin: SolutionOrigin,
    pub resources: Vec<Resource>,
    pub size: usize,
    pub coverage: Vec<ResourceCoverage>,
    /// Picks in order, each with the events it newly covered
    pub steps: Vec<SelectionStep>,
    pub covered: usize,
    pub total: usize,
    pub complete: bool,
    pub missing: Vec<Task>,
    pub includes_mandatory: bool,
}

impl SolutionReport {
    pub fn build(
        rank: usize,
        solution: &Solution,
        index: &CoverageIndex,
        mandatory: Resource,
    ) -> Self {
        let coverage = solution
            .resources
            .iter()
            .map(|&resource| ResourceCoverage {
                resource,
                tasks: index
                    .tasks_for(resource)
                    .map(|t| t.iter().cloned().collect())
                    .unwrap_or_default(),
            })
            .collect();
        let covered: BTreeSet<Task> = index.covered_by(&solution.resources);
        let missing: Vec<Task> = index.universe().difference(&covered).cloned().collect();
        Self {
            rank,
            origin: solution.origin,
            resources: solution.resources.clone(),
            size: solution.size(),
            coverage,
            steps: solution.steps.clone(),
            covered: covered.len(),
            total: index.universe().len(),
            complete: missing.is_empty(),
            missing,
            includes_mandatory: solution.contains(mandatory),
        }
    }
}

/// Reports for a whole solution set, in order.
pub fn build_reports(
    solutions: &SolutionSet,
    index: &CoverageIndex,
    mandatory: Resource,
) -> Vec<SolutionReport> {
    solutions
        .iter()
        .enumerate()
        .map(|(i, s)| SolutionReport::build(i + 1, s, index, mandatory))
        .collect()
}

/// Headline numbers over a solution set. Only complete solutions count as options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub solution_count: usize,
    pub complete_count: usize,
    pub min_size: Option<usize>,
    pub optimal_count: usize,
}

impl PlanSummary {
    pub fn from_reports(reports: &[SolutionReport]) -> Self {
        let complete: Vec<&SolutionReport> = reports.iter().filter(|r| r.complete).collect();
        let min_size = complete.iter().map(|r| r.size).min();
        let optimal_count = match min_size {
            Some(min) => complete.iter().filter(|r| r.size == min).count(),
            None => 0,
        };
        Self {
            solution_count: reports.len(),
            complete_count: complete.len(),
            min_size,
            optimal_count,
        }
    }
}
