//! One call from raw event data + config to a full coverage plan.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::CoverConfig;
use crate::eligibility::FilterSummary;
use crate::error::CoverResult;
use crate::explorer::{find_alternatives, MultiCoverageSeeds, SeedPolicy, SolutionSet};
use crate::index::CoverageIndex;
use crate::report::{build_reports, PlanSummary, SolutionReport};
use crate::{CoverageInput, Task};

/// Whether the mandatory team could seed the search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum MandatoryStatus {
    Present { tasks: BTreeSet<Task> },
    /// Not eligible or attends no events; solutions are plain greedy covers.
    Absent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverPlan {
    pub config: CoverConfig,
    pub index: CoverageIndex,
    pub filter: FilterSummary,
    pub mandatory: MandatoryStatus,
    pub solutions: SolutionSet,
}

impl CoverPlan {
    pub fn reports(&self) -> Vec<SolutionReport> {
        build_reports(&self.solutions, &self.index, self.config.mandatory)
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary::from_reports(&self.reports())
    }
}

/// Validate, index, and explore.
pub fn plan(
    input: &CoverageInput,
    config: &CoverConfig,
    policy: &dyn SeedPolicy,
) -> CoverResult<CoverPlan> {
    config.validate()?;
    let rule = config.rule();
    let index = CoverageIndex::build(input, &rule);
    let filter = rule.summarize(input);
    let mandatory = match index.tasks_for(config.mandatory) {
        Some(tasks) => MandatoryStatus::Present {
            tasks: tasks.clone(),
        },
        None => MandatoryStatus::Absent,
    };
    let solutions = find_alternatives(&index, config.mandatory, config.max_solutions, policy);
    Ok(CoverPlan {
        config: config.clone(),
        index,
        filter,
        mandatory,
        solutions,
    })
}

pub fn plan_default(input: &CoverageInput, config: &CoverConfig) -> CoverResult<CoverPlan> {
    plan(input, config, &MultiCoverageSeeds::default())
}
