//! Evaluate several team-number thresholds at once.
//! Each point is an independent plan, so they run in parallel on rayon's pool.

use rayon::prelude::*;
use serde::Serialize;

use crate::config::CoverConfig;
use crate::error::CoverResult;
use crate::planner::plan_default;
use crate::{CoverageInput, Resource};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SweepPoint {
    pub max_resource: Resource,
    pub eligible_resources: usize,
    pub primary_size: usize,
    pub primary_complete: bool,
    /// Smallest complete solution found at this threshold
    pub best_complete_size: Option<usize>,
    pub solution_count: usize,
}

fn evaluate(input: &CoverageInput, config: &CoverConfig) -> CoverResult<SweepPoint> {
    let plan = plan_default(input, config)?;
    let (primary_size, primary_complete) = plan
        .solutions
        .first()
        .map(|s| (s.size(), s.is_complete()))
        .unwrap_or((0, false));
    Ok(SweepPoint {
        max_resource: config.max_resource,
        eligible_resources: plan.index.len(),
        primary_size,
        primary_complete,
        best_complete_size: plan.summary().min_size,
        solution_count: plan.solutions.len(),
    })
}

/// One result per threshold, in the order given.
pub fn sweep(
    input: &CoverageInput,
    config: &CoverConfig,
    thresholds: &[Resource],
) -> Vec<CoverResult<SweepPoint>> {
    thresholds
        .par_iter()
        .map(|&max_resource| {
            let mut point_config = config.clone();
            point_config.max_resource = max_resource;
            evaluate(input, &point_config)
        })
        .collect()
}
