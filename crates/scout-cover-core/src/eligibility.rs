//! Which teams may be picked at all: number threshold, include list, exclude list.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{CoverageInput, Resource};

/// Eligibility of a team. Exclusion beats inclusion, inclusion beats the threshold.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EligibilityRule {
    pub max_resource: Resource,
    pub include: BTreeSet<Resource>,
    pub exclude: BTreeSet<Resource>,
}

impl EligibilityRule {
    pub fn new(max_resource: Resource) -> Self {
        Self {
            max_resource,
            ..Default::default()
        }
    }

    pub fn including<I: IntoIterator<Item = Resource>>(mut self, teams: I) -> Self {
        self.include.extend(teams);
        self
    }

    pub fn excluding<I: IntoIterator<Item = Resource>>(mut self, teams: I) -> Self {
        self.exclude.extend(teams);
        self
    }

    pub fn is_eligible(&self, resource: Resource) -> bool {
        if self.exclude.contains(&resource) {
            return false;
        }
        resource <= self.max_resource || self.include.contains(&resource)
    }

    /// Classify every team that appears in the input.
    pub fn summarize(&self, input: &CoverageInput) -> FilterSummary {
        let seen: BTreeSet<Resource> = input.values().flatten().copied().collect();
        let mut summary = FilterSummary {
            total_resources: seen.len(),
            ..Default::default()
        };
        for &team in &seen {
            let above = team > self.max_resource;
            if self.exclude.contains(&team) {
                summary.excluded_by_list.insert(team);
            } else if above && self.include.contains(&team) {
                summary.included_by_override.insert(team);
            } else if above {
                summary.excluded_by_threshold.insert(team);
            }
            if self.is_eligible(team) {
                summary.eligible_resources += 1;
            }
        }
        summary
    }
}

/// What the eligibility rule did to the teams in one input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub total_resources: usize,
    pub eligible_resources: usize,
    pub excluded_by_threshold: BTreeSet<Resource>,
    pub excluded_by_list: BTreeSet<Resource>,
    pub included_by_override: BTreeSet<Resource>,
}
