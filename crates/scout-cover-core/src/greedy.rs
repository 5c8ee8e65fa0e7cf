//! Required-team-first greedy cover.
//!
//! Each round picks the unselected team that covers the most still-uncovered
//! events. Ties go to the lowest team number, independent of map iteration order.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::index::CoverageIndex;
use crate::{Resource, Task};

/// How a solution was started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "seed")]
pub enum SolutionOrigin {
    /// Plain greedy run seeded only with the mandatory team
    Primary,
    /// Greedy run forced to start from this team
    Seeded(Resource),
}

/// One pick and the events it newly covered at the time it was picked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectionStep {
    pub resource: Resource,
    pub newly_covered: BTreeSet<Task>,
}

/// Ordered team selection and what is still uncovered after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub resources: Vec<Resource>,
    pub steps: Vec<SelectionStep>,
    pub uncovered: BTreeSet<Task>,
    pub origin: SolutionOrigin,
}

impl Solution {
    pub fn size(&self) -> usize {
        self.resources.len()
    }

    pub fn is_complete(&self) -> bool {
        self.uncovered.is_empty()
    }

    pub fn contains(&self, resource: Resource) -> bool {
        self.resources.contains(&resource)
    }

    /// Selected teams as an unordered set, used to detect duplicate solutions.
    pub fn resource_set(&self) -> BTreeSet<Resource> {
        self.resources.iter().copied().collect()
    }
}

/// Local search state: what is picked so far and what is left to cover.
pub(crate) struct Cover<'a> {
    index: &'a CoverageIndex,
    steps: Vec<SelectionStep>,
    uncovered: BTreeSet<Task>,
}

impl<'a> Cover<'a> {
    pub(crate) fn new(index: &'a CoverageIndex) -> Self {
        Self {
            index,
            steps: Vec::new(),
            uncovered: index.universe().clone(),
        }
    }

    fn is_selected(&self, resource: Resource) -> bool {
        self.steps.iter().any(|s| s.resource == resource)
    }

    /// Force a team into the selection. Ignored if it is not indexed or already picked.
    pub(crate) fn select(&mut self, resource: Resource) -> bool {
        let Some(tasks) = self.index.tasks_for(resource) else {
            return false;
        };
        if self.is_selected(resource) {
            return false;
        }
        let newly_covered: BTreeSet<Task> = tasks.intersection(&self.uncovered).cloned().collect();
        for task in &newly_covered {
            self.uncovered.remove(task);
        }
        self.steps.push(SelectionStep {
            resource,
            newly_covered,
        });
        true
    }

    fn marginal_gain(&self, resource: Resource) -> usize {
        self.index
            .tasks_for(resource)
            .map_or(0, |tasks| tasks.intersection(&self.uncovered).count())
    }

    /// Best unselected candidate: largest gain, then smallest team number.
    /// `None` when no candidate covers anything new.
    fn best_candidate(&self) -> Option<(Resource, usize)> {
        self.index
            .resources()
            .filter(|&r| !self.is_selected(r))
            .map(|r| (r, self.marginal_gain(r)))
            .filter(|&(_, gain)| gain > 0)
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
    }

    /// Keep picking until everything is covered or nothing helps anymore.
    pub(crate) fn run_greedy(&mut self) {
        while !self.uncovered.is_empty() {
            let Some((best, _)) = self.best_candidate() else {
                break;
            };
            self.select(best);
        }
    }

    pub(crate) fn finish(self, origin: SolutionOrigin) -> Solution {
        Solution {
            resources: self.steps.iter().map(|s| s.resource).collect(),
            steps: self.steps,
            uncovered: self.uncovered,
            origin,
        }
    }
}

/// Greedy cover that starts with `mandatory` when the index knows it.
///
/// The result may be incomplete; check [`Solution::is_complete`].
pub fn greedy_cover(index: &CoverageIndex, mandatory: Resource) -> Solution {
    let mut cover = Cover::new(index);
    cover.select(mandatory);
    cover.run_greedy();
    cover.finish(SolutionOrigin::Primary)
}
