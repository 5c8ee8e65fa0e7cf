//! Coverage index: team -> set of events the team attends.
//!
//! Built once per run from the raw event -> teams mapping. Only eligible teams
//! get an entry, and a team only gets an entry if it attends at least one event.

use std::collections::{BTreeMap, BTreeSet};

use crate::eligibility::EligibilityRule;
use crate::{CoverageInput, Resource, Task};

/// Resource -> tasks mapping plus the task universe it was built against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverageIndex {
    coverage: BTreeMap<Resource, BTreeSet<Task>>,
    universe: BTreeSet<Task>,
}

impl CoverageIndex {
    /// Build the index. Every task in `input` joins the universe, even one whose
    /// team list is empty or fully filtered out.
    pub fn build(input: &CoverageInput, rule: &EligibilityRule) -> Self {
        let mut coverage: BTreeMap<Resource, BTreeSet<Task>> = BTreeMap::new();
        let mut universe = BTreeSet::new();
        for (task, resources) in input {
            universe.insert(task.clone());
            for &resource in resources {
                if rule.is_eligible(resource) {
                    coverage.entry(resource).or_default().insert(task.clone());
                }
            }
        }
        Self { coverage, universe }
    }

    pub fn tasks_for(&self, resource: Resource) -> Option<&BTreeSet<Task>> {
        self.coverage.get(&resource)
    }

    pub fn coverage_count(&self, resource: Resource) -> usize {
        self.coverage.get(&resource).map_or(0, |t| t.len())
    }

    pub fn contains(&self, resource: Resource) -> bool {
        self.coverage.contains_key(&resource)
    }

    /// Indexed resources in ascending order.
    pub fn resources(&self) -> impl Iterator<Item = Resource> + '_ {
        self.coverage.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, &BTreeSet<Task>)> + '_ {
        self.coverage.iter().map(|(r, t)| (*r, t))
    }

    pub fn universe(&self) -> &BTreeSet<Task> {
        &self.universe
    }

    pub fn len(&self) -> usize {
        self.coverage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coverage.is_empty()
    }

    /// Union of the tasks covered by `resources`. Unknown resources add nothing.
    pub fn covered_by<'a, I>(&self, resources: I) -> BTreeSet<Task>
    where
        I: IntoIterator<Item = &'a Resource>,
    {
        let mut covered = BTreeSet::new();
        for resource in resources {
            if let Some(tasks) = self.coverage.get(resource) {
                covered.extend(tasks.iter().cloned());
            }
        }
        covered
    }
}
