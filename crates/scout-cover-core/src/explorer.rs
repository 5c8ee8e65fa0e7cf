//! Alternative-solution search.
//!
//! Solution #1 is the plain required-first greedy cover. Further solutions come
//! from re-running the greedy loop with a different forced starting team. This
//! is a bounded heuristic: it neither guarantees the smallest possible cover nor
//! the most diverse set of covers.

use std::collections::BTreeSet;

use crate::greedy::{greedy_cover, Cover, Solution, SolutionOrigin};
use crate::index::CoverageIndex;
use crate::Resource;

/// Chooses which teams the explorer tries as starting points, and in what order.
pub trait SeedPolicy {
    fn seeds(&self, index: &CoverageIndex, mandatory: Resource) -> Vec<Resource>;

    /// Return true to skip a seed without running it.
    fn skip_seed(&self, _seed: Resource, _mandatory: Resource) -> bool {
        false
    }
}

/// Teams attending at least `min_coverage` events, ascending by number, with the
/// mandatory team moved to the front.
#[derive(Clone, Debug)]
pub struct MultiCoverageSeeds {
    pub min_coverage: usize,
    /// Seeding with the mandatory team just re-derives solution #1.
    pub skip_mandatory: bool,
}

impl Default for MultiCoverageSeeds {
    fn default() -> Self {
        Self {
            min_coverage: 2,
            skip_mandatory: true,
        }
    }
}

impl SeedPolicy for MultiCoverageSeeds {
    fn seeds(&self, index: &CoverageIndex, mandatory: Resource) -> Vec<Resource> {
        let mut seeds = vec![mandatory];
        seeds.extend(
            index
                .iter()
                .filter(|(r, tasks)| *r != mandatory && tasks.len() >= self.min_coverage)
                .map(|(r, _)| r),
        );
        seeds
    }

    fn skip_seed(&self, seed: Resource, mandatory: Resource) -> bool {
        self.skip_mandatory && seed == mandatory
    }
}

/// A fixed list of seeds, tried in the given order.
#[derive(Clone, Debug, Default)]
pub struct ExplicitSeeds(pub Vec<Resource>);

impl SeedPolicy for ExplicitSeeds {
    fn seeds(&self, _index: &CoverageIndex, _mandatory: Resource) -> Vec<Resource> {
        self.0.clone()
    }
}

/// Bounded list of solutions, no two with the same set of teams.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolutionSet {
    solutions: Vec<Solution>,
    limit: usize,
}

impl SolutionSet {
    pub fn new(limit: usize) -> Self {
        Self {
            solutions: Vec::new(),
            limit,
        }
    }

    pub fn contains_set(&self, resources: &BTreeSet<Resource>) -> bool {
        self.solutions.iter().any(|s| &s.resource_set() == resources)
    }

    /// Add a solution unless the set is full or already holds the same teams.
    pub fn push_unique(&mut self, solution: Solution) -> bool {
        if self.is_full() || self.contains_set(&solution.resource_set()) {
            return false;
        }
        self.solutions.push(solution);
        true
    }

    pub fn is_full(&self) -> bool {
        self.solutions.len() >= self.limit
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn first(&self) -> Option<&Solution> {
        self.solutions.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }
}

impl<'a> IntoIterator for &'a SolutionSet {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}

/// Run the greedy loop after forcing `mandatory` and then `seed` into the selection.
fn seeded_cover(index: &CoverageIndex, mandatory: Resource, seed: Resource) -> Solution {
    let mut cover = Cover::new(index);
    if mandatory != seed {
        cover.select(mandatory);
    }
    cover.select(seed);
    cover.run_greedy();
    cover.finish(SolutionOrigin::Seeded(seed))
}

/// Find up to `max_solutions` covers.
///
/// The first entry is always the primary greedy solution, complete or not. Every
/// later entry is complete and has a team set not seen before.
pub fn find_alternatives(
    index: &CoverageIndex,
    mandatory: Resource,
    max_solutions: usize,
    policy: &dyn SeedPolicy,
) -> SolutionSet {
    let mut solutions = SolutionSet::new(max_solutions);
    if max_solutions == 0 {
        return solutions;
    }
    solutions.push_unique(greedy_cover(index, mandatory));

    for seed in policy.seeds(index, mandatory).into_iter().take(max_solutions) {
        if solutions.is_full() {
            break;
        }
        if policy.skip_seed(seed, mandatory) {
            continue;
        }
        let candidate = seeded_cover(index, mandatory, seed);
        if !candidate.is_complete() {
            continue;
        }
        solutions.push_unique(candidate);
    }
    solutions
}
