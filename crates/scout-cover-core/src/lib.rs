//! Core library for scout-cover: pick a small set of teams that together attend
//! every event, always including your own team, and offer several alternatives.
//! Used by the CLI binary; the engine itself is pure and does no I/O.

use std::collections::BTreeMap;

pub mod config;
pub mod eligibility;
pub mod error;
pub mod event_data;
pub mod explorer;
pub mod greedy;
pub mod index;
pub mod planner;
pub mod report;
pub mod sweep;
pub mod utils;


/// An event that needs a scout, e.g. "2025mike".
pub type Task = String;
/// A team number.
pub type Resource = u32;
/// Raw event -> attending teams mapping. Its keys are the task universe.
pub type CoverageInput = BTreeMap<Task, Vec<Resource>>;

// Re-export main API for CLI
pub use config::{load_config, CoverConfig, FileConfig};
pub use eligibility::{EligibilityRule, FilterSummary};
pub use error::{CoverError, CoverResult};
pub use event_data::{is_championship_key, load_event_dir, load_event_map, EventData, TeamInfo};
pub use explorer::{find_alternatives, ExplicitSeeds, MultiCoverageSeeds, SeedPolicy, SolutionSet};
pub use greedy::{greedy_cover, SelectionStep, Solution, SolutionOrigin};
pub use index::CoverageIndex;
pub use planner::{plan, plan_default, CoverPlan, MandatoryStatus};
pub use report::{build_reports, PlanSummary, ResourceCoverage, SolutionReport};
pub use sweep::{sweep, SweepPoint};
pub use utils::{fingerprint, log};
